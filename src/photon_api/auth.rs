use crate::photon_api::client::PhotonClient;
use crate::photon_api::jwt::{self, JwtToken};
use crate::photon_api::oidc::{OidcClient, TokenGrant};
use crate::photon_api::resources::{AuthInfo, TokenOptions};
use crate::photon_api::rest::decode_json;
use crate::photon_api::types::PhotonError;

const AUTH_PATH: &str = "/auth";

/// Authentication API
///
/// Resolves the endpoint's authentication configuration and exchanges
/// credentials for tokens with the identity provider it names. Nothing is
/// cached between calls: every token request re-reads `/auth`.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a PhotonClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a PhotonClient) -> Self {
        Self { client }
    }

    /// Fetch the authentication configuration of the endpoint
    ///
    /// Issues a single `GET {endpoint}/auth`.
    pub async fn get(&self) -> Result<AuthInfo, PhotonError> {
        let url = self.client.url(AUTH_PATH);
        let response = self
            .client
            .rest()
            .get(&url, self.client.options().access_token())
            .await?;

        let info: AuthInfo = decode_json(response).await?;
        tracing::debug!(
            "Auth info: enabled={}, endpoint={}, port={}",
            info.enabled,
            info.endpoint,
            info.port
        );
        Ok(info)
    }

    /// Obtain tokens with a username and password
    ///
    /// # Errors
    ///
    /// Returns [`PhotonError::AuthDisabled`] without contacting any identity
    /// provider when the endpoint has authentication turned off.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use photon_sdk::PhotonClient;
    ///
    /// # tokio_test::block_on(async {
    /// let client = PhotonClient::new("https://photon.example.com:9000");
    /// let tokens = client
    ///     .auth()
    ///     .get_tokens_by_password("administrator@esxcloud", "secret")
    ///     .await
    ///     .unwrap();
    /// let client = client.with_tokens(tokens);
    /// # });
    /// ```
    pub async fn get_tokens_by_password(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<TokenOptions, PhotonError> {
        let grant = TokenGrant::Password {
            username: username.into(),
            password: password.into(),
        };
        self.exchange(&grant).await
    }

    /// Obtain a fresh token bundle with a refresh token
    ///
    /// Same preconditions as [`AuthApi::get_tokens_by_password`].
    pub async fn get_tokens_by_refresh_token(
        &self,
        refresh_token: impl Into<String>,
    ) -> Result<TokenOptions, PhotonError> {
        let grant = TokenGrant::RefreshToken {
            refresh_token: refresh_token.into(),
        };
        self.exchange(&grant).await
    }

    /// Decode the claims of a token (no signature or expiry check)
    pub fn parse_token_details(&self, token: &str) -> Result<JwtToken, PhotonError> {
        jwt::parse_token_details(token)
    }

    /// Decode the header and payload JSON of a token
    pub fn parse_raw_token_details(&self, token: &str) -> Result<Vec<String>, PhotonError> {
        jwt::parse_raw_token_details(token)
    }

    async fn exchange(&self, grant: &TokenGrant) -> Result<TokenOptions, PhotonError> {
        let oidc = self.oidc_client().await?;
        oidc.exchange(grant).await
    }

    async fn oidc_client(&self) -> Result<OidcClient, PhotonError> {
        let info = self.get().await?;
        if !info.enabled {
            tracing::debug!("Token request refused: authentication disabled");
            return Err(PhotonError::AuthDisabled);
        }

        let options = self.client.options();
        let endpoint = info.identity_provider_url(&options.auth_scheme)?;
        Ok(OidcClient::new(
            endpoint,
            options.token_scope.clone(),
            self.client.rest().http().clone(),
        ))
    }
}
