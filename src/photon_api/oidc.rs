use crate::photon_api::resources::TokenOptions;
use crate::photon_api::types::{PhotonError, ProviderError};
use serde::Serialize;

/// Path of the token endpoint on the identity provider
const TOKEN_PATH: &str = "openidconnect/token";

/// Credential presented to the identity provider
#[derive(Clone, PartialEq, Eq)]
pub enum TokenGrant {
    Password { username: String, password: String },
    RefreshToken { refresh_token: String },
}

// Credentials stay out of debug output
impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenGrant::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            TokenGrant::RefreshToken { .. } => f
                .debug_struct("RefreshToken")
                .field("refresh_token", &"<redacted>")
                .finish(),
        }
    }
}

impl TokenGrant {
    fn grant_type(&self) -> &'static str {
        match self {
            TokenGrant::Password { .. } => "password",
            TokenGrant::RefreshToken { .. } => "refresh_token",
        }
    }
}

/// Form body of a token request
#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
    scope: &'a str,
}

impl<'a> TokenRequest<'a> {
    fn new(grant: &'a TokenGrant, scope: &'a str) -> Self {
        let mut request = Self {
            grant_type: grant.grant_type(),
            username: None,
            password: None,
            refresh_token: None,
            scope,
        };
        match grant {
            TokenGrant::Password { username, password } => {
                request.username = Some(username.as_str());
                request.password = Some(password.as_str());
            }
            TokenGrant::RefreshToken { refresh_token } => {
                request.refresh_token = Some(refresh_token.as_str());
            }
        }
        request
    }
}

/// Token exchange client for an OpenID Connect identity provider
#[derive(Debug, Clone)]
pub struct OidcClient {
    /// Identity provider base URL
    endpoint: url::Url,
    scope: String,
    http: reqwest::Client,
}

impl OidcClient {
    pub fn new(endpoint: url::Url, scope: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint,
            scope: scope.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Exchange a grant for a token bundle
    ///
    /// Sends a single form-encoded POST to `{endpoint}/openidconnect/token`.
    ///
    /// # Errors
    ///
    /// - [`PhotonError::Transport`] when the request cannot be sent or a
    ///   success response is not a complete token bundle
    /// - [`PhotonError::Provider`] when the provider rejects the grant
    pub async fn exchange(&self, grant: &TokenGrant) -> Result<TokenOptions, PhotonError> {
        let url = self.endpoint.join(TOKEN_PATH)?;
        let form = TokenRequest::new(grant, &self.scope);

        tracing::debug!(
            "Requesting tokens from {} with grant_type={}",
            url,
            grant.grant_type()
        );

        let response = self
            .http
            .post(url.as_str())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send token request: {}", e);
                PhotonError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read token response: {}", e);
            PhotonError::Transport(format!("Failed to read token response: {}", e))
        })?;

        if !status.is_success() {
            tracing::error!("Token request rejected: HTTP {}", status.as_u16());
            let mut provider_error =
                serde_json::from_str::<ProviderError>(&body).unwrap_or_else(|_| ProviderError {
                    error: String::new(),
                    error_description: body.clone(),
                    status: 0,
                });
            if provider_error.error.is_empty() && provider_error.error_description.is_empty() {
                provider_error.error_description = body;
            }
            provider_error.status = status.as_u16();
            return Err(PhotonError::Provider(provider_error));
        }

        let tokens: TokenOptions = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            PhotonError::Transport(format!("Failed to parse token response: {}", e))
        })?;

        tracing::debug!(
            "Received tokens: token_type={}, expires_in={}, refresh_token={}",
            tokens.token_type,
            tokens.expires_in,
            tokens.refresh_token.is_some()
        );
        Ok(tokens)
    }
}
