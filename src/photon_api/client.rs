use crate::photon_api::auth::AuthApi;
use crate::photon_api::clusters::ClustersApi;
use crate::photon_api::options::ClientOptions;
use crate::photon_api::resources::TokenOptions;
use crate::photon_api::rest::RestClient;
use crate::photon_api::tasks::TasksApi;
use crate::photon_api::types::PhotonError;

/// HTTP client for the Photon control plane
///
/// Owns the connection pool and configuration; the per-resource APIs
/// (`auth()`, `tasks()`, `clusters()`) borrow it. The client holds no mutable
/// state, so it can be shared across tasks freely.
#[derive(Debug, Clone)]
pub struct PhotonClient {
    /// Control plane base URL, e.g. `https://10.0.0.1:9000`
    endpoint: String,
    options: ClientOptions,
    rest: RestClient,
}

impl PhotonClient {
    /// Create a client with default options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use photon_sdk::PhotonClient;
    ///
    /// let client = PhotonClient::new("https://photon.example.com:9000");
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        tracing::debug!("Creating PhotonClient with endpoint: {}", endpoint);

        Self {
            endpoint: normalize_endpoint(endpoint),
            options: ClientOptions::default(),
            rest: RestClient::new(reqwest::Client::new()),
        }
    }

    /// Create a client with explicit options
    ///
    /// Fails only if the HTTP client cannot be built from the options.
    pub fn with_options(
        endpoint: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, PhotonError> {
        let endpoint = endpoint.into();
        tracing::debug!(
            "Creating PhotonClient with endpoint: {} (ignore_certificate={})",
            endpoint,
            options.ignore_certificate
        );

        let http = options.build_http_client().map_err(|e| {
            PhotonError::Transport(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            endpoint: normalize_endpoint(endpoint),
            options,
            rest: RestClient::new(http),
        })
    }

    /// Use these tokens for subsequent control-plane requests
    pub fn with_tokens(mut self, tokens: TokenOptions) -> Self {
        self.options.token_options = Some(tokens);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn tasks(&self) -> TasksApi<'_> {
        TasksApi::new(self)
    }

    pub fn clusters(&self) -> ClustersApi<'_> {
        ClustersApi::new(self)
    }

    pub(crate) fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

fn normalize_endpoint(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}
