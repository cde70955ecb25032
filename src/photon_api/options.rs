use crate::photon_api::resources::TokenOptions;
use std::time::Duration;

/// Default OIDC scope requested from the identity provider
pub const DEFAULT_TOKEN_SCOPE: &str = "openid offline_access rs_esxcloud at_groups";

/// Client configuration
///
/// Controls how the SDK talks to the control plane and the identity provider.
/// All transport timeouts are owned by the underlying HTTP client; the SDK itself
/// never retries a request.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Tokens attached as a bearer credential to control-plane requests
    pub token_options: Option<TokenOptions>,

    /// Accept invalid TLS certificates (self-signed lab deployments only)
    pub ignore_certificate: bool,

    /// Per-request timeout handed to the HTTP client
    pub request_timeout: Option<Duration>,

    /// Delay between task polls. Default: 100ms
    pub task_poll_delay: Duration,

    /// Give up waiting for a task after this long. Default: 30 minutes
    pub task_poll_timeout: Duration,

    /// Scheme used to reach the identity provider. Default: `https`
    pub auth_scheme: String,

    /// Scope requested with every token grant
    pub token_scope: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            token_options: None,
            ignore_certificate: false,
            request_timeout: None,
            task_poll_delay: Duration::from_millis(100),
            task_poll_timeout: Duration::from_secs(30 * 60),
            auth_scheme: "https".to_string(),
            token_scope: DEFAULT_TOKEN_SCOPE.to_string(),
        }
    }
}

impl ClientOptions {
    /// Create a new ClientOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bearer tokens (builder pattern)
    pub fn with_token_options(mut self, tokens: TokenOptions) -> Self {
        self.token_options = Some(tokens);
        self
    }

    /// Accept invalid certificates (builder pattern)
    pub fn with_ignore_certificate(mut self, ignore: bool) -> Self {
        self.ignore_certificate = ignore;
        self
    }

    /// Set request timeout (builder pattern)
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set task poll delay (builder pattern)
    pub fn with_task_poll_delay(mut self, delay: Duration) -> Self {
        self.task_poll_delay = delay;
        self
    }

    /// Set task poll timeout (builder pattern)
    pub fn with_task_poll_timeout(mut self, timeout: Duration) -> Self {
        self.task_poll_timeout = timeout;
        self
    }

    /// Set identity provider scheme (builder pattern)
    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    /// Set token scope (builder pattern)
    pub fn with_token_scope(mut self, scope: impl Into<String>) -> Self {
        self.token_scope = scope.into();
        self
    }

    /// Bearer credential for control-plane requests, if tokens are configured
    pub(crate) fn access_token(&self) -> Option<&str> {
        self.token_options
            .as_ref()
            .map(|tokens| tokens.access_token.as_str())
    }

    /// Build the HTTP client described by these options
    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(self.ignore_certificate);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}
