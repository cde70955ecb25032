//! Photon SDK
//!
//! A Rust client library for the Photon Controller cloud-infrastructure
//! control plane.
//!
//! This SDK provides:
//! - Authentication discovery (`/auth`) and token exchange with the identity provider
//! - JWT claim introspection (subject, groups, expiry) without signature verification
//! - Task handles and polling for long-running operations
//! - Typed wrappers for control-plane resources such as clusters
//!
//! # Example
//!
//! ```no_run
//! use photon_sdk::{parse_token_details, ClusterResizeOperation, PhotonClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PhotonClient::new("https://photon.example.com:9000");
//!
//! // Exchange credentials for tokens
//! let tokens = client
//!     .auth()
//!     .get_tokens_by_password("administrator@esxcloud", "secret")
//!     .await?;
//!
//! // Inspect group membership of the access token
//! let claims = parse_token_details(&tokens.access_token)?;
//! println!("{} is in {:?}", claims.subject, claims.groups);
//!
//! // Call the control plane with the new tokens
//! let client = client.with_tokens(tokens);
//! let task = client
//!     .clusters()
//!     .resize("cluster-1", &ClusterResizeOperation { new_worker_count: 5 })
//!     .await?;
//! client.tasks().wait(&task.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod photon_api;

// Re-export commonly used types and functions
pub use photon_api::{
    auth::AuthApi,
    client::PhotonClient,
    clusters::ClustersApi,
    jwt::{parse_raw_token_details, parse_token_details, Audience, JwtToken},
    oidc::{OidcClient, TokenGrant},
    options::{ClientOptions, DEFAULT_TOKEN_SCOPE},
    resources::{
        AuthInfo, Cluster, ClusterResizeOperation, Entity, Step, Task, TaskState, TokenOptions,
        Vm, Vms,
    },
    tasks::TasksApi,
    types::{ApiError, PhotonError, ProviderError, TaskError, AUTH_DISABLED_MESSAGE},
};
