/// Photon control-plane API module
///
/// This module provides the client for the Photon control plane, including
/// endpoint authentication discovery, token exchange with the identity
/// provider, JWT claim introspection, and task handles.
///
/// ## Authentication Flow
///
/// 1. Caller asks `AuthApi` for tokens (password or refresh-token grant)
/// 2. SDK reads `/auth` from the control plane
/// 3. If authentication is disabled the call fails without contacting anyone else
/// 4. Otherwise the grant is posted to the identity provider named in `/auth`
/// 5. The token bundle is handed to the caller; the SDK keeps no copy
pub mod auth;
pub mod client;
pub mod clusters;
pub mod jwt;
pub mod oidc;
pub mod options;
pub mod resources;
mod rest;
pub mod tasks;
pub mod types;

pub use auth::AuthApi;
pub use client::PhotonClient;
pub use clusters::ClustersApi;
pub use jwt::{parse_raw_token_details, parse_token_details, JwtToken};
pub use oidc::{OidcClient, TokenGrant};
pub use options::ClientOptions;
pub use resources::{AuthInfo, Task, TaskState, TokenOptions};
pub use tasks::TasksApi;
pub use types::{ApiError, PhotonError, ProviderError, TaskError};
