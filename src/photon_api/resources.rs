use crate::photon_api::types::PhotonError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Authentication configuration reported by the control plane at `/auth`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthInfo {
    pub enabled: bool,
    /// Identity provider host
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub port: u16,
}

fn is_zero(port: &u16) -> bool {
    *port == 0
}

impl AuthInfo {
    /// Base URL of the identity provider, e.g. `https://lightwave.local:443`
    pub fn identity_provider_url(&self, scheme: &str) -> Result<url::Url, PhotonError> {
        if self.endpoint.is_empty() {
            return Err(PhotonError::Transport(
                "Auth info does not include an identity provider endpoint".to_string(),
            ));
        }

        let raw = if self.port == 0 {
            format!("{}://{}", scheme, self.endpoint)
        } else {
            format!("{}://{}:{}", scheme, self.endpoint, self.port)
        };
        Ok(url::Url::parse(&raw)?)
    }
}

/// Token bundle issued by the identity provider
///
/// Only ever built from a complete provider response; every field except
/// `refresh_token` is required when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOptions {
    pub access_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub id_token: String,
    pub token_type: String,
}

impl TokenOptions {
    /// Value for the `Authorization` header of control-plane requests
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Lifecycle state of an asynchronous task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Queued,
    Started,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// True once the task will not change state again
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Error)
    }
}

/// Entity a task operates on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub kind: String,
}

/// Single step of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub sequence: i32,
    pub state: TaskState,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub errors: Vec<crate::photon_api::types::ApiError>,
    #[serde(default)]
    pub warnings: Vec<crate::photon_api::types::ApiError>,
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub queued_time: i64,
    #[serde(default)]
    pub end_time: i64,
}

/// Handle for a long-running control-plane operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub state: TaskState,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub entity: Entity,
    /// Milliseconds since the unix epoch
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub queued_time: i64,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub resource_properties: Option<serde_json::Value>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Task {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.start_time)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.end_time)
    }
}

fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    Utc.timestamp_millis_opt(millis).single()
}

// Extended property keys used when creating clusters
pub const EXTENDED_PROPERTY_DNS: &str = "dns";
pub const EXTENDED_PROPERTY_GATEWAY: &str = "gateway";
pub const EXTENDED_PROPERTY_NETMASK: &str = "netmask";
pub const EXTENDED_PROPERTY_MASTER_IP: &str = "master_ip";
pub const EXTENDED_PROPERTY_CONTAINER_NETWORK: &str = "container_network";
pub const EXTENDED_PROPERTY_ZOOKEEPER_IP1: &str = "zookeeper_ip1";
pub const EXTENDED_PROPERTY_ZOOKEEPER_IP2: &str = "zookeeper_ip2";
pub const EXTENDED_PROPERTY_ZOOKEEPER_IP3: &str = "zookeeper_ip3";
pub const EXTENDED_PROPERTY_ETCD_IP1: &str = "etcd_ip1";
pub const EXTENDED_PROPERTY_ETCD_IP2: &str = "etcd_ip2";
pub const EXTENDED_PROPERTY_ETCD_IP3: &str = "etcd_ip3";
pub const EXTENDED_PROPERTY_SSH_KEY: &str = "ssh_key";

/// Cluster resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: String,
    pub state: String,
    #[serde(default)]
    pub worker_count: i32,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub extended_properties: HashMap<String, String>,
}

/// Request body for resizing a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResizeOperation {
    pub new_worker_count: i32,
}

/// Virtual machine resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vm {
    pub id: String,
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub flavor: String,
    #[serde(default)]
    pub source_image_id: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub datastore: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub self_link: Option<String>,
}

/// Collection of VMs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vms {
    pub items: Vec<Vm>,
}

/// One page of a paged collection
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_link: Option<String>,
}
