use crate::photon_api::client::PhotonClient;
use crate::photon_api::resources::{Cluster, ClusterResizeOperation, Task, Vm, Vms};
use crate::photon_api::rest::decode_json;
use crate::photon_api::tasks::decode_task;
use crate::photon_api::types::PhotonError;

const CLUSTER_PATH: &str = "/clusters/";

/// Clusters API
///
/// Mutating calls return a [`Task`]; use [`crate::TasksApi::wait`] to block on it.
#[derive(Debug, Clone, Copy)]
pub struct ClustersApi<'a> {
    client: &'a PhotonClient,
}

impl<'a> ClustersApi<'a> {
    pub(crate) fn new(client: &'a PhotonClient) -> Self {
        Self { client }
    }

    fn cluster_url(&self, id: &str) -> String {
        self.client.url(&format!("{}{}", CLUSTER_PATH, id))
    }

    /// Get a cluster by ID
    pub async fn get(&self, id: &str) -> Result<Cluster, PhotonError> {
        let response = self
            .client
            .rest()
            .get(&self.cluster_url(id), self.client.options().access_token())
            .await?;
        decode_json(response).await
    }

    /// Delete a cluster
    pub async fn delete(&self, id: &str) -> Result<Task, PhotonError> {
        tracing::debug!("Deleting cluster {}", id);
        let response = self
            .client
            .rest()
            .delete(&self.cluster_url(id), self.client.options().access_token())
            .await?;
        decode_task(response).await
    }

    /// List every VM of a cluster, across all pages
    pub async fn get_vms(&self, id: &str) -> Result<Vms, PhotonError> {
        let url = format!("{}/vms", self.cluster_url(id));
        let items: Vec<Vm> = self
            .client
            .rest()
            .get_list(
                self.client.endpoint(),
                &url,
                self.client.options().access_token(),
            )
            .await?;
        Ok(Vms { items })
    }

    /// Resize a cluster to the requested worker count
    pub async fn resize(
        &self,
        id: &str,
        resize: &ClusterResizeOperation,
    ) -> Result<Task, PhotonError> {
        tracing::debug!(
            "Resizing cluster {} to {} workers",
            id,
            resize.new_worker_count
        );
        let url = format!("{}/resize", self.cluster_url(id));
        let response = self
            .client
            .rest()
            .post_json(&url, resize, self.client.options().access_token())
            .await?;
        decode_task(response).await
    }
}
