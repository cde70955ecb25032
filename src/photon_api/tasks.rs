use crate::photon_api::client::PhotonClient;
use crate::photon_api::resources::{Task, TaskState};
use crate::photon_api::rest::decode_json;
use crate::photon_api::types::{PhotonError, TaskError};

const TASK_PATH: &str = "/tasks/";

/// Tasks API
#[derive(Debug, Clone, Copy)]
pub struct TasksApi<'a> {
    client: &'a PhotonClient,
}

impl<'a> TasksApi<'a> {
    pub(crate) fn new(client: &'a PhotonClient) -> Self {
        Self { client }
    }

    /// Get a task by ID
    pub async fn get(&self, id: &str) -> Result<Task, PhotonError> {
        let url = self.client.url(&format!("{}{}", TASK_PATH, id));
        let response = self
            .client
            .rest()
            .get(&url, self.client.options().access_token())
            .await?;
        decode_json(response).await
    }

    /// Poll a task until it completes or fails
    ///
    /// Polls every `task_poll_delay` and gives up after `task_poll_timeout`.
    /// A task ending in `ERROR` is returned as [`PhotonError::Task`].
    pub async fn wait(&self, id: &str) -> Result<Task, PhotonError> {
        let options = self.client.options();

        match tokio::time::timeout(options.task_poll_timeout, self.poll_until_terminal(id)).await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Timed out waiting for task {}", id);
                Err(PhotonError::TaskTimeout {
                    task_id: id.to_string(),
                })
            }
        }
    }

    async fn poll_until_terminal(&self, id: &str) -> Result<Task, PhotonError> {
        loop {
            let task = self.get(id).await?;
            tracing::debug!("Task {} is {:?}", id, task.state);

            match task.state {
                TaskState::Completed => return Ok(task),
                TaskState::Error => return Err(task_failure(&task)),
                _ => tokio::time::sleep(self.client.options().task_poll_delay).await,
            }
        }
    }
}

/// Decode a task returned by a mutating call; a task already in ERROR is a failure
pub(crate) async fn decode_task(response: reqwest::Response) -> Result<Task, PhotonError> {
    let task: Task = decode_json(response).await?;
    if task.state == TaskState::Error {
        tracing::error!("Task {} failed on submission", task.id);
        return Err(task_failure(&task));
    }
    Ok(task)
}

fn task_failure(task: &Task) -> PhotonError {
    let errors = task
        .steps
        .iter()
        .flat_map(|step| step.errors.iter().cloned())
        .collect();

    PhotonError::Task(TaskError {
        task_id: task.id.clone(),
        errors,
    })
}
