// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::google::cloud::tasks::v2;
use crate::service::{DEFAULT_API_CLIENT_PATTERN, FakeCloudTasks, TaskKey, TaskRegistry};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Configures a [TasksFaker] before it starts.
///
/// # Example
/// ```no_run
/// # async fn sample() -> anyhow::Result<()> {
/// let faker = cloudtasks_faker::TasksFaker::builder()
///     .with_address("[::1]:0")
///     .with_api_client_pattern("gl-go/")
///     .start()
///     .await?;
/// println!("listening on {}", faker.endpoint());
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    address: String,
    api_client_pattern: String,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:0".to_string(),
            api_client_pattern: DEFAULT_API_CLIENT_PATTERN.to_string(),
        }
    }
}

impl Builder {
    /// Sets the listening address. Use port `0` to pick a free port.
    pub fn with_address<V: Into<String>>(mut self, v: V) -> Self {
        self.address = v.into();
        self
    }

    /// Sets the substring required in the `x-goog-api-client` header.
    pub fn with_api_client_pattern<V: Into<String>>(mut self, v: V) -> Self {
        self.api_client_pattern = v.into();
        self
    }

    /// Binds the listener and starts serving in a background task.
    pub async fn start(self) -> anyhow::Result<TasksFaker> {
        let listener = tokio::net::TcpListener::bind(&self.address).await?;
        let addr = listener.local_addr()?;
        let registry = Arc::new(TaskRegistry::new());
        let service = FakeCloudTasks::new(registry.clone(), self.api_client_pattern);
        let (shutdown, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            let stream = tokio_stream::wrappers::TcpListenerStream::new(listener);
            let result = tonic::transport::Server::builder()
                .add_service(v2::cloud_tasks_server::CloudTasksServer::new(service))
                .serve_with_incoming_shutdown(stream, async {
                    let _ = rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!("CloudTasks fake server stopped: {e}");
            }
        });
        let endpoint = crate::to_uri(addr);
        tracing::info!("CloudTasks fake listening on {endpoint}");

        Ok(TasksFaker {
            registry,
            endpoint,
            next_sequence: AtomicUsize::new(1),
            shutdown: Some(shutdown),
            server: Some(server),
        })
    }
}

/// A local `CloudTasks` server returning registered responses.
///
/// Dropping the faker stops accepting new connections. Use
/// [stop()][TasksFaker::stop] to wait for the server to finish.
#[derive(Debug)]
pub struct TasksFaker {
    registry: Arc<TaskRegistry>,
    endpoint: String,
    next_sequence: AtomicUsize,
    shutdown: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<()>>,
}

impl TasksFaker {
    /// Starts a faker with the default configuration.
    pub async fn start() -> anyhow::Result<Self> {
        Self::builder().start().await
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The URI for clients to connect to, e.g. `http://127.0.0.1:36123`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Shuts down the server and waits for it to finish.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(server) = self.server.take() {
            server.await?;
        }
        Ok(())
    }

    /// Registers the outcome of the next call without an assigned response.
    ///
    /// The first call to this function registers a response for call #1, the
    /// second for call #2, and so on. The counter is independent of
    /// [add_response_at()][Self::add_response_at].
    pub fn add_response(&self, outcome: tonic::Result<v2::Task>) {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        self.add_response_at(sequence, outcome);
    }

    /// Registers the outcome of the `sequence`-th `CreateTask` call (1-based).
    ///
    /// Calls that reach the fake count, even if they consume a response
    /// registered for their task name.
    pub fn add_response_at(&self, sequence: usize, outcome: tonic::Result<v2::Task>) {
        self.registry.register(TaskKey::Sequence(sequence), outcome);
    }

    /// Registers an outcome for the next call creating a task named `name`.
    ///
    /// Registering the same name several times queues the outcomes: the
    /// first call gets the first outcome, and so on.
    pub fn add_response_for_task<V: Into<String>>(
        &self,
        name: V,
        outcome: tonic::Result<v2::Task>,
    ) {
        self.registry.register(TaskKey::Name(name.into()), outcome);
    }

    /// The number of `CreateTask` calls that passed validation.
    pub fn create_task_call_count(&self) -> usize {
        self.registry.call_count()
    }

    /// The `index`-th (0-based) recorded `CreateTask` request.
    pub fn create_task_request(
        &self,
        index: usize,
    ) -> faker_registry::Result<v2::CreateTaskRequest> {
        self.registry.recorded(index).map(|r| r.into_request())
    }

    /// All the recorded `CreateTask` requests, in arrival order.
    pub fn create_task_requests(&self) -> Vec<v2::CreateTaskRequest> {
        self.registry
            .recorded_requests()
            .into_iter()
            .map(|r| r.into_request())
            .collect()
    }

    /// The recorded requests creating a task named `name`, in arrival order.
    pub fn create_task_requests_for(&self, name: &str) -> Vec<v2::CreateTaskRequest> {
        self.registry
            .recorded_matching(|r| r.task.as_ref().is_some_and(|t| t.name == name))
            .into_iter()
            .map(|r| r.into_request())
            .collect()
    }

    /// The number of registered responses consumed for `key`, or in total.
    pub fn responses_consumed(&self, key: Option<&TaskKey>) -> usize {
        self.registry.consumed(key)
    }
}

impl Drop for TasksFaker {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = TasksFaker::builder();
        assert_eq!(builder.address, "127.0.0.1:0");
        assert_eq!(builder.api_client_pattern, DEFAULT_API_CLIENT_PATTERN);

        let builder = builder
            .with_address("[::1]:0")
            .with_api_client_pattern("gl-go/");
        assert_eq!(builder.address, "[::1]:0");
        assert_eq!(builder.api_client_pattern, "gl-go/");
    }

    #[tokio::test]
    async fn registration_counters() -> anyhow::Result<()> {
        let faker = TasksFaker::start().await?;
        assert!(faker.endpoint().starts_with("http://127.0.0.1:"), "{faker:?}");

        faker.add_response(Ok(v2::Task::default()));
        faker.add_response_at(5, Ok(v2::Task::default()));
        faker.add_response(Ok(v2::Task::default()));
        faker.add_response_for_task("t1", Ok(v2::Task::default()));

        let state = &faker.registry;
        assert_eq!(state.pending(), 4);
        assert_eq!(faker.next_sequence.load(Ordering::SeqCst), 3);
        assert_eq!(faker.responses_consumed(None), 0);
        assert_eq!(faker.create_task_call_count(), 0);
        assert!(faker.create_task_request(0).is_err());

        faker.stop().await?;
        Ok(())
    }
}
