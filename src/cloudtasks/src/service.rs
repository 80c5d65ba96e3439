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
use faker_registry::{Error, Registry};
use std::sync::Arc;
use tonic::metadata::MetadataMap;

/// The header carrying the client library fingerprint.
pub const API_CLIENT_HEADER: &str = "x-goog-api-client";

/// The substring the fake expects in [API_CLIENT_HEADER] by default.
pub const DEFAULT_API_CLIENT_PATTERN: &str = "gl-rust/";

/// Identifies the queue of responses a `CreateTask` call may consume.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// Responses for calls where `task.name` is this value.
    Name(String),
    /// Responses for the call with this 1-based sequence number.
    Sequence(usize),
}

impl std::fmt::Display for TaskKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "task name {name:?}"),
            Self::Sequence(n) => write!(f, "CreateTask call #{n}"),
        }
    }
}

pub(crate) type TaskOutcome = tonic::Result<v2::Task>;
pub(crate) type TaskRegistry = Registry<TaskKey, TaskOutcome, v2::CreateTaskRequest>;

#[derive(Debug)]
pub(crate) struct FakeCloudTasks {
    registry: Arc<TaskRegistry>,
    api_client_pattern: String,
}

impl FakeCloudTasks {
    pub(crate) fn new(registry: Arc<TaskRegistry>, api_client_pattern: String) -> Self {
        Self {
            registry,
            api_client_pattern,
        }
    }

    fn check_api_client_header(&self, metadata: &MetadataMap) -> faker_registry::Result<()> {
        let value = metadata.get(API_CLIENT_HEADER).map(|v| v.to_str());
        let message = match value {
            Some(Ok(v)) if v.contains(&self.api_client_pattern) => return Ok(()),
            Some(Ok(v)) => format!(
                "{API_CLIENT_HEADER} = {v:?}, expected {} key",
                self.api_client_pattern
            ),
            Some(Err(_)) => format!("{API_CLIENT_HEADER} is not a valid ASCII string"),
            None => format!(
                "{API_CLIENT_HEADER} is missing, expected {} key",
                self.api_client_pattern
            ),
        };
        Err(Error::PreconditionFailed(message))
    }
}

#[tonic::async_trait]
impl v2::cloud_tasks_server::CloudTasks for FakeCloudTasks {
    async fn create_task(
        &self,
        request: tonic::Request<v2::CreateTaskRequest>,
    ) -> tonic::Result<tonic::Response<v2::Task>> {
        if let Err(e) = self.check_api_client_header(request.metadata()) {
            tracing::warn!("rejecting CreateTask: {e}");
            return Err(tonic::Status::invalid_argument(e.to_string()));
        }
        let request = request.into_inner();
        let Some(task) = request.task.clone() else {
            tracing::warn!("rejecting CreateTask: task is required");
            return Err(tonic::Status::invalid_argument("task is required"));
        };

        let name = TaskKey::Name(task.name.clone());
        let parent = request.parent.clone();
        let (sequence, registered) = self.registry.resolve(request, |responses, record| {
            let sequence = TaskKey::Sequence(record.sequence());
            let registered = responses
                .try_next(&name)
                .or_else(|| responses.try_next(&sequence));
            (record.sequence(), registered)
        });

        match registered {
            Some(outcome) => {
                tracing::debug!(sequence, "CreateTask matched a registered response");
                outcome.map(tonic::Response::new)
            }
            None => {
                tracing::debug!(sequence, "CreateTask returns the default response");
                Ok(tonic::Response::new(default_response(&parent, task)))
            }
        }
    }
}

/// Echoes `task`, naming it `{parent}/tasks/{uuid}` if it has no name.
pub(crate) fn default_response(parent: &str, task: v2::Task) -> v2::Task {
    if !task.name.is_empty() {
        return task;
    }
    v2::Task {
        name: format!("{parent}/tasks/{}", uuid::Uuid::new_v4()),
        ..task
    }
}
