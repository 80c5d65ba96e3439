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

//! A fake for the `google.cloud.tasks.v2.CloudTasks` gRPC service.
//!
//! Use this crate in tests for code that creates Cloud Tasks. Start a local
//! server implementing `CreateTask`, register the responses it should return,
//! point the code under test at the server's endpoint, and then inspect the
//! requests the server received.
//!
//! Each `CreateTask` call is matched, in order, against:
//! 1. the responses registered for the task name in the request,
//! 2. the responses registered for the call's 1-based sequence number,
//! 3. a default response echoing the task in the request. If the task has no
//!    name the default response gets `{parent}/tasks/{uuid}`.
//!
//! # Example
//! ```no_run
//! use cloudtasks_faker::{TasksFaker, google::cloud::tasks::v2};
//! use cloudtasks_faker::google::cloud::tasks::v2::cloud_tasks_client::CloudTasksClient;
//!
//! # async fn test() -> anyhow::Result<()> {
//! let faker = TasksFaker::start().await?;
//! faker.add_response_for_task(
//!     "projects/p/locations/l/queues/q/tasks/t1",
//!     Err(tonic::Status::already_exists("task exists")),
//! );
//!
//! let mut client = CloudTasksClient::connect(faker.endpoint().to_string()).await?;
//! let request = v2::CreateTaskRequest {
//!     parent: "projects/p/locations/l/queues/q".into(),
//!     task: Some(v2::Task {
//!         name: "projects/p/locations/l/queues/q/tasks/t1".into(),
//!         ..v2::Task::default()
//!     }),
//!     ..v2::CreateTaskRequest::default()
//! };
//! let status = client
//!     .create_task(cloudtasks_faker::with_api_client_header(request))
//!     .await
//!     .unwrap_err();
//! assert_eq!(status.code(), tonic::Code::AlreadyExists);
//! assert_eq!(faker.create_task_call_count(), 1);
//! faker.stop().await?;
//! # Ok(()) }
//! ```

mod faker;
mod service;

pub use faker::{Builder, TasksFaker};
pub use service::{API_CLIENT_HEADER, DEFAULT_API_CLIENT_PATTERN, TaskKey};

use std::net::SocketAddr;

/// Wraps `message` in a request with a conforming `x-goog-api-client` header.
///
/// The fake rejects requests without the header, as the service does. The
/// Rust client libraries set it automatically; use this function in tests that
/// call the fake with the raw generated client.
pub fn with_api_client_header<T>(message: T) -> tonic::Request<T> {
    let mut request = tonic::Request::new(message);
    request.metadata_mut().insert(
        API_CLIENT_HEADER,
        tonic::metadata::MetadataValue::from_static("gl-rust/1.85.0 gax/1.0.0 grpc/1.0.0-tonic"),
    );
    request
}

fn to_uri(addr: SocketAddr) -> String {
    if addr.is_ipv6() {
        format!("http://[{}]:{}", addr.ip(), addr.port())
    } else {
        format!("http://{}:{}", addr.ip(), addr.port())
    }
}

#[allow(clippy::large_enum_variant)]
pub mod google {
    pub mod cloud {
        pub mod tasks {
            pub mod v2 {
                include!("generated/protos/google.cloud.tasks.v2.rs");
            }
        }
    }
    pub mod rpc {
        include!("generated/protos/google.rpc.rs");
    }
}
