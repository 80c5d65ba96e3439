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

use cloudtasks_faker::google::cloud::tasks::v2;
use cloudtasks_faker::google::cloud::tasks::v2::cloud_tasks_client::CloudTasksClient;
use cloudtasks_faker::{TaskKey, TasksFaker, with_api_client_header};
use faker_registry::Error;
use faker_test_utils::resource_names::{random_queue_name, random_task_name};
use faker_test_utils::tracing::enable_tracing;
use pretty_assertions::assert_eq;
use tonic::transport::Channel;

type Client = CloudTasksClient<Channel>;

async fn client(faker: &TasksFaker) -> anyhow::Result<Client> {
    Ok(CloudTasksClient::connect(faker.endpoint().to_string()).await?)
}

fn request(parent: &str, name: &str) -> v2::CreateTaskRequest {
    v2::CreateTaskRequest {
        parent: parent.to_string(),
        task: Some(v2::Task {
            name: name.to_string(),
            message_type: Some(v2::task::MessageType::HttpRequest(v2::HttpRequest {
                url: "https://example.com/handler".into(),
                http_method: v2::HttpMethod::Post as i32,
                body: b"payload".to_vec(),
                ..v2::HttpRequest::default()
            })),
            ..v2::Task::default()
        }),
        ..v2::CreateTaskRequest::default()
    }
}

fn response(name: &str, dispatch_count: i32) -> v2::Task {
    v2::Task {
        name: name.to_string(),
        dispatch_count,
        create_time: Some(prost_types::Timestamp {
            seconds: 1_700_000_000,
            nanos: 0,
        }),
        ..v2::Task::default()
    }
}

#[tokio::test]
async fn registered_in_order() -> anyhow::Result<()> {
    let _guard = enable_tracing();
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");

    faker.add_response(Ok(response("first", 1)));
    faker.add_response(Ok(response("second", 2)));

    let got = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?;
    assert_eq!(got.into_inner(), response("first", 1));
    let got = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?;
    assert_eq!(got.into_inner(), response("second", 2));

    assert_eq!(faker.create_task_call_count(), 2);
    assert_eq!(faker.responses_consumed(None), 2);
    assert_eq!(faker.create_task_request(1)?, request(&queue, ""));
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn default_response_echoes_named_task() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");
    let name = random_task_name(&queue);

    let want = request(&queue, &name);
    let got = client
        .create_task(with_api_client_header(want.clone()))
        .await?;
    assert_eq!(Some(got.into_inner()), want.task);
    assert_eq!(faker.responses_consumed(None), 0);
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn default_response_generates_name() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");

    let first = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?
        .into_inner();
    let second = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?
        .into_inner();
    let prefix = format!("{queue}/tasks/");
    for got in [&first, &second] {
        let id = got
            .name
            .strip_prefix(&prefix)
            .unwrap_or_else(|| panic!("{got:?} should start with {prefix}"));
        let _ = uuid::Uuid::parse_str(id)?;
        let want = request(&queue, "").task.and_then(|t| t.message_type);
        assert_eq!(got.message_type, want);
    }
    assert_ne!(first.name, second.name);
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn name_takes_precedence() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");
    let name = random_task_name(&queue);

    faker.add_response_at(1, Ok(response("by-sequence", 1)));
    faker.add_response_for_task(&name, Ok(response("by-name", 1)));

    let got = client
        .create_task(with_api_client_header(request(&queue, &name)))
        .await?;
    assert_eq!(got.into_inner(), response("by-name", 1));
    assert_eq!(faker.responses_consumed(Some(&TaskKey::Sequence(1))), 0);
    assert_eq!(faker.responses_consumed(Some(&TaskKey::Name(name.clone()))), 1);
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn registered_error() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");
    let name = random_task_name(&queue);

    faker.add_response_for_task(&name, Err(tonic::Status::already_exists("duplicate task")));

    let status = client
        .create_task(with_api_client_header(request(&queue, &name)))
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::AlreadyExists);
    assert_eq!(status.message(), "duplicate task");
    assert_eq!(faker.create_task_call_count(), 1);

    // The queue for the name is exhausted, the default response follows.
    let got = client
        .create_task(with_api_client_header(request(&queue, &name)))
        .await?;
    assert_eq!(got.into_inner().name, name);
    assert_eq!(faker.create_task_requests_for(&name).len(), 2);
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn missing_header_not_recorded() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");
    faker.add_response(Ok(response("first", 1)));

    let status = client
        .create_task(tonic::Request::new(request(&queue, "")))
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert_eq!(faker.create_task_call_count(), 0);

    // The rejected call does not consume the sequence number.
    let got = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?;
    assert_eq!(got.into_inner(), response("first", 1));
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn missing_task() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");

    let status = client
        .create_task(with_api_client_header(v2::CreateTaskRequest {
            parent: queue,
            ..v2::CreateTaskRequest::default()
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert_eq!(faker.create_task_call_count(), 0);
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn request_out_of_range() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");

    let _ = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?;
    assert_eq!(faker.create_task_request(0)?, request(&queue, ""));
    let err = faker.create_task_request(1).unwrap_err();
    assert_eq!(err, Error::OutOfRange { index: 1, len: 1 });
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn custom_api_client_pattern() -> anyhow::Result<()> {
    let faker = TasksFaker::builder()
        .with_api_client_pattern("gl-go/")
        .start()
        .await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");

    // The Rust fingerprint does not match a Go pattern.
    let status = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);

    let mut go = tonic::Request::new(request(&queue, ""));
    go.metadata_mut()
        .insert(cloudtasks_faker::API_CLIENT_HEADER, "gl-go/1.22.0 gccl/2.3.0".parse()?);
    let _ = client.create_task(go).await?;
    assert_eq!(faker.create_task_call_count(), 1);
    faker.stop().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers() -> anyhow::Result<()> {
    const CALLERS: i32 = 32;
    let faker = TasksFaker::start().await?;
    let client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");
    for i in 1..=CALLERS {
        faker.add_response(Ok(response("sequenced", i)));
    }

    let handles = (0..CALLERS)
        .map(|caller| {
            let mut client = client.clone();
            let mut request = request(&queue, "");
            if let Some(v2::task::MessageType::HttpRequest(http)) = request
                .task
                .as_mut()
                .and_then(|t| t.message_type.as_mut())
            {
                http.body = format!("caller-{caller}").into_bytes();
            }
            tokio::spawn(async move {
                let got = client
                    .create_task(with_api_client_header(request.clone()))
                    .await?;
                Ok::<_, tonic::Status>((got.into_inner().dispatch_count, request))
            })
        })
        .collect::<Vec<_>>();
    let mut got = Vec::new();
    for h in handles {
        got.push(h.await??);
    }

    // The request recorded at position i consumed the response for call #i+1.
    for (dispatch_count, sent) in &got {
        let recorded = faker.create_task_request(*dispatch_count as usize - 1)?;
        assert_eq!(&recorded, sent);
    }

    // Each registered response is delivered exactly once.
    let mut counts = got.iter().map(|(c, _)| *c).collect::<Vec<_>>();
    counts.sort();
    assert_eq!(counts, (1..=CALLERS).collect::<Vec<_>>());
    assert_eq!(faker.create_task_call_count(), CALLERS as usize);
    assert_eq!(faker.responses_consumed(None), CALLERS as usize);
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn mixed_scenario() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");
    let a = format!("{queue}/tasks/A");
    let b = format!("{queue}/tasks/B");

    faker.add_response_for_task(&a, Ok(response(&a, 10)));
    faker.add_response_at(2, Err(tonic::Status::unavailable("try again")));

    // Call #1 matches the name.
    let got = client
        .create_task(with_api_client_header(request(&queue, &a)))
        .await?;
    assert_eq!(got.into_inner(), response(&a, 10));
    // Call #2 has no name match, it gets the sequence response.
    let status = client
        .create_task(with_api_client_header(request(&queue, &b)))
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unavailable);
    // Call #3 has nothing registered.
    let got = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?;
    assert!(got.into_inner().name.starts_with(&format!("{queue}/tasks/")));

    let names = faker
        .create_task_requests()
        .into_iter()
        .map(|r| r.task.map(|t| t.name).unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(names, vec![a.clone(), b.clone(), String::new()]);
    assert_eq!(faker.create_task_requests_for(&a).len(), 1);
    assert_eq!(faker.responses_consumed(None), 2);
    faker.stop().await?;
    Ok(())
}

#[tokio::test]
async fn end_to_end() -> anyhow::Result<()> {
    let faker = TasksFaker::start().await?;
    let mut client = client(&faker).await?;
    let queue = random_queue_name("test-project", "us-central1");
    faker.add_response_for_task("A", Ok(response("A-registered", 42)));

    let got = client
        .create_task(with_api_client_header(request(&queue, "A")))
        .await?;
    assert_eq!(got.into_inner(), response("A-registered", 42));
    let got = client
        .create_task(with_api_client_header(request(&queue, "B")))
        .await?;
    assert_eq!(Some(got.into_inner()), request(&queue, "B").task);
    let got = client
        .create_task(with_api_client_header(request(&queue, "")))
        .await?
        .into_inner();
    let id = got
        .name
        .strip_prefix(&format!("{queue}/tasks/"))
        .unwrap_or_else(|| panic!("unexpected name in {got:?}"));
    assert!(!id.is_empty(), "{got:?}");

    assert_eq!(faker.create_task_call_count(), 3);
    faker.stop().await?;
    Ok(())
}
