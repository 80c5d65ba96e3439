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

use faker_test_utils::resource_names::random_bucket_id;
use faker_test_utils::tracing::enable_tracing;
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use storage_faker::{FakeResponse, StorageFaker, samples};

#[tokio::test]
async fn serves_registered_responses() -> anyhow::Result<()> {
    let _guard = enable_tracing();
    let faker = StorageFaker::new();
    let bucket = random_bucket_id();
    faker.add_get_object_response(&bucket, "hello.txt", samples::get_object_ok_response_sample());
    faker.add_get_object_response(
        &bucket,
        "hello.txt",
        FakeResponse::new(StatusCode::NOT_FOUND).with_body("No such object"),
    );
    let (endpoint, _server) = faker.start().await?;

    let client = reqwest::Client::new();
    let url = format!("{endpoint}/{bucket}/hello.txt");
    let response = client.get(&url).send().await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-goog-generation")
            .and_then(|v| v.to_str().ok()),
        Some("1569837707444808")
    );
    assert_eq!(response.text().await?, r#"{"message":"Hello Hoge"}"#);

    let response = client.get(&url).send().await?;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(response.text().await?, "No such object");
    let registered = format!("https://storage.googleapis.com/{bucket}/hello.txt");
    assert_eq!(faker.request_count(&registered, Method::GET), 2);
    Ok(())
}

#[tokio::test]
async fn query_is_part_of_the_key() -> anyhow::Result<()> {
    let faker = StorageFaker::new();
    let bucket = random_bucket_id();
    faker.add_update_object_simple_ok_response(&bucket, "hello.txt")?;
    let (endpoint, _server) = faker.start().await?;

    let client = reqwest::Client::new();
    let path = format!("storage/v1/b/{bucket}/o/hello.txt");
    // Different query parameter order, no match.
    let response = client
        .patch(format!("{endpoint}/{path}?prettyPrint=false&alt=json&projection=full"))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text().await?;
    assert!(text.contains("response is not registered"), "{text}");

    let response = client
        .patch(format!("{endpoint}/{path}?alt=json&prettyPrint=false&projection=full"))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.bytes().await?;
    let got = serde_json::from_slice::<storage_faker::model::Object>(&body)?;
    assert_eq!(got.bucket, bucket);
    Ok(())
}

#[tokio::test]
async fn registered_error() -> anyhow::Result<()> {
    let faker = StorageFaker::builder()
        .with_base_url("https://storage.example.com")
        .build();
    faker.add_error("https://storage.example.com/b/o", Method::DELETE, "backend unavailable");
    let (endpoint, _server) = faker.start().await?;

    let response = reqwest::Client::new()
        .delete(format!("{endpoint}/b/o"))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text().await?;
    assert!(text.contains("backend unavailable"), "{text}");
    assert_eq!(faker.total_request_count(), 1);
    Ok(())
}
