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

use crate::model::{AclRule, Object};
use crate::transport::{RequestKey, Transport, TransportRegistry};
use crate::{FakeResponse, Result, samples};
use faker_registry::FailureMode;
use http::{HeaderMap, Method};
use std::sync::Arc;

/// The default endpoint for the Cloud Storage JSON API.
pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";

/// Configures a [StorageFaker].
#[derive(Clone, Debug)]
pub struct Builder {
    base_url: String,
    failure_mode: FailureMode,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            failure_mode: FailureMode::Panic,
        }
    }
}

impl Builder {
    /// Changes the endpoint used by the `add_*_object_*` helpers.
    pub fn with_base_url<V: Into<String>>(mut self, v: V) -> Self {
        self.base_url = v.into().trim_end_matches('/').to_string();
        self
    }

    /// Changes how unregistered requests are reported.
    pub fn with_failure_mode(mut self, v: FailureMode) -> Self {
        self.failure_mode = v;
        self
    }

    pub fn build(self) -> StorageFaker {
        let registry = Arc::new(TransportRegistry::new());
        StorageFaker {
            transport: Transport::new(registry.clone(), self.failure_mode),
            registry,
            base_url: self.base_url,
        }
    }
}

/// Registers canned Cloud Storage responses and serves them through a
/// [Transport].
///
/// Responses are matched by URL and method. Registering several responses
/// for the same URL and method returns them in registration order.
///
/// # Example
/// ```
/// use storage_faker::{FakeResponse, StorageFaker};
/// # fn sample() -> anyhow::Result<()> {
/// let faker = StorageFaker::new();
/// faker.add_get_object_response("my-bucket", "hello.txt", FakeResponse::ok().with_body("hello"));
///
/// let request = http::Request::get("https://storage.googleapis.com/my-bucket/hello.txt").body(())?;
/// let response = faker.transport().round_trip(&request)?;
/// assert_eq!(response.body().as_ref(), b"hello");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct StorageFaker {
    registry: Arc<TransportRegistry>,
    transport: Transport,
    base_url: String,
}

impl Default for StorageFaker {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageFaker {
    /// A faker that panics on requests without a registered response.
    ///
    /// Use it inside tests, the panic fails the test at the offending
    /// request.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// A faker that returns an error on requests without a registered
    /// response.
    pub fn without_testing() -> Self {
        Self::builder()
            .with_failure_mode(FailureMode::Return)
            .build()
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The transport to give to the code under test.
    pub fn transport(&self) -> Transport {
        self.transport.clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers `response` for the next `method` request to `url`.
    pub fn add_response<U: Into<String>>(&self, url: U, method: Method, response: FakeResponse) {
        self.registry
            .register(RequestKey::new(url, method.as_str()), Ok(response));
    }

    /// Registers a transport error for the next `method` request to `url`.
    pub fn add_error<U, M>(&self, url: U, method: Method, message: M)
    where
        U: Into<String>,
        M: Into<String>,
    {
        self.registry
            .register(RequestKey::new(url, method.as_str()), Err(message.into()));
    }

    /// Registers the response to a download of `object`.
    pub fn add_get_object_response(&self, bucket: &str, object: &str, response: FakeResponse) {
        let url = format!("{}/{bucket}/{object}", self.base_url);
        self.add_response(url, Method::GET, response);
    }

    /// Registers the response to a (multipart) upload of `object`.
    pub fn add_insert_object_response(&self, bucket: &str, object: &str, response: FakeResponse) {
        let url = format!(
            "{}/upload/storage/v1/b/{bucket}/o?alt=json&name={object}&prettyPrint=false&projection=full&uploadType=multipart",
            self.base_url
        );
        self.add_response(url, Method::POST, response);
    }

    /// Registers a successful upload of `object`, returning `resource`.
    pub fn add_insert_object_ok_response(
        &self,
        bucket: &str,
        object: &str,
        resource: &Object,
    ) -> Result<()> {
        self.add_insert_object_ok_response_with_headers(bucket, object, resource, HeaderMap::new())
    }

    /// Like [add_insert_object_ok_response()][Self::add_insert_object_ok_response],
    /// adding `headers` to the response.
    pub fn add_insert_object_ok_response_with_headers(
        &self,
        bucket: &str,
        object: &str,
        resource: &Object,
        headers: HeaderMap,
    ) -> Result<()> {
        let response = FakeResponse::json(resource)?.with_headers(headers);
        self.add_insert_object_response(bucket, object, response);
        Ok(())
    }

    /// Registers the response to listing the ACL of `object`.
    pub fn add_list_object_acl_response(&self, bucket: &str, object: &str, response: FakeResponse) {
        let url = format!(
            "{}/storage/v1/b/{bucket}/o/{object}/acl?alt=json&prettyPrint=false",
            self.base_url
        );
        self.add_response(url, Method::GET, response);
    }

    /// Registers a successful ACL list of `object`, containing `rules`.
    pub fn add_list_object_acl_ok_response(
        &self,
        bucket: &str,
        object: &str,
        rules: &[AclRule],
    ) -> Result<()> {
        let response = samples::list_object_acl_ok_response(bucket, object, rules)?;
        self.add_list_object_acl_response(bucket, object, response);
        Ok(())
    }

    /// Registers the response to a metadata update of `object`.
    pub fn add_update_object_response(&self, bucket: &str, object: &str, response: FakeResponse) {
        let url = format!(
            "{}/storage/v1/b/{bucket}/o/{object}?alt=json&prettyPrint=false&projection=full",
            self.base_url
        );
        self.add_response(url, Method::PATCH, response);
    }

    /// Registers a successful metadata update of `object`, returning
    /// `resource`.
    pub fn add_update_object_ok_response(
        &self,
        bucket: &str,
        object: &str,
        resource: &Object,
    ) -> Result<()> {
        let response = FakeResponse::json(resource)?;
        self.add_update_object_response(bucket, object, response);
        Ok(())
    }

    /// Registers a successful metadata update of `object`, when the test
    /// does not look at the resulting object.
    pub fn add_update_object_simple_ok_response(&self, bucket: &str, object: &str) -> Result<()> {
        let response = samples::simple_update_object_ok_response(bucket, object)?;
        self.add_update_object_response(bucket, object, response);
        Ok(())
    }

    /// The number of `method` requests to `url` that got a response.
    pub fn request_count(&self, url: &str, method: Method) -> usize {
        self.registry
            .consumed(Some(&RequestKey::new(url, method.as_str())))
    }

    /// The number of requests received, including unmatched requests.
    pub fn total_request_count(&self) -> usize {
        self.registry.call_count()
    }

    /// The number of registered responses not returned yet.
    pub fn pending_responses(&self) -> usize {
        self.registry.pending()
    }
}
