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

use crate::{Error, FakeResponse, Result};
use bytes::Bytes;
use faker_registry::{FailureMode, Registry};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Identifies the responses for a request: the exact URL and the method.
///
/// The method is compared case-insensitively, the URL is compared verbatim,
/// including the order of the query parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestKey {
    url: String,
    method: String,
}

impl RequestKey {
    pub fn new<U: Into<String>>(url: U, method: &str) -> Self {
        Self {
            url: url.into(),
            method: method.to_ascii_uppercase(),
        }
    }

    /// The key for an HTTP request, using the request's full URI.
    pub fn from_request<B>(request: &http::Request<B>) -> Self {
        Self::new(request.uri().to_string(), request.method().as_str())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The method, in uppercase.
    pub fn method(&self) -> &str {
        &self.method
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.method, self.url)
    }
}

pub(crate) type Outcome = std::result::Result<FakeResponse, String>;
pub(crate) type TransportRegistry = Registry<RequestKey, Outcome>;

/// Answers HTTP requests with the responses registered in a
/// [StorageFaker][crate::StorageFaker].
///
/// Clones share the registered responses. Use it directly with
/// [round_trip()][Transport::round_trip], or as a [tower::Service].
#[derive(Clone, Debug)]
pub struct Transport {
    registry: Arc<TransportRegistry>,
    failure_mode: FailureMode,
}

impl Transport {
    pub(crate) fn new(registry: Arc<TransportRegistry>, failure_mode: FailureMode) -> Self {
        Self {
            registry,
            failure_mode,
        }
    }

    /// Returns the next registered response for `request`.
    ///
    /// The n-th request for a URL and method gets the n-th response
    /// registered for them. The request body is ignored.
    ///
    /// # Panics
    /// If the faker was created with [FailureMode::Panic] (the default) and
    /// no response is registered for the request.
    #[track_caller]
    pub fn round_trip<B>(&self, request: &http::Request<B>) -> Result<http::Response<Bytes>> {
        let key = RequestKey::from_request(request);
        let outcome = self.failure_mode.apply(self.next(&key));
        Self::outcome_to_response(key, outcome?)
    }

    /// Consumes the next outcome for `key`, counting the request.
    pub(crate) fn next(&self, key: &RequestKey) -> faker_registry::Result<Outcome> {
        let outcome = self.registry.resolve((), |responses, _| responses.next(key));
        match &outcome {
            Ok(_) => tracing::debug!("matched {key}"),
            Err(e) => tracing::warn!("{e}"),
        }
        outcome
    }

    pub(crate) fn outcome_to_response(
        key: RequestKey,
        outcome: Outcome,
    ) -> Result<http::Response<Bytes>> {
        match outcome {
            Ok(response) => Ok(response.into()),
            Err(message) => Err(Error::Registered {
                key: key.to_string(),
                message,
            }),
        }
    }
}

impl<B> tower::Service<http::Request<B>> for Transport {
    type Response = http::Response<Bytes>;
    type Error = Error;
    type Future = std::future::Ready<Result<Self::Response>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        std::future::ready(self.round_trip(&request))
    }
}
