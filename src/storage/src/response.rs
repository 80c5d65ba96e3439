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

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue, IntoHeaderName};
use http::{HeaderMap, StatusCode};

/// The content type of JSON API responses.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// A canned HTTP response.
///
/// The body is a [Bytes], so every consumer of the response gets its own
/// reader over the same buffer.
///
/// # Example
/// ```
/// use storage_faker::FakeResponse;
/// use http::StatusCode;
/// let response = FakeResponse::new(StatusCode::NOT_FOUND)
///     .with_header(http::header::CONTENT_TYPE, "text/plain".parse().unwrap())
///     .with_body("no such object");
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// assert_eq!(response.body().as_ref(), b"no such object");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FakeResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Default for FakeResponse {
    fn default() -> Self {
        Self::ok()
    }
}

impl FakeResponse {
    /// An empty `200 OK` response.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// An empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// A `200 OK` response with `value` serialized as JSON.
    pub fn json<T>(value: &T) -> crate::Result<Self>
    where
        T: serde::Serialize + ?Sized,
    {
        let body = serde_json::to_vec(value)?;
        Ok(Self::ok()
            .with_header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .with_body(body))
    }

    /// Converts a response built with the `http` crate.
    pub fn from_http(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Appends a header value, keeping any previous values for `name`.
    pub fn with_header<K>(mut self, name: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.headers.append(name, value);
        self
    }

    /// Appends all the values in `headers`.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        let mut name = None;
        for (key, value) in headers {
            // Only the first value of each name carries the name.
            if key.is_some() {
                name = key;
            }
            if let Some(n) = &name {
                self.headers.append(n.clone(), value);
            }
        }
        self
    }

    pub fn with_body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Creates a fresh `http::Response` with a copy of this response.
    pub fn to_http(&self) -> http::Response<Bytes> {
        self.clone().into()
    }
}

impl From<FakeResponse> for http::Response<Bytes> {
    fn from(value: FakeResponse) -> Self {
        let mut response = http::Response::new(value.body);
        *response.status_mut() = value.status;
        *response.headers_mut() = value.headers;
        response
    }
}

impl From<http::Response<Bytes>> for FakeResponse {
    fn from(value: http::Response<Bytes>) -> Self {
        Self::from_http(value)
    }
}
