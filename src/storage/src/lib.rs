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

//! A fake for the Cloud Storage JSON API, at the HTTP transport level.
//!
//! The [StorageFaker] holds canned responses keyed by URL and HTTP method.
//! Client code sends its requests through a [Transport] (or to the local
//! server started by [StorageFaker::start]), and receives the responses in
//! registration order. Nothing is sent over the network.
//!
//! Requests without a registered response are programming errors in the
//! test. By default they panic, failing the test at the offending request.
//! Use [StorageFaker::without_testing] to receive an [Error] instead.

mod error;
mod faker;
pub mod model;
mod response;
pub mod samples;
mod server;
mod transport;

pub use error::{Error, Result};
pub use faker::{Builder, DEFAULT_BASE_URL, StorageFaker};
pub use faker_registry::FailureMode;
pub use response::{FakeResponse, JSON_CONTENT_TYPE};
pub use transport::{RequestKey, Transport};
