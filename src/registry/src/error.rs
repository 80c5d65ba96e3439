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

//! Errors reported by the registry.

/// The result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures to match a request or to inspect the recorded calls.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// There is no response registered at the position a request consumes.
    ///
    /// `request_count` is the 1-based number of the request (for that key)
    /// that could not be matched.
    #[error("response is not registered. {key} RequestCount is {request_count}")]
    NotRegistered { key: String, request_count: usize },

    /// An inspection index is beyond the number of recorded calls.
    #[error("index {index} is out of range, {len} call(s) recorded")]
    OutOfRange { index: usize, len: usize },

    /// The request is missing a required header or field.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
}
