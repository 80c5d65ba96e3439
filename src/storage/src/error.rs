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

/// A specialized [Result][std::result::Result] for the storage fake.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors returned by the storage fake.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The request did not match any registered response.
    #[error("failed RoundTrip: {0}")]
    Registry(#[from] faker_registry::Error),

    /// The test registered an error for this request.
    #[error("registered error for {key}: {message}")]
    Registered { key: String, message: String },

    /// A response payload could not be serialized.
    #[error("cannot serialize response payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the request had no registered response.
    pub fn is_not_registered(&self) -> bool {
        matches!(
            self,
            Self::Registry(faker_registry::Error::NotRegistered { .. })
        )
    }
}
