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

use rand::{
    Rng,
    distr::{Distribution, Uniform},
};

/// All the random names start with this prefix.
pub const PREFIX: &str = "faker-";

const BUCKET_ID_LENGTH: usize = 63;

const QUEUE_ID_LENGTH: usize = 32;

const TASK_ID_LENGTH: usize = 32;

/// A random bucket id, valid for the Cloud Storage naming rules.
pub fn random_bucket_id() -> String {
    let id = LowercaseAlphanumeric.random_string(BUCKET_ID_LENGTH - PREFIX.len());
    format!("{PREFIX}{id}")
}

/// A random object name, with a `/` separated "folder" prefix.
pub fn random_object_name() -> String {
    let folder = LowercaseAlphanumeric.random_string(8);
    let object = LowercaseAlphanumeric.random_string(16);
    format!("{PREFIX}{folder}/{object}.txt")
}

/// A random queue resource name in `project` and `location`.
pub fn random_queue_name(project: &str, location: &str) -> String {
    let id = LowercaseAlphanumeric.random_string(QUEUE_ID_LENGTH - PREFIX.len());
    format!("projects/{project}/locations/{location}/queues/{PREFIX}{id}")
}

/// A random task resource name in `queue`.
pub fn random_task_name(queue: &str) -> String {
    let id = LowercaseAlphanumeric.random_string(TASK_ID_LENGTH - PREFIX.len());
    format!("{queue}/tasks/{PREFIX}{id}")
}

const LOWERCASE_ALPHANUMERIC_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseAlphanumeric;

impl LowercaseAlphanumeric {
    /// Create a string with `n` characters from the character set.
    pub fn random_string(&self, n: usize) -> String {
        rand::rng()
            .sample_iter(self)
            .take(n)
            .map(char::from)
            .collect()
    }
}

impl Distribution<u8> for LowercaseAlphanumeric {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let u = Uniform::new(0, LOWERCASE_ALPHANUMERIC_CHARSET.len())
            .expect("hard-coded uniform distribution is initialized successfully")
            .sample(rng);
        LOWERCASE_ALPHANUMERIC_CHARSET[u]
    }
}
