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

//! Sequenced response registries for service fakes.
//!
//! A fake service answers each incoming request with a response registered
//! ahead of time by the test. Responses are stored in per-key queues: the
//! first request for a key receives the first response registered for that
//! key, the second request the second response, and so on. The registry also
//! keeps a log of the requests it received, so tests can assert on them.
//!
//! # Example
//! ```
//! use faker_registry::Registry;
//! let registry = Registry::<&str, i32, String>::new();
//! registry.register("GET /a", 1);
//! registry.register("GET /a", 2);
//!
//! let got = registry.resolve("first".to_string(), |queues, _record| queues.next(&"GET /a"));
//! assert_eq!(got.ok(), Some(1));
//! let got = registry.resolve("second".to_string(), |queues, _record| queues.next(&"GET /a"));
//! assert_eq!(got.ok(), Some(2));
//! assert_eq!(registry.call_count(), 2);
//! ```

mod calls;
pub mod error;
mod fatal;
mod queues;
mod registry;

pub use calls::{CallLog, CallRecord};
pub use error::{Error, Result};
pub use fatal::FailureMode;
pub use queues::ResponseQueues;
pub use registry::Registry;
