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

use tracing_subscriber::EnvFilter;

/// Sends the fakes' logs to the test output for the current thread.
///
/// The level is read from `RUST_LOG`. Without it, only warnings and errors
/// are shown, unless the `log-fakes` feature is enabled, in which case the
/// default is `debug`.
///
/// Tokio's multi-threaded runtime runs tasks on other threads, use the
/// default (current thread) flavor of `#[tokio::test]` to capture the logs
/// from the fakes' handlers.
pub fn enable_tracing() -> ::tracing::subscriber::DefaultGuard {
    #[cfg(feature = "log-fakes")]
    let default_level = "debug";
    #[cfg(not(feature = "log-fakes"))]
    let default_level = "warn";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_test_writer()
        .with_env_filter(filter)
        .finish();

    ::tracing::subscriber::set_default(subscriber)
}
