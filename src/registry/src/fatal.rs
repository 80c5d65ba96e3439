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

/// How a fake reports a request it cannot match.
///
/// The registry and the fakes always produce explicit errors. Inside a test it
/// is often more convenient to stop the test at the first unexpected request,
/// that is what [FailureMode::Panic] does. Use [FailureMode::Return] when the
/// fake is used outside of a test body, or when the test wants to assert on
/// the error itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Fail the current test by panicking with the error.
    #[default]
    Panic,
    /// Return the error to the caller.
    Return,
}

impl FailureMode {
    /// Applies the failure mode to `result`.
    ///
    /// # Example
    /// ```
    /// use faker_registry::FailureMode;
    /// let result: Result<i32, String> = Err("not registered".into());
    /// assert_eq!(FailureMode::Return.apply(result.clone()), result);
    /// ```
    ///
    /// # Panics
    /// When the mode is [FailureMode::Panic] and `result` is an error.
    #[track_caller]
    pub fn apply<T, E>(self, result: Result<T, E>) -> Result<T, E>
    where
        E: std::fmt::Display,
    {
        match (self, result) {
            (Self::Panic, Err(e)) => panic!("unexpected: {e}"),
            (_, r) => r,
        }
    }
}
