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

use crate::calls::{CallLog, CallRecord};
use crate::error::Result;
use crate::queues::ResponseQueues;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

/// The registered responses and recorded calls of one fake.
///
/// All the state is guarded by a single mutex. Every operation is a short
/// critical section: no I/O happens while the lock is held, and the lock is
/// never held across an `.await`. This makes the registry safe to share
/// between concurrent request handlers.
///
/// `K` is the lookup key, `V` the registered outcome (typically a `Result`),
/// and `R` the recorded request type. Fakes that do not keep a call log use
/// the default `R = ()`.
#[derive(Debug)]
pub struct Registry<K, V, R = ()> {
    state: Mutex<State<K, V, R>>,
}

#[derive(Debug)]
struct State<K, V, R> {
    responses: ResponseQueues<K, V>,
    calls: CallLog<R>,
}

impl<K, V, R> Default for Registry<K, V, R>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                responses: ResponseQueues::new(),
                calls: CallLog::new(),
            }),
        }
    }
}

impl<K, V, R> Registry<K, V, R>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the queue for `key`.
    ///
    /// Registrations may happen at any time, including after some traffic. They
    /// are honored in queue order.
    pub fn register(&self, key: K, value: V) {
        self.lock().responses.push(key, value);
    }

    /// Consumes the next response for `key`, without recording the call.
    ///
    /// Every call counts as a request for `key`, see [ResponseQueues::next].
    pub fn consume(&self, key: &K) -> Result<V>
    where
        K: Clone + std::fmt::Display,
    {
        self.lock().responses.next(key)
    }

    /// Records `request` and resolves its response in one critical section.
    ///
    /// The `resolver` receives the response queues and the new call record,
    /// and implements the matching precedence of the fake. Recording and
    /// consuming are atomic with respect to other calls: the call with
    /// sequence number `n` is the only one that can observe `n`.
    ///
    /// # Example
    /// ```
    /// use faker_registry::Registry;
    /// let registry = Registry::<usize, &str, &str>::new();
    /// registry.register(2, "second");
    /// let first = registry.resolve("a", |queues, record| queues.try_next(&record.sequence()));
    /// let second = registry.resolve("b", |queues, record| queues.try_next(&record.sequence()));
    /// assert_eq!((first, second), (None, Some("second")));
    /// ```
    pub fn resolve<F, T>(&self, request: R, resolver: F) -> T
    where
        F: FnOnce(&mut ResponseQueues<K, V>, &CallRecord<R>) -> T,
    {
        let mut guard = self.lock();
        let State { responses, calls } = &mut *guard;
        let record = calls.record(request);
        resolver(responses, record)
    }

    /// The number of responses consumed for `key`, or for all keys if `None`.
    pub fn consumed(&self, key: Option<&K>) -> usize {
        let state = self.lock();
        match key {
            Some(k) => state.responses.consumed(k),
            None => state.responses.total_consumed(),
        }
    }

    /// The number of lookups counted for `key`, see [ResponseQueues::requests].
    pub fn requests(&self, key: &K) -> usize {
        self.lock().responses.requests(key)
    }

    /// The number of registered responses not consumed yet.
    pub fn pending(&self) -> usize {
        self.lock().responses.pending()
    }

    /// The number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Returns a copy of the call record at `index` (0-based).
    pub fn recorded(&self, index: usize) -> Result<CallRecord<R>>
    where
        R: Clone,
    {
        self.lock().calls.get(index).cloned()
    }

    /// Returns a copy of all the call records, in arrival order.
    pub fn recorded_requests(&self) -> Vec<CallRecord<R>>
    where
        R: Clone,
    {
        self.lock().calls.iter().cloned().collect()
    }

    /// Returns a copy of the call records whose request satisfies `predicate`.
    pub fn recorded_matching<P>(&self, predicate: P) -> Vec<CallRecord<R>>
    where
        R: Clone,
        P: Fn(&R) -> bool,
    {
        self.lock()
            .calls
            .iter()
            .filter(|r| predicate(r.request()))
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, State<K, V, R>> {
        self.state.lock().expect("registry mutex is never poisoned")
    }
}
