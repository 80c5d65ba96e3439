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

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::hash::Hash;

/// Per-key FIFO queues of canned responses.
///
/// Each key owns an append-only list of responses and a position. Consuming a
/// key returns the response at the position and advances it. Registered
/// responses are never removed, slots behind the position are simply not
/// revisited.
///
/// [try_next()][ResponseQueues::try_next] only moves the position when it
/// finds a response. [next()][ResponseQueues::next] counts every lookup, so
/// the n-th lookup for a key always maps to the n-th registered response.
///
/// This type does no locking; see [Registry][crate::Registry] for the
/// thread-safe wrapper.
#[derive(Debug)]
pub struct ResponseQueues<K, V> {
    queues: HashMap<K, Queue<V>>,
}

#[derive(Debug)]
struct Queue<V> {
    entries: Vec<V>,
    position: usize,
    consumed: usize,
}

impl<V> Default for Queue<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            position: 0,
            consumed: 0,
        }
    }
}

impl<V> Queue<V> {
    fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.position)
    }
}

impl<K, V> Default for ResponseQueues<K, V> {
    fn default() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }
}

impl<K, V> ResponseQueues<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the tail of the queue for `key`.
    pub fn push(&mut self, key: K, value: V) {
        self.queues.entry(key).or_default().entries.push(value);
    }

    /// Consumes the next response for `key`, if there is one.
    ///
    /// The position for `key` only advances when a response is returned.
    pub fn try_next(&mut self, key: &K) -> Option<V> {
        let queue = self.queues.get_mut(key)?;
        let value = queue.entries.get(queue.position)?.clone();
        queue.position += 1;
        queue.consumed += 1;
        Some(value)
    }

    /// Counts a request for `key` and returns the response in its slot.
    ///
    /// The n-th call for a key returns the n-th response registered for it,
    /// whether or not the previous calls found a response.
    ///
    /// # Example
    /// ```
    /// use faker_registry::{Error, ResponseQueues};
    /// let mut queues = ResponseQueues::new();
    /// queues.push("k", "v1");
    /// assert_eq!(queues.next(&"k"), Ok("v1"));
    /// assert!(matches!(queues.next(&"k"), Err(Error::NotRegistered { request_count: 2, .. })));
    /// assert!(matches!(queues.next(&"k"), Err(Error::NotRegistered { request_count: 3, .. })));
    /// ```
    pub fn next(&mut self, key: &K) -> Result<V>
    where
        K: Clone + std::fmt::Display,
    {
        let queue = self.queues.entry(key.clone()).or_default();
        let slot = queue.position;
        queue.position += 1;
        match queue.entries.get(slot) {
            Some(value) => {
                queue.consumed += 1;
                Ok(value.clone())
            }
            None => Err(Error::NotRegistered {
                key: key.to_string(),
                request_count: slot + 1,
            }),
        }
    }

    /// The number of lookups that moved the position for `key`.
    ///
    /// This counts every [next()][ResponseQueues::next] call, and the
    /// successful [try_next()][ResponseQueues::try_next] calls.
    pub fn requests(&self, key: &K) -> usize {
        self.queues.get(key).map(|q| q.position).unwrap_or_default()
    }

    /// The number of responses consumed for `key`.
    pub fn consumed(&self, key: &K) -> usize {
        self.queues.get(key).map(|q| q.consumed).unwrap_or_default()
    }

    /// The number of responses consumed across all keys.
    pub fn total_consumed(&self) -> usize {
        self.queues.values().map(|q| q.consumed).sum()
    }

    /// The number of registered responses for `key` that a later lookup
    /// can still return.
    pub fn remaining(&self, key: &K) -> usize {
        self.queues
            .get(key)
            .map(Queue::remaining)
            .unwrap_or_default()
    }

    /// The number of responses that a later lookup can still return, across
    /// all keys.
    pub fn pending(&self) -> usize {
        self.queues.values().map(Queue::remaining).sum()
    }
}
