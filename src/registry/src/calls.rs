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

/// One request observed by a fake.
#[derive(Clone, Debug, PartialEq)]
pub struct CallRecord<R> {
    sequence: usize,
    request: R,
}

impl<R> CallRecord<R> {
    /// The 1-based position of this call among all recorded calls.
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn request(&self) -> &R {
        &self.request
    }

    pub fn into_request(self) -> R {
        self.request
    }
}

/// An append-only log of the requests received by a fake.
///
/// Sequence numbers are assigned in arrival order, starting at 1. Lookups use
/// 0-based indexes, like slices.
#[derive(Debug)]
pub struct CallLog<R> {
    records: Vec<CallRecord<R>>,
}

impl<R> Default for CallLog<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> CallLog<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `request` and returns the new record.
    pub fn record(&mut self, request: R) -> &CallRecord<R> {
        let sequence = self.records.len() + 1;
        self.records.push(CallRecord { sequence, request });
        &self.records[sequence - 1]
    }

    /// Returns the record at `index` (0-based).
    pub fn get(&self, index: usize) -> Result<&CallRecord<R>> {
        self.records.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallRecord<R>> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers() {
        let mut log = CallLog::new();
        assert!(log.is_empty());
        assert_eq!(log.record("a").sequence(), 1);
        assert_eq!(log.record("b").sequence(), 2);
        assert_eq!(log.record("c").sequence(), 3);
        assert_eq!(log.len(), 3);

        let got = log.iter().map(|r| (r.sequence(), *r.request())).collect::<Vec<_>>();
        assert_eq!(got, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn get() -> anyhow::Result<()> {
        let mut log = CallLog::new();
        log.record("a".to_string());
        log.record("b".to_string());

        let got = log.get(1)?;
        assert_eq!(got.sequence(), 2);
        assert_eq!(got.request(), "b");

        let err = log.get(2).unwrap_err();
        assert_eq!(err, Error::OutOfRange { index: 2, len: 2 });
        Ok(())
    }

    #[test]
    fn into_request() {
        let mut log = CallLog::new();
        let record = log.record(vec![1, 2, 3]).clone();
        assert_eq!(record.into_request(), vec![1, 2, 3]);
    }
}
