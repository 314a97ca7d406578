// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

/// Correspondence from input byte offsets to output byte offsets.
///
/// Offsets without an entry, such as those inside a multi-byte character, resolve to the
/// nearest recorded offset before them, or 0.
#[derive(Clone, Debug)]
pub(crate) struct OffsetMap {
    entries: Vec<Option<usize>>,
}

impl OffsetMap {
    /// Creates an empty map for an input of `len` bytes.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            entries: vec![None; len + 1],
        }
    }

    /// Records that input offset `source` lands on output offset `output`. The first record for
    /// an offset wins.
    pub(crate) fn record(&mut self, source: usize, output: usize) {
        if let Some(entry) = self.entries.get_mut(source) {
            entry.get_or_insert(output);
        }
    }

    /// Maps the end of the input to the end of the output.
    pub(crate) fn finish(&mut self, output_len: usize) {
        if let Some(last) = self.entries.last_mut() {
            *last = Some(output_len);
        }
    }

    /// Rewrites every offset in place. Offsets past the input are treated as its end.
    pub(crate) fn remap(&self, offsets: &mut [usize]) {
        for offset in offsets {
            *offset = self.lookup(*offset);
        }
    }

    fn lookup(&self, offset: usize) -> usize {
        let end = offset.min(self.entries.len() - 1);
        self.entries[..=end]
            .iter()
            .rev()
            .find_map(|entry| *entry)
            .unwrap_or(0)
    }
}
