// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::RichString;

/// Something that accumulates text and runs and can snapshot them as a [`RichString`].
pub trait RichStringBuilder {
    /// The text accumulated so far.
    fn text(&self) -> &str;

    /// The number of runs accumulated so far.
    fn run_count(&self) -> usize;

    /// Snapshots the current contents. The builder stays usable.
    fn build(&self) -> RichString;

    /// Discards all contents.
    fn clear(&mut self);

    /// The length of the accumulated text, in bytes.
    fn len(&self) -> usize {
        self.text().len()
    }

    /// Returns `true` if no text has been accumulated.
    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}
