// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use text_properties::{IntPropKind, PropVariant, PropertiesBuilder, StrPropKind};

use crate::run::Run;
use crate::{RichString, RichStringBuilder};

/// An append-only builder.
///
/// Text is appended under a set of pending properties. Appending with the same properties as
/// the trailing run extends that run instead of starting a new one.
///
/// ## Example
///
/// ```
/// use rich_string::IncrementalBuilder;
/// use text_properties::{IntPropKind, PropVariant};
///
/// let mut builder = IncrementalBuilder::new();
/// builder.append("plain ");
/// builder.set_int_property(IntPropKind::Bold, PropVariant::Toggle, 1);
/// builder.append("bold");
/// builder.append("er");
///
/// let s = builder.build();
/// assert_eq!(s.as_str(), "plain bolder");
/// assert_eq!(s.run_count(), 2);
/// assert_eq!(s.run(1).unwrap().range, 6..12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct IncrementalBuilder {
    text: String,
    runs: Vec<Run>,
    pending: PropertiesBuilder,
}

impl IncrementalBuilder {
    /// Creates an empty builder with no pending properties.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with the given pending properties.
    pub fn with_properties(pending: PropertiesBuilder) -> Self {
        Self {
            pending,
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(text: String, runs: Vec<Run>, pending: PropertiesBuilder) -> Self {
        Self {
            text,
            runs,
            pending,
        }
    }

    /// Appends `text` under the pending properties.
    ///
    /// Appending an empty string does nothing.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.push_str(text);
        let props = self.pending.build();
        let limit = self.text.len();
        match self.runs.last_mut() {
            Some(last) if last.props == props => last.limit = limit,
            _ => self.runs.push(Run::new(limit, props)),
        }
    }

    /// Appends one character under the pending properties.
    pub fn append_char(&mut self, c: char) {
        let mut buf = [0_u8; 4];
        self.append(c.encode_utf8(&mut buf));
    }

    /// Appends another rich string, keeping its runs.
    ///
    /// Afterwards the pending properties are those at the end of `other`. Appending an empty
    /// string only adopts its carried properties, which is how callers set the style for
    /// following text without inserting anything.
    pub fn append_rich(&mut self, other: &RichString) {
        self.pending = other.properties_at_end().to_builder();
        if other.is_empty() {
            return;
        }

        if let (Some(last), Some(first)) = (self.runs.last(), other.raw_runs().first()) {
            if last.props == first.props {
                // `other`'s first run starts where the dropped run did, merging the two.
                self.runs.pop();
            }
        }

        let base = self.text.len();
        self.text.push_str(other.as_str());
        self.runs.extend(
            other
                .raw_runs()
                .iter()
                .map(|run| Run::new(run.limit + base, run.props.clone())),
        );
    }

    /// The pending properties.
    #[inline]
    pub fn pending_properties(&self) -> &PropertiesBuilder {
        &self.pending
    }

    /// Mutable access to the pending properties.
    #[inline]
    pub fn pending_properties_mut(&mut self) -> &mut PropertiesBuilder {
        &mut self.pending
    }

    /// Sets one pending integer property.
    pub fn set_int_property(&mut self, kind: IntPropKind, variant: PropVariant, value: i32) {
        self.pending.set_int(kind, variant, value);
    }

    /// Sets one pending string property. An empty value clears it.
    pub fn set_str_property(&mut self, kind: StrPropKind, value: &str) {
        self.pending.set_str(kind, value);
    }

    /// Takes the pending properties, leaving none pending.
    pub fn take_pending_properties(&mut self) -> PropertiesBuilder {
        mem::take(&mut self.pending)
    }

    /// The text accumulated so far.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The number of runs accumulated so far.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Snapshots the current contents.
    ///
    /// An empty builder produces an empty string carrying the pending properties.
    pub fn build(&self) -> RichString {
        let empty_props = if self.text.is_empty() {
            self.pending.build()
        } else {
            Default::default()
        };
        RichString::from_checked(self.text.clone(), self.runs.clone(), empty_props)
    }

    /// Discards text, runs and pending properties.
    pub fn clear(&mut self) {
        self.text.clear();
        self.runs.clear();
        self.pending.clear();
    }
}

impl RichStringBuilder for IncrementalBuilder {
    fn text(&self) -> &str {
        Self::text(self)
    }

    fn run_count(&self) -> usize {
        Self::run_count(self)
    }

    fn build(&self) -> RichString {
        Self::build(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::IncrementalBuilder;
    use crate::{RichString, RichStringBuilder, Run};
    use alloc::vec;
    use text_properties::{
        IntPropKind, PropVariant, PropertiesBuilder, StrPropKind, TextProperties, WritingSystem,
    };

    fn color(n: i32) -> TextProperties {
        let mut builder = PropertiesBuilder::new();
        builder.set_int(IntPropKind::ForeColor, PropVariant::Rgb, n);
        builder.build()
    }

    #[test]
    fn empty_append_creates_no_run() {
        let mut builder = IncrementalBuilder::new();
        builder.set_int_property(IntPropKind::Italic, PropVariant::Toggle, 1);
        builder.append("");
        assert_eq!(builder.run_count(), 0);
        let s = builder.build();
        assert!(s.is_empty());
        assert_eq!(
            s.properties_at_end().int(IntPropKind::Italic).map(|p| p.value),
            Some(1)
        );
    }

    #[test]
    fn unchanged_properties_extend_the_trailing_run() {
        let mut builder = IncrementalBuilder::new();
        builder.append("ab");
        builder.append_char('c');
        assert_eq!(builder.run_count(), 1);
        builder.set_str_property(StrPropKind::FontFamily, "Doulos");
        builder.append("d");
        builder.set_str_property(StrPropKind::FontFamily, "");
        builder.append("e");
        let s = builder.build();
        let ranges: Vec<_> = s.runs().map(|r| r.range).collect();
        assert_eq!(ranges, [0..3, 3..4, 4..5]);
    }

    #[test]
    fn append_rich_merges_matching_edge() {
        let mut builder = IncrementalBuilder::with_properties(color(1).to_builder());
        builder.append("xx");
        let other =
            RichString::from_parts("abc", vec![Run::new(1, color(1)), Run::new(3, color(2))])
                .unwrap();
        builder.append_rich(&other);
        let s = builder.build();
        assert_eq!(s.as_str(), "xxabc");
        let ranges: Vec<_> = s.runs().map(|r| (r.range, r.props.clone())).collect();
        assert_eq!(ranges, [(0..3, color(1)), (3..5, color(2))]);
        assert_eq!(builder.pending_properties(), &color(2).to_builder());
    }

    #[test]
    fn append_rich_keeps_distinct_edge() {
        let mut builder = IncrementalBuilder::with_properties(color(3).to_builder());
        builder.append("x");
        builder.append_rich(&RichString::new("y", color(4)));
        let s = builder.build();
        assert_eq!(s.run_count(), 2);
        assert_eq!(s.run(1).unwrap().range, 1..2);
    }

    #[test]
    fn append_empty_rich_only_adopts_properties() {
        let mut builder = IncrementalBuilder::new();
        builder.append("a");
        builder.append_rich(&RichString::empty(WritingSystem::new(9)));
        assert_eq!(builder.text(), "a");
        builder.append("b");
        let s = builder.build();
        assert_eq!(s.run_count(), 2);
        assert_eq!(
            s.run(1).unwrap().props.writing_system(),
            Some(WritingSystem::new(9))
        );
    }

    #[test]
    fn take_resets_pending() {
        let mut builder = IncrementalBuilder::new();
        builder.set_int_property(IntPropKind::Bold, PropVariant::Toggle, 1);
        let taken = builder.take_pending_properties();
        assert!(taken.get_int(IntPropKind::Bold).is_some());
        assert!(builder.pending_properties().is_empty());
    }

    #[test]
    fn copies_do_not_alias_their_source() {
        let s = RichString::new("abc", color(1));
        let mut builder = s.incremental_builder();
        builder.append_rich(&RichString::new("d", color(2)));
        assert_eq!(s.as_str(), "abc");
        assert_eq!(builder.build().as_str(), "abcd");
        builder.clear();
        assert!(RichStringBuilder::is_empty(&builder));
    }
}
