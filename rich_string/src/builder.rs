// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use text_properties::{IntPropKind, PropVariant, TextProperties};

use crate::range::validate_range;
use crate::run::{self, Run, RunInfo};
use crate::{Error, RichString, RichStringBuilder};

/// A builder supporting arbitrary splices and property changes.
///
/// Every mutation validates its range first and leaves the builder untouched on error. After
/// each mutation the run list is maximal again: pieces that end up next to a run with equal
/// properties merge into it.
///
/// ## Example
///
/// ```
/// use rich_string::RichString;
/// use text_properties::{IntPropKind, PropVariant, PropertiesBuilder, TextProperties};
///
/// let plain = TextProperties::new();
/// let mut italic = PropertiesBuilder::new();
/// italic.set_int(IntPropKind::Italic, PropVariant::Toggle, 1);
///
/// let mut builder = RichString::new("one two", plain.clone()).builder();
/// builder.replace(4..7, "three", &italic.build())?;
/// builder.set_properties(4..9, &plain)?;
///
/// let s = builder.build();
/// assert_eq!(s.as_str(), "one three");
/// assert_eq!(s.run_count(), 1);
/// # Ok::<(), rich_string::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FullBuilder {
    text: String,
    runs: Vec<Run>,
    // Properties an empty text carries; see `RichString::properties_at_end`.
    empty_props: TextProperties,
}

impl FullBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(text: String, runs: Vec<Run>, empty_props: TextProperties) -> Self {
        Self {
            text,
            runs,
            empty_props,
        }
    }

    /// The text accumulated so far.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The length of the text, in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The number of runs.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Iterates over the runs in text order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = RunInfo<'_>> + '_ {
        let mut start = 0;
        self.runs.iter().map(move |r| {
            let range = start..r.limit;
            start = r.limit;
            RunInfo {
                range,
                props: &r.props,
            }
        })
    }

    /// The properties text appended at the end would take.
    pub fn properties_at_end(&self) -> &TextProperties {
        self.runs.last().map_or(&self.empty_props, |r| &r.props)
    }

    /// Replaces `range` with `text`, all of it carrying `props`.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        text: &str,
        props: &TextProperties,
    ) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        self.splice(range, text, [(text.len(), props.clone())]);
        self.remember_if_emptied(props);
        Ok(())
    }

    /// Replaces `range` with the part of `source` covering `source_range`, keeping its runs.
    pub fn replace_rich(
        &mut self,
        range: Range<usize>,
        source: &RichString,
        source_range: Range<usize>,
    ) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        validate_range(source.as_str(), &source_range)?;
        let text = &source.as_str()[source_range.clone()];
        self.splice(
            range,
            text,
            run::pieces(source.raw_runs(), source_range.clone()),
        );
        let carried = match source.run_at(source_range.start) {
            Ok(run) => run.props,
            Err(_) => source.properties_at_end(),
        };
        self.remember_if_emptied(carried);
        Ok(())
    }

    /// Inserts `text` carrying `props` at `index`.
    pub fn insert(&mut self, index: usize, text: &str, props: &TextProperties) -> Result<(), Error> {
        self.replace(index..index, text, props)
    }

    /// Removes `range`.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        if range.len() == self.text.len() {
            if let Some(first) = self.runs.first() {
                self.empty_props = first.props.clone();
            }
        }
        self.splice(range, "", []);
        Ok(())
    }

    /// Overwrites the properties of `range`.
    pub fn set_properties(&mut self, range: Range<usize>, props: &TextProperties) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        self.overwrite_properties(range, props);
        Ok(())
    }

    /// Sets one integer property across `range`, keeping every other attribute of the runs it
    /// touches.
    pub fn set_int_property(
        &mut self,
        range: Range<usize>,
        kind: IntPropKind,
        variant: PropVariant,
        value: i32,
    ) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        let updated: Vec<_> = run::pieces(&self.runs, range.clone())
            .map(|(len, props)| {
                let mut builder = props.to_builder();
                builder.set_int(kind, variant, value);
                (len, builder.build())
            })
            .collect();
        run::splice(&mut self.runs, range, updated);
        Ok(())
    }

    /// Snapshots the current contents.
    pub fn build(&self) -> RichString {
        let empty_props = if self.text.is_empty() {
            self.empty_props.clone()
        } else {
            TextProperties::default()
        };
        RichString::from_checked(self.text.clone(), self.runs.clone(), empty_props)
    }

    /// Discards all contents.
    pub fn clear(&mut self) {
        self.text.clear();
        self.runs.clear();
        self.empty_props = TextProperties::default();
    }

    /// Appends `text` carrying `props`, without range checks.
    pub(crate) fn push_str(&mut self, text: &str, props: &TextProperties) {
        if text.is_empty() {
            return;
        }
        self.text.push_str(text);
        self.push_piece(props);
    }

    /// Appends the part of `source` covering `range`, without range checks.
    pub(crate) fn push_rich(&mut self, source: &RichString, range: Range<usize>) {
        let mut pos = self.text.len();
        self.text.push_str(&source.as_str()[range.clone()]);
        for (len, props) in run::pieces(source.raw_runs(), range) {
            pos += len;
            match self.runs.last_mut() {
                Some(last) if last.props == props => last.limit = pos,
                _ => self.runs.push(Run::new(pos, props)),
            }
        }
    }

    /// Overwrites the properties of `range`, without range checks.
    pub(crate) fn overwrite_properties(&mut self, range: Range<usize>, props: &TextProperties) {
        if range.is_empty() {
            return;
        }
        let len = range.len();
        run::splice(&mut self.runs, range, [(len, props.clone())]);
    }

    fn push_piece(&mut self, props: &TextProperties) {
        let limit = self.text.len();
        match self.runs.last_mut() {
            Some(last) if last.props == *props => last.limit = limit,
            _ => self.runs.push(Run::new(limit, props.clone())),
        }
    }

    fn splice<I>(&mut self, range: Range<usize>, text: &str, pieces: I)
    where
        I: IntoIterator<Item = (usize, TextProperties)>,
    {
        self.text.replace_range(range.clone(), text);
        run::splice(&mut self.runs, range, pieces);
        debug_assert!(
            run::is_well_formed(&self.runs, self.text.len()),
            "splice broke the run invariants"
        );
    }

    fn remember_if_emptied(&mut self, props: &TextProperties) {
        if self.text.is_empty() {
            self.empty_props = props.clone();
        }
    }
}

impl RichStringBuilder for FullBuilder {
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
    use super::FullBuilder;
    use crate::{ErrorKind, RichString, RichStringBuilder, Run};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::ops::Range;
    use text_properties::{IntPropKind, PropVariant, PropertiesBuilder, TextProperties};

    fn color(n: i32) -> TextProperties {
        let mut builder = PropertiesBuilder::new();
        builder.set_int(IntPropKind::ForeColor, PropVariant::Rgb, n);
        builder.build()
    }

    fn layout(builder: &FullBuilder) -> Vec<(Range<usize>, i32)> {
        builder
            .runs()
            .map(|r| {
                let value = r.props.int(IntPropKind::ForeColor).map_or(-1, |p| p.value);
                (r.range, value)
            })
            .collect()
    }

    #[test]
    fn replace_in_the_middle_splits() {
        let mut builder = RichString::new("abcdef", color(1)).builder();
        builder.replace(2..4, "XYZ", &color(2)).unwrap();
        assert_eq!(builder.text(), "abXYZef");
        assert_eq!(layout(&builder), [(0..2, 1), (2..5, 2), (5..7, 1)]);
    }

    #[test]
    fn replace_with_matching_properties_merges() {
        let mut builder = RichString::new("abc", color(1)).builder();
        builder.replace(1..2, "BB", &color(1)).unwrap();
        assert_eq!(layout(&builder), [(0..4, 1)]);
    }

    #[test]
    fn replace_rich_carries_source_runs() {
        let source =
            RichString::from_parts("1234", vec![Run::new(2, color(7)), Run::new(4, color(8))])
                .unwrap();
        let mut builder = RichString::new("ab", color(7)).builder();
        builder.replace_rich(1..1, &source, 1..3).unwrap();
        assert_eq!(builder.text(), "a23b");
        assert_eq!(layout(&builder), [(0..2, 7), (2..3, 8), (3..4, 7)]);
    }

    #[test]
    fn set_properties_restores_maximal_runs() {
        let mut builder = RichString::new("abcd", color(1)).builder();
        builder.set_properties(1..2, &color(2)).unwrap();
        builder.set_properties(2..3, &color(2)).unwrap();
        assert_eq!(layout(&builder), [(0..1, 1), (1..3, 2), (3..4, 1)]);
        builder.set_properties(0..4, &color(3)).unwrap();
        assert_eq!(layout(&builder), [(0..4, 3)]);
    }

    #[test]
    fn set_int_property_keeps_other_attributes() {
        let mut italic = PropertiesBuilder::new();
        italic.set_int(IntPropKind::Italic, PropVariant::Toggle, 1);
        let mut builder = RichString::new("ab", italic.build()).builder();
        builder
            .set_int_property(0..1, IntPropKind::ForeColor, PropVariant::Rgb, 5)
            .unwrap();
        let s = builder.build();
        let first = s.run(0).unwrap().props;
        assert_eq!(first.int(IntPropKind::Italic).map(|p| p.value), Some(1));
        assert_eq!(first.int(IntPropKind::ForeColor).map(|p| p.value), Some(5));
        assert_eq!(s.run_count(), 2);
    }

    #[test]
    fn errors_leave_the_builder_untouched() {
        let mut builder = RichString::new("é", color(1)).builder();
        let err = builder.replace(0..1, "x", &color(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
        let err = builder.delete(0..5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(builder.text(), "é");
        assert_eq!(layout(&builder), [(0..2, 1)]);
    }

    #[test]
    fn deleting_everything_keeps_properties() {
        let mut builder = RichString::new("abc", color(4)).builder();
        builder.delete(0..3).unwrap();
        assert_eq!(builder.run_count(), 0);
        let s = builder.build();
        assert!(s.is_empty());
        assert_eq!(s.properties_at_end(), &color(4));

        builder.insert(0, "z", &color(6)).unwrap();
        assert_eq!(layout(&builder), [(0..1, 6)]);
    }

    #[test]
    fn round_trip_through_builder() {
        let s = RichString::from_parts(
            "héllo",
            vec![Run::new(1, color(1)), Run::new(3, color(2)), Run::new(6, color(3))],
        )
        .unwrap();
        assert_eq!(s.builder().build(), s);
        let mut builder = s.builder();
        builder.clear();
        assert!(RichStringBuilder::is_empty(&builder));
    }
}
