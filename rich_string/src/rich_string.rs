// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Range;

use text_properties::{TextProperties, WritingSystem};

use crate::flags::NormalizedFlags;
use crate::range::validate_range;
use crate::run::{self, Run, RunInfo};
use crate::{Error, FullBuilder, IncrementalBuilder, TextLock, empty};

struct RichStringData {
    text: Box<str>,
    runs: Vec<Run>,
    // Only meaningful when `text` is empty, which leaves no run to carry properties.
    empty_props: TextProperties,
    normalized: NormalizedFlags,
}

/// An immutable string whose text is partitioned into runs of [`TextProperties`].
///
/// Runs are maximal: adjacent runs never have equal properties, their limits strictly increase,
/// and the last limit equals the text length. An empty string has no runs; it instead carries
/// the properties that text appended after it would take.
///
/// Cloning shares the underlying allocation. Use a [`FullBuilder`] or an [`IncrementalBuilder`]
/// to make modified copies.
///
/// All offsets are byte indices into UTF-8 text.
///
/// ## Example
///
/// ```
/// use rich_string::{Run, RichString};
/// use text_properties::{IntPropKind, PropVariant, PropertiesBuilder};
///
/// let plain = PropertiesBuilder::new().build();
/// let mut bold = PropertiesBuilder::new();
/// bold.set_int(IntPropKind::Bold, PropVariant::Toggle, 1);
/// let bold = bold.build();
///
/// let s = RichString::from_parts("ab", vec![Run::new(1, plain), Run::new(2, bold.clone())])?;
/// let b = s.substring(1..2)?;
/// assert_eq!(b.as_str(), "b");
/// assert_eq!(b.run_count(), 1);
/// assert_eq!(b.run_at(0)?.props, &bold);
/// # Ok::<(), rich_string::Error>(())
/// ```
#[derive(Clone)]
pub struct RichString {
    data: Arc<RichStringData>,
}

impl RichString {
    pub(crate) fn from_checked(text: String, runs: Vec<Run>, empty_props: TextProperties) -> Self {
        debug_assert!(
            run::is_well_formed(&runs, text.len()),
            "run list does not satisfy the rich string invariants"
        );
        Self {
            data: Arc::new(RichStringData {
                text: text.into_boxed_str(),
                runs,
                empty_props,
                normalized: NormalizedFlags::default(),
            }),
        }
    }

    /// Creates a string with a single run.
    pub fn new(text: impl Into<String>, props: TextProperties) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::empty_with(props);
        }
        let runs = alloc::vec![Run::new(text.len(), props)];
        Self::from_checked(text, runs, TextProperties::default())
    }

    /// Returns the shared empty string for a writing system.
    ///
    /// Every call with the same writing system returns the same allocation, see
    /// [`RichString::ptr_eq`].
    pub fn empty(ws: WritingSystem) -> Self {
        empty::shared_empty(ws)
    }

    /// Creates an empty string carrying `props`.
    ///
    /// Unlike [`RichString::empty`] this always allocates.
    pub fn empty_with(props: TextProperties) -> Self {
        Self::from_checked(String::new(), Vec::new(), props)
    }

    /// Creates a string from a flat `(text, runs)` pair.
    ///
    /// Run limits must strictly increase, lie on character boundaries, and the last one must equal
    /// the text length. Adjacent runs with equal properties are merged. An empty text takes either
    /// no runs or a single run with limit 0, whose properties it then carries.
    pub fn from_parts(text: impl Into<String>, runs: Vec<Run>) -> Result<Self, Error> {
        let text = text.into();
        let len = text.len();
        if len == 0 {
            return match runs.len() {
                0 => Ok(Self::empty_with(TextProperties::default())),
                1 if runs[0].limit == 0 => {
                    let props = runs.into_iter().next().map(|r| r.props).unwrap_or_default();
                    Ok(Self::empty_with(props))
                }
                _ => Err(Error::invalid_argument("runs given for an empty text")),
            };
        }
        if runs.is_empty() {
            return Err(Error::invalid_argument("non-empty text needs at least one run"));
        }
        let mut prev = 0;
        for run in &runs {
            validate_range(&text, &(prev..run.limit))?;
            if run.limit == prev {
                return Err(Error::invalid_argument("run limits must strictly increase"));
            }
            prev = run.limit;
        }
        if prev != len {
            return Err(Error::invalid_argument("runs must end at the text length"));
        }
        let mut runs = runs;
        run::coalesce(&mut runs);
        Ok(Self::from_checked(text, runs, TextProperties::default()))
    }

    /// Returns the flat `(text, runs)` pair, the inverse of [`RichString::from_parts`].
    ///
    /// An empty string yields a single run with limit 0 holding its carried properties.
    pub fn to_parts(&self) -> (String, Vec<Run>) {
        let runs = if self.is_empty() {
            alloc::vec![Run::new(0, self.data.empty_props.clone())]
        } else {
            self.data.runs.clone()
        };
        (String::from(self.as_str()), runs)
    }

    /// Returns the text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data.text
    }

    /// Returns the length of the text, in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.text.len()
    }

    /// Returns `true` if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.text.is_empty()
    }

    /// Returns the number of runs. Zero exactly when the text is empty.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.data.runs.len()
    }

    /// Returns run `ix`, if it exists.
    pub fn run(&self, ix: usize) -> Option<RunInfo<'_>> {
        let runs = &self.data.runs;
        runs.get(ix).map(|r| RunInfo {
            range: run::run_start(runs, ix)..r.limit,
            props: &r.props,
        })
    }

    /// Iterates over the runs in text order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = RunInfo<'_>> + '_ {
        let mut start = 0;
        self.data.runs.iter().map(move |r| {
            let range = start..r.limit;
            start = r.limit;
            RunInfo {
                range,
                props: &r.props,
            }
        })
    }

    /// The raw run list.
    #[inline]
    pub(crate) fn raw_runs(&self) -> &[Run] {
        &self.data.runs
    }

    /// Returns the index of the run covering byte `index`.
    ///
    /// `index` may equal the text length, which reports the last run.
    pub fn run_index_at(&self, index: usize) -> Result<usize, Error> {
        let len = self.len();
        if self.is_empty() || index > len {
            return Err(Error::invalid_bounds(index, index, len));
        }
        Ok(run::run_index_containing(&self.data.runs, index))
    }

    /// Returns the run covering byte `index`.
    ///
    /// `index` may equal the text length, which reports the last run.
    pub fn run_at(&self, index: usize) -> Result<RunInfo<'_>, Error> {
        let ix = self.run_index_at(index)?;
        self.run(ix)
            .ok_or(Error::invalid_bounds(index, index, self.len()))
    }

    /// Returns the properties text appended at the end would take: those of the last run, or the
    /// carried properties of an empty string.
    pub fn properties_at_end(&self) -> &TextProperties {
        self.data
            .runs
            .last()
            .map_or(&self.data.empty_props, |r| &r.props)
    }

    /// Returns the part of the string covering `range`.
    ///
    /// The whole range returns a clone of `self` sharing its allocation. An empty range yields an
    /// empty string carrying the properties in effect at `range.start`.
    pub fn substring(&self, range: Range<usize>) -> Result<Self, Error> {
        validate_range(self.as_str(), &range)?;
        if range == (0..self.len()) {
            return Ok(self.clone());
        }
        if range.is_empty() {
            let props = match self.run_at(range.start) {
                Ok(run) => run.props.clone(),
                Err(_) => self.properties_at_end().clone(),
            };
            return Ok(Self::empty_with(props));
        }
        let mut limit = 0;
        let runs = run::pieces(&self.data.runs, range.clone())
            .map(|(len, props)| {
                limit += len;
                Run::new(limit, props)
            })
            .collect();
        let text = String::from(&self.as_str()[range]);
        Ok(Self::from_checked(text, runs, TextProperties::default()))
    }

    /// Returns a [`FullBuilder`] holding a copy of this string.
    pub fn builder(&self) -> FullBuilder {
        FullBuilder::from_parts(
            String::from(self.as_str()),
            self.data.runs.clone(),
            self.properties_at_end().clone(),
        )
    }

    /// Returns an [`IncrementalBuilder`] holding a copy of this string, with pending properties
    /// taken from its end.
    pub fn incremental_builder(&self) -> IncrementalBuilder {
        IncrementalBuilder::from_parts(
            String::from(self.as_str()),
            self.data.runs.clone(),
            self.properties_at_end().to_builder(),
        )
    }

    /// Hands out a scratch copy of the text that must be returned unchanged.
    pub fn lock_text(&self) -> TextLock<'_> {
        TextLock::new(self)
    }

    /// Returns `true` if both values share one allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }

    #[inline]
    pub(crate) fn normalized_flags(&self) -> &NormalizedFlags {
        &self.data.normalized
    }
}

impl PartialEq for RichString {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
            || (self.data.text == other.data.text && self.data.runs == other.data.runs)
    }
}

impl Eq for RichString {}

impl Hash for RichString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.text.hash(state);
        self.data.runs.hash(state);
    }
}

impl fmt::Debug for RichString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RichString");
        s.field("text", &self.as_str()).field("runs", &self.data.runs);
        if self.is_empty() {
            s.field("empty_props", &self.data.empty_props);
        }
        s.finish()
    }
}

impl fmt::Display for RichString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::RichString;
    use crate::{ErrorKind, Run};
    use alloc::vec;
    use text_properties::{IntPropKind, PropVariant, PropertiesBuilder, TextProperties};

    fn color(n: i32) -> TextProperties {
        let mut builder = PropertiesBuilder::new();
        builder.set_int(IntPropKind::ForeColor, PropVariant::Rgb, n);
        builder.build()
    }

    fn two_runs() -> RichString {
        RichString::from_parts("ab", vec![Run::new(1, color(1)), Run::new(2, color(2))]).unwrap()
    }

    #[test]
    fn substring_of_second_run() {
        let b = two_runs().substring(1..2).unwrap();
        assert_eq!(b.as_str(), "b");
        assert_eq!(b.run_count(), 1);
        assert_eq!(b.run(0).unwrap().props, &color(2));
        assert_eq!(b.run(0).unwrap().range, 0..1);
    }

    #[test]
    fn substring_of_whole_string_shares_allocation() {
        let s = two_runs();
        let whole = s.substring(0..2).unwrap();
        assert!(RichString::ptr_eq(&s, &whole));
    }

    #[test]
    fn substring_trims_edge_runs() {
        let s = RichString::from_parts(
            "abcdef",
            vec![Run::new(2, color(1)), Run::new(4, color(2)), Run::new(6, color(3))],
        )
        .unwrap();
        let mid = s.substring(1..5).unwrap();
        assert_eq!(mid.as_str(), "bcde");
        let ranges: Vec<_> = mid.runs().map(|r| r.range).collect();
        assert_eq!(ranges, [0..1, 1..3, 3..4]);
    }

    #[test]
    fn empty_substring_carries_properties() {
        let s = two_runs();
        let e = s.substring(1..1).unwrap();
        assert!(e.is_empty());
        assert_eq!(e.run_count(), 0);
        assert_eq!(e.properties_at_end(), &color(2));
    }

    #[test]
    #[expect(
        clippy::reversed_empty_ranges,
        reason = "We want an invalid range for testing."
    )]
    fn substring_rejects_bad_ranges() {
        let s = two_runs();
        assert_eq!(s.substring(0..3).unwrap_err().kind(), ErrorKind::InvalidBounds);
        assert_eq!(s.substring(2..1).unwrap_err().kind(), ErrorKind::InvalidRange);
        let e = RichString::new("é", color(1));
        assert_eq!(e.substring(0..1).unwrap_err().kind(), ErrorKind::NotOnCharBoundary);
    }

    #[test]
    fn run_lookup() {
        let s = two_runs();
        assert_eq!(s.run_at(0).unwrap().props, &color(1));
        assert_eq!(s.run_at(1).unwrap().props, &color(2));
        assert_eq!(s.run_at(2).unwrap().range, 1..2);
        let err = s.run_at(3).unwrap_err();
        assert!(err.kind().is_range_error());
        assert!(RichString::empty_with(color(1)).run_at(0).is_err());
    }

    #[test]
    fn from_parts_merges_equal_neighbors() {
        let s = RichString::from_parts(
            "abc",
            vec![Run::new(1, color(1)), Run::new(2, color(1)), Run::new(3, color(2))],
        )
        .unwrap();
        assert_eq!(s.run_count(), 2);
        assert_eq!(s.run(0).unwrap().range, 0..2);
    }

    #[test]
    fn from_parts_rejects_malformed_runs() {
        let kind = |runs: Vec<Run>| RichString::from_parts("abc", runs).unwrap_err().kind();
        assert_eq!(kind(vec![]), ErrorKind::InvalidArgument);
        assert_eq!(kind(vec![Run::new(2, color(1))]), ErrorKind::InvalidArgument);
        assert_eq!(kind(vec![Run::new(4, color(1))]), ErrorKind::InvalidBounds);
        assert_eq!(
            kind(vec![Run::new(2, color(1)), Run::new(1, color(2)), Run::new(3, color(1))]),
            ErrorKind::InvalidRange
        );
        assert_eq!(
            kind(vec![Run::new(1, color(1)), Run::new(1, color(2)), Run::new(3, color(1))]),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            RichString::from_parts("é", vec![Run::new(1, color(1)), Run::new(2, color(2))])
                .unwrap_err()
                .kind(),
            ErrorKind::NotOnCharBoundary
        );
        assert_eq!(
            RichString::from_parts("", vec![Run::new(1, color(1))])
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn parts_round_trip_including_empty() {
        let s = two_runs();
        let (text, runs) = s.to_parts();
        assert_eq!(RichString::from_parts(text, runs).unwrap(), s);

        let e = RichString::empty_with(color(5));
        let (text, runs) = e.to_parts();
        let back = RichString::from_parts(text, runs).unwrap();
        assert_eq!(back.properties_at_end(), &color(5));
    }

    #[test]
    fn equality_ignores_cache_and_allocation() {
        let a = two_runs();
        let b = two_runs();
        assert!(!RichString::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_ne!(a, RichString::new("ab", color(1)));
        assert_eq!(a.to_string(), "ab");
    }
}
