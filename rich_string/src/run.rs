// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run lists.
//!
//! A run list is an ordered `Vec<Run>` keyed only by exclusive end offset. A run's start is the
//! previous run's limit, or 0. A well-formed list for text of length `len` has strictly
//! increasing limits, ends at `len`, and never has two adjacent runs with equal properties.

use alloc::vec::Vec;
use core::ops::Range;

use text_properties::TextProperties;

/// A span of text sharing one set of properties, identified by its exclusive end offset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    pub(crate) limit: usize,
    pub(crate) props: TextProperties,
}

impl Run {
    /// Creates a run ending at byte offset `limit`.
    #[inline]
    pub fn new(limit: usize, props: TextProperties) -> Self {
        Self { limit, props }
    }

    /// The exclusive end byte offset of the run.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The properties of the run.
    #[inline]
    pub fn props(&self) -> &TextProperties {
        &self.props
    }
}

/// A run together with its resolved byte range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunInfo<'a> {
    /// The byte range covered by the run.
    pub range: Range<usize>,
    /// The properties of the run.
    pub props: &'a TextProperties,
}

/// Start offset of run `ix`.
#[inline]
pub(crate) fn run_start(runs: &[Run], ix: usize) -> usize {
    if ix == 0 { 0 } else { runs[ix - 1].limit }
}

/// Index of the run covering `index`. An index at the text length reports the last run.
///
/// `runs` must not be empty.
#[inline]
pub(crate) fn run_index_containing(runs: &[Run], index: usize) -> usize {
    debug_assert!(!runs.is_empty(), "no run covers an empty text");
    runs.partition_point(|run| run.limit <= index)
        .min(runs.len() - 1)
}

/// Drops empty runs and merges adjacent runs with equal properties.
pub(crate) fn coalesce(runs: &mut Vec<Run>) {
    let mut write = 0;
    let mut prev_limit = 0;
    for read in 0..runs.len() {
        let limit = runs[read].limit;
        if limit == prev_limit {
            continue;
        }
        prev_limit = limit;
        if write > 0 && runs[write - 1].props == runs[read].props {
            runs[write - 1].limit = limit;
            continue;
        }
        runs.swap(write, read);
        write += 1;
    }
    runs.truncate(write);
}

/// Replaces the runs covering `range` with `inserted`, a sequence of `(length, props)` pieces.
///
/// Runs after the range are shifted by the difference between the inserted and removed lengths.
/// The list is coalesced afterwards, so equal properties at either edge merge into their
/// neighbor.
pub(crate) fn splice<I>(runs: &mut Vec<Run>, range: Range<usize>, inserted: I)
where
    I: IntoIterator<Item = (usize, TextProperties)>,
{
    let mut out = Vec::with_capacity(runs.len() + 2);

    let mut start = 0;
    for run in runs.iter() {
        if start >= range.start {
            break;
        }
        out.push(Run::new(run.limit.min(range.start), run.props.clone()));
        start = run.limit;
    }

    let mut pos = range.start;
    for (len, props) in inserted {
        pos += len;
        out.push(Run::new(pos, props));
    }

    for run in runs.iter().filter(|run| run.limit > range.end) {
        out.push(Run::new(run.limit - range.end + pos, run.props.clone()));
    }

    coalesce(&mut out);
    *runs = out;
}

/// The `(length, props)` pieces of the runs intersecting `range`, clipped to it.
pub(crate) fn pieces(
    runs: &[Run],
    range: Range<usize>,
) -> impl Iterator<Item = (usize, TextProperties)> + '_ {
    let mut start = 0;
    runs.iter().filter_map(move |run| {
        let lo = start.max(range.start);
        let hi = run.limit.min(range.end);
        start = run.limit;
        (lo < hi).then(|| (hi - lo, run.props.clone()))
    })
}

/// Checks the run-list invariants against a text of length `len`.
pub(crate) fn is_well_formed(runs: &[Run], len: usize) -> bool {
    if len == 0 {
        return runs.is_empty();
    }
    let mut prev: Option<&Run> = None;
    for run in runs {
        if let Some(prev) = prev {
            if run.limit <= prev.limit || run.props == prev.props {
                return false;
            }
        } else if run.limit == 0 {
            return false;
        }
        prev = Some(run);
    }
    prev.is_some_and(|last| last.limit == len)
}

#[cfg(test)]
mod tests {
    use super::{Run, coalesce, is_well_formed, pieces, run_index_containing, splice};
    use alloc::vec;
    use alloc::vec::Vec;
    use text_properties::{IntPropKind, PropVariant, PropertiesBuilder, TextProperties};

    fn props(n: i32) -> TextProperties {
        let mut builder = PropertiesBuilder::new();
        builder.set_int(IntPropKind::ForeColor, PropVariant::Rgb, n);
        builder.build()
    }

    fn limits(runs: &[Run]) -> Vec<(usize, i32)> {
        runs.iter()
            .map(|r| (r.limit(), r.props().int(IntPropKind::ForeColor).unwrap().value))
            .collect()
    }

    #[test]
    fn coalesce_merges_and_drops_empty() {
        let mut runs = vec![
            Run::new(0, props(9)),
            Run::new(2, props(1)),
            Run::new(4, props(1)),
            Run::new(4, props(2)),
            Run::new(6, props(3)),
            Run::new(8, props(3)),
        ];
        coalesce(&mut runs);
        assert_eq!(limits(&runs), [(4, 1), (8, 3)]);
        assert!(is_well_formed(&runs, 8));
    }

    #[test]
    fn splice_inside_a_run_splits_it() {
        let mut runs = vec![Run::new(6, props(1))];
        splice(&mut runs, 2..4, [(3, props(2))]);
        assert_eq!(limits(&runs), [(2, 1), (5, 2), (7, 1)]);
    }

    #[test]
    fn splice_merges_with_matching_neighbors() {
        let mut runs = vec![Run::new(2, props(1)), Run::new(4, props(2))];
        splice(&mut runs, 2..3, [(1, props(1))]);
        assert_eq!(limits(&runs), [(3, 1), (4, 2)]);

        splice(&mut runs, 3..4, [(5, props(1))]);
        assert_eq!(limits(&runs), [(8, 1)]);
    }

    #[test]
    fn splice_deletion_across_runs() {
        let mut runs = vec![
            Run::new(2, props(1)),
            Run::new(4, props(2)),
            Run::new(6, props(1)),
        ];
        splice(&mut runs, 1..5, []);
        assert_eq!(limits(&runs), [(2, 1)]);

        splice(&mut runs, 0..2, []);
        assert!(runs.is_empty());
    }

    #[test]
    fn splice_at_the_ends() {
        let mut runs = vec![Run::new(2, props(1))];
        splice(&mut runs, 0..0, [(1, props(2))]);
        splice(&mut runs, 3..3, [(1, props(3))]);
        assert_eq!(limits(&runs), [(1, 2), (3, 1), (4, 3)]);
    }

    #[test]
    fn pieces_clip_to_range() {
        let runs = vec![
            Run::new(2, props(1)),
            Run::new(5, props(2)),
            Run::new(9, props(3)),
        ];
        let got: Vec<_> = pieces(&runs, 1..6).map(|(len, _)| len).collect();
        assert_eq!(got, [1, 3, 1]);
        assert_eq!(pieces(&runs, 5..5).count(), 0);
    }

    #[test]
    fn run_lookup() {
        let runs = vec![Run::new(2, props(1)), Run::new(5, props(2))];
        assert_eq!(run_index_containing(&runs, 0), 0);
        assert_eq!(run_index_containing(&runs, 1), 0);
        assert_eq!(run_index_containing(&runs, 2), 1);
        assert_eq!(run_index_containing(&runs, 5), 1);
    }

    #[test]
    fn well_formedness() {
        assert!(is_well_formed(&[], 0));
        assert!(!is_well_formed(&[], 3));
        assert!(!is_well_formed(&[Run::new(2, props(1))], 3));
        assert!(!is_well_formed(
            &[Run::new(1, props(1)), Run::new(3, props(1))],
            3
        ));
        assert!(!is_well_formed(
            &[Run::new(2, props(1)), Run::new(2, props(2))],
            2
        ));
    }
}
