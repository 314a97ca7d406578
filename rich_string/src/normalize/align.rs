// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character correspondence between a segment and its normalized rendition.
//!
//! Each source character is decomposed on its own and every resulting codepoint claims the
//! first unclaimed equal codepoint of the whole-segment decomposition. Claiming each candidate
//! at most once keeps repeated marks paired with the character they came from, even after
//! canonical reordering has moved them.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use smallvec::{SmallVec, smallvec};

use super::{NormalizationForm, UnicodeService};

pub(crate) struct Alignment {
    /// Byte offset and value of every codepoint of the whole-segment decomposition.
    full: Vec<(usize, char)>,
    /// Byte offset of each source character, with the indices into `full` it claimed in
    /// decomposition order.
    sources: Vec<(usize, SmallVec<[usize; 4]>)>,
}

impl Alignment {
    /// Aligns `segment` against `full`, its decomposition in `family`.
    pub(crate) fn new<S: UnicodeService + ?Sized>(
        svc: &S,
        segment: &str,
        full: &str,
        family: NormalizationForm,
    ) -> Self {
        let full: Vec<_> = full.char_indices().collect();
        let mut claimed: SmallVec<[bool; 16]> = smallvec![false; full.len()];
        let mut scratch = String::new();
        let sources = segment
            .char_indices()
            .map(|(offset, c)| {
                scratch.clear();
                svc.decompose(c, family, &mut scratch);
                (offset, claim(&full, &mut claimed, &scratch))
            })
            .collect();
        Self { full, sources }
    }

    /// Byte range of decomposed codepoint `ix`.
    pub(crate) fn full_range(&self, ix: usize) -> Range<usize> {
        let (offset, c) = self.full[ix];
        offset..offset + c.len_utf8()
    }

    /// Each source character's offset with the decomposed codepoints it produced.
    pub(crate) fn sources(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.sources
            .iter()
            .map(|(offset, claimed)| (*offset, claimed.as_slice()))
    }

    /// Maps each source offset to the decomposition offset of its first codepoint.
    pub(crate) fn decomposed_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sources
            .iter()
            .filter_map(|(offset, claimed)| Some((*offset, self.full[*claimed.first()?].0)))
    }

    /// Maps each source offset to the offset in `composed` of the character that absorbed its
    /// first decomposed codepoint.
    ///
    /// `composed` must be a composition of the decomposition this alignment was built on.
    pub(crate) fn composed_offsets<S: UnicodeService + ?Sized>(
        &self,
        svc: &S,
        composed: &str,
        family: NormalizationForm,
    ) -> Vec<(usize, usize)> {
        let mut claimed: SmallVec<[bool; 16]> = smallvec![false; self.full.len()];
        let mut owner: SmallVec<[Option<usize>; 16]> = smallvec![None; self.full.len()];
        let mut scratch = String::new();
        for (offset, c) in composed.char_indices() {
            scratch.clear();
            svc.decompose(c, family, &mut scratch);
            for ix in claim(&self.full, &mut claimed, &scratch) {
                owner[ix] = Some(offset);
            }
        }
        self.sources
            .iter()
            .filter_map(|(offset, claimed)| Some((*offset, owner[*claimed.first()?]?)))
            .collect()
    }
}

fn claim(full: &[(usize, char)], claimed: &mut [bool], chars: &str) -> SmallVec<[usize; 4]> {
    chars
        .chars()
        .filter_map(|c| {
            let ix = full
                .iter()
                .zip(claimed.iter())
                .position(|(&(_, f), &taken)| !taken && f == c)?;
            claimed[ix] = true;
            Some(ix)
        })
        .collect()
}

#[cfg(all(test, feature = "compiled_data"))]
mod tests {
    use super::Alignment;
    use crate::{IcuUnicode, NormalizationForm, UnicodeService};
    use alloc::vec::Vec;

    #[test]
    fn reordered_marks_follow_their_source() {
        let icu = IcuUnicode::new();
        // Cedilla (230 > 202) is reordered ahead of the acute.
        let segment = "e\u{301}\u{327}";
        let full = icu.normalize(segment, NormalizationForm::Nfd);
        assert_eq!(full, "e\u{327}\u{301}");
        let alignment = Alignment::new(&icu, segment, &full, NormalizationForm::Nfd);
        let claimed: Vec<_> = alignment.sources().map(|(o, c)| (o, c.to_vec())).collect();
        assert_eq!(claimed, [(0, [0].to_vec()), (1, [2].to_vec()), (3, [1].to_vec())]);
        assert_eq!(alignment.full_range(2), 3..5);
    }

    #[test]
    fn precomposed_source_maps_to_its_base() {
        let icu = IcuUnicode::new();
        let segment = "\u{1E09}\u{301}";
        let full = icu.normalize(segment, NormalizationForm::Nfd);
        let alignment = Alignment::new(&icu, segment, &full, NormalizationForm::Nfd);
        let offsets: Vec<_> = alignment.decomposed_offsets().collect();
        // c + cedilla + acute, then the second acute.
        assert_eq!(offsets, [(0, 0), (3, 5)]);
    }

    #[test]
    fn composed_offsets_point_at_the_absorbing_character() {
        let icu = IcuUnicode::new();
        let segment = "e\u{301}";
        let full = icu.normalize(segment, NormalizationForm::Nfd);
        let alignment = Alignment::new(&icu, segment, &full, NormalizationForm::Nfd);
        let offsets = alignment.composed_offsets(&icu, "é", NormalizationForm::Nfd);
        assert_eq!(offsets, [(0, 0), (1, 0)]);
    }
}
