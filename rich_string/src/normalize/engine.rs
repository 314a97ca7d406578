// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::iter;
use core::ops::Range;

use text_properties::TextProperties;

use super::align::Alignment;
use super::offsets::OffsetMap;
use super::{NormalizationForm, UnicodeService};
use crate::range::floor_char_boundary;
use crate::run;
use crate::{FullBuilder, RichString};

/// Normalizes `source` to `form`, rewriting `offsets` from input to output positions.
pub(crate) fn normalize<S: UnicodeService + ?Sized>(
    source: &RichString,
    svc: &S,
    form: NormalizationForm,
    offsets: &mut [usize],
) -> RichString {
    let flags = source.normalized_flags();
    if flags.contains(form) || source.is_empty() {
        log::trace!("{form:?}: cached, {} bytes", source.len());
        clamp(offsets, source.as_str());
        return marked(source.clone(), form);
    }
    if form == NormalizationForm::Nfsc && !flags.contains(NormalizationForm::Nfd) {
        let decomposed = normalize(source, svc, NormalizationForm::Nfd, offsets);
        return normalize(&decomposed, svc, NormalizationForm::Nfsc, offsets);
    }
    if svc.is_normalized(source.as_str(), plain_form(form)) {
        log::trace!("{form:?}: already normalized, {} bytes", source.len());
        clamp(offsets, source.as_str());
        return marked(source.clone(), form);
    }

    let text = source.as_str();
    let mut pass = Pass {
        source,
        svc,
        form,
        out: FullBuilder::new(),
        map: (!offsets.is_empty()).then(|| OffsetMap::new(text.len())),
    };
    let mut start = 0;
    let mut segments = 0_usize;
    for end in segment_limits(text, svc) {
        pass.segment(start..end);
        start = end;
        segments += 1;
    }
    log::trace!(
        "{form:?}: {} bytes in {segments} segments to {} bytes",
        text.len(),
        pass.out.len()
    );
    if let Some(mut map) = pass.map.take() {
        map.finish(pass.out.len());
        map.remap(offsets);
    }
    marked(pass.out.build(), form)
}

/// The form to ask of the service about plain text.
fn plain_form(form: NormalizationForm) -> NormalizationForm {
    match form {
        NormalizationForm::Nfsc => NormalizationForm::Nfc,
        other => other,
    }
}

fn marked(s: RichString, form: NormalizationForm) -> RichString {
    s.normalized_flags().mark(form);
    s
}

/// Offsets into an unchanged text: past the end becomes the end, and offsets inside a character
/// move to its start.
fn clamp(offsets: &mut [usize], text: &str) {
    for offset in offsets {
        *offset = floor_char_boundary(text, (*offset).min(text.len()));
    }
}

/// Exclusive ends of the normalization segments of `text`. Never yields 0 and always ends
/// with the length.
fn segment_limits<'a, S: UnicodeService + ?Sized>(
    text: &'a str,
    svc: &'a S,
) -> impl Iterator<Item = usize> + 'a {
    text.char_indices()
        .skip(1)
        .filter(move |&(_, c)| svc.has_boundary_before(c))
        .map(|(ix, _)| ix)
        .chain(iter::once(text.len()))
}

struct Pass<'a, S: ?Sized> {
    source: &'a RichString,
    svc: &'a S,
    form: NormalizationForm,
    out: FullBuilder,
    map: Option<OffsetMap>,
}

impl<S: UnicodeService + ?Sized> Pass<'_, S> {
    fn segment(&mut self, range: Range<usize>) {
        let source = self.source;
        let runs = source.raw_runs();
        let ix = run::run_index_containing(runs, range.start);
        let run_end = runs[ix].limit;
        let props = &runs[ix].props;

        if self
            .svc
            .is_normalized(&source.as_str()[range.clone()], plain_form(self.form))
        {
            self.copy(range);
            return;
        }
        if range.end <= run_end {
            self.normalize_into(range, props);
            return;
        }
        match self.form {
            NormalizationForm::Nfd | NormalizationForm::Nfkd => self.decompose_straddling(range, ix),
            NormalizationForm::Nfsc => {
                // Composition stops where the base character's run ends.
                self.normalize_into(range.start..run_end, props);
                self.copy(run_end..range.end);
            }
            NormalizationForm::Nfc | NormalizationForm::Nfkc => self.normalize_into(range, props),
        }
    }

    /// Appends `range` of the source unchanged, keeping its runs.
    fn copy(&mut self, range: Range<usize>) {
        let base = self.out.len();
        self.out.push_rich(self.source, range.clone());
        if let Some(map) = &mut self.map {
            for (offset, _) in self.source.as_str()[range.clone()].char_indices() {
                map.record(range.start + offset, base + offset);
            }
        }
    }

    /// Appends `range` of the source normalized, all of it carrying `props`.
    fn normalize_into(&mut self, range: Range<usize>, props: &TextProperties) {
        let segment = &self.source.as_str()[range.clone()];
        let normalized = self.svc.normalize(segment, plain_form(self.form));
        let base = self.out.len();
        self.out.push_str(&normalized, props);

        let Some(map) = &mut self.map else {
            return;
        };
        let family = self.form.decomposition();
        if self.form.is_decomposed() {
            let alignment = Alignment::new(self.svc, segment, &normalized, family);
            for (offset, output) in alignment.decomposed_offsets() {
                map.record(range.start + offset, base + output);
            }
        } else {
            let full = self.svc.normalize(segment, family);
            let alignment = Alignment::new(self.svc, segment, &full, family);
            for (offset, output) in alignment.composed_offsets(self.svc, &normalized, family) {
                map.record(range.start + offset, base + output);
            }
        }
    }

    /// Decomposes a segment spanning several runs, giving every output codepoint the
    /// properties of the source character it came from.
    fn decompose_straddling(&mut self, range: Range<usize>, first_run: usize) {
        let source = self.source;
        let runs = source.raw_runs();
        let segment = &source.as_str()[range.clone()];
        let full = self.svc.normalize(segment, self.form);
        let base = self.out.len();
        let first_props = &runs[first_run].props;
        self.out.push_str(&full, first_props);

        let alignment = Alignment::new(self.svc, segment, &full, self.form);
        for (offset, claimed) in alignment.sources() {
            if let (Some(map), Some(&first)) = (&mut self.map, claimed.first()) {
                map.record(range.start + offset, base + alignment.full_range(first).start);
            }
            let props = &runs[run::run_index_containing(runs, range.start + offset)].props;
            if props == first_props {
                continue;
            }
            for &ix in claimed {
                let span = alignment.full_range(ix);
                self.out
                    .overwrite_properties(base + span.start..base + span.end, props);
            }
        }
        log::trace!(
            "{:?}: relabeled segment {range:?} across {} runs",
            self.form,
            run::run_index_containing(runs, range.end - 1) - first_run + 1
        );
    }
}

#[cfg(all(test, feature = "compiled_data"))]
mod tests {
    use super::segment_limits;
    use crate::IcuUnicode;
    use alloc::vec::Vec;

    #[test]
    fn segments_end_at_the_length_and_skip_zero() {
        let icu = IcuUnicode::new();
        let limits: Vec<_> = segment_limits("ae\u{301}\u{327}b", &icu).collect();
        assert_eq!(limits, [1, 6, 7]);
        let limits: Vec<_> = segment_limits("\u{301}", &icu).collect();
        assert_eq!(limits, [2]);
    }
}
