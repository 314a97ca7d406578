// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;
use alloc::string::String;

use super::NormalizationForm;

/// The Unicode facts normalization is built on.
///
/// Implementations must be pure: the same input always yields the same answer.
pub trait UnicodeService {
    /// Returns `true` if `text` is already in `form`.
    ///
    /// For [`NormalizationForm::Nfsc`] this answers for plain text, where it coincides with
    /// [`NormalizationForm::Nfc`].
    fn is_normalized(&self, text: &str, form: NormalizationForm) -> bool;

    /// Returns `text` in `form`, borrowing when it already is.
    fn normalize<'a>(&self, text: &'a str, form: NormalizationForm) -> Cow<'a, str>;

    /// Returns `true` if no character before `c` can interact with `c` or anything after it
    /// under any normalization form.
    fn has_boundary_before(&self, c: char) -> bool;

    /// Appends the full decomposition of `c` to `sink`: compatibility decomposition for the
    /// compatibility forms, canonical otherwise.
    fn decompose(&self, c: char, form: NormalizationForm, sink: &mut String);
}

impl<T: UnicodeService + ?Sized> UnicodeService for &T {
    fn is_normalized(&self, text: &str, form: NormalizationForm) -> bool {
        (**self).is_normalized(text, form)
    }

    fn normalize<'a>(&self, text: &'a str, form: NormalizationForm) -> Cow<'a, str> {
        (**self).normalize(text, form)
    }

    fn has_boundary_before(&self, c: char) -> bool {
        (**self).has_boundary_before(c)
    }

    fn decompose(&self, c: char, form: NormalizationForm, sink: &mut String) {
        (**self).decompose(c, form, sink);
    }
}

#[cfg(feature = "compiled_data")]
pub use icu::IcuUnicode;

#[cfg(feature = "compiled_data")]
mod icu {
    use alloc::borrow::Cow;
    use alloc::string::String;
    use std::sync::OnceLock;

    use hashbrown::HashSet;
    use icu_normalizer::properties::{
        CanonicalCombiningClassMapBorrowed, CanonicalDecompositionBorrowed, Decomposed,
    };
    use icu_normalizer::{ComposingNormalizerBorrowed, DecomposingNormalizerBorrowed};

    use super::UnicodeService;
    use crate::NormalizationForm;

    /// [`UnicodeService`] backed by the ICU4X normalizer and its compiled data.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct IcuUnicode;

    impl IcuUnicode {
        /// Creates the service. The underlying data is static.
        #[inline]
        pub const fn new() -> Self {
            Self
        }
    }

    impl UnicodeService for IcuUnicode {
        fn is_normalized(&self, text: &str, form: NormalizationForm) -> bool {
            match form {
                NormalizationForm::Nfd => DecomposingNormalizerBorrowed::new_nfd().is_normalized(text),
                NormalizationForm::Nfkd => {
                    DecomposingNormalizerBorrowed::new_nfkd().is_normalized(text)
                }
                NormalizationForm::Nfc | NormalizationForm::Nfsc => {
                    ComposingNormalizerBorrowed::new_nfc().is_normalized(text)
                }
                NormalizationForm::Nfkc => ComposingNormalizerBorrowed::new_nfkc().is_normalized(text),
            }
        }

        fn normalize<'a>(&self, text: &'a str, form: NormalizationForm) -> Cow<'a, str> {
            match form {
                NormalizationForm::Nfd => DecomposingNormalizerBorrowed::new_nfd().normalize(text),
                NormalizationForm::Nfkd => DecomposingNormalizerBorrowed::new_nfkd().normalize(text),
                NormalizationForm::Nfc | NormalizationForm::Nfsc => {
                    ComposingNormalizerBorrowed::new_nfc().normalize(text)
                }
                NormalizationForm::Nfkc => ComposingNormalizerBorrowed::new_nfkc().normalize(text),
            }
        }

        fn has_boundary_before(&self, c: char) -> bool {
            if c.is_ascii() {
                return true;
            }
            let ccc = CanonicalCombiningClassMapBorrowed::new();
            let mut buf = [0; 4];
            let encoded = c.encode_utf8(&mut buf);
            [NormalizationForm::Nfd, NormalizationForm::Nfkd]
                .into_iter()
                .all(|family| {
                    self.normalize(encoded, family)
                        .chars()
                        .next()
                        .is_some_and(|first| {
                            ccc.get_u8(first) == 0 && !backward_combining().contains(&first)
                        })
                })
        }

        fn decompose(&self, c: char, form: NormalizationForm, sink: &mut String) {
            let mut buf = [0; 4];
            sink.push_str(&self.normalize(c.encode_utf8(&mut buf), form.decomposition()));
        }
    }

    /// Starters that can compose with a preceding starter.
    ///
    /// These are the second halves of canonical pairs whose combining class is 0, plus the
    /// conjoining jamo vowels and trailing consonants.
    fn backward_combining() -> &'static HashSet<char> {
        static SET: OnceLock<HashSet<char>> = OnceLock::new();
        SET.get_or_init(|| {
            let decompositions = CanonicalDecompositionBorrowed::new();
            let ccc = CanonicalCombiningClassMapBorrowed::new();
            let mut set: HashSet<char> = ('\u{1161}'..='\u{1175}')
                .chain('\u{11A8}'..='\u{11C2}')
                .collect();
            for c in '\0'..=char::MAX {
                if let Decomposed::Expansion(_, second) = decompositions.decompose(c) {
                    if ccc.get_u8(second) == 0 {
                        set.insert(second);
                    }
                }
            }
            log::debug!("derived {} backward-combining starters", set.len());
            set
        })
    }

    #[cfg(test)]
    mod tests {
        use super::{IcuUnicode, backward_combining};
        use crate::{NormalizationForm, UnicodeService};
        use alloc::string::String;

        #[test]
        fn boundaries() {
            let icu = IcuUnicode::new();
            assert!(icu.has_boundary_before('a'));
            assert!(icu.has_boundary_before('é'));
            assert!(icu.has_boundary_before('\u{1100}'));
            // Combining marks and jamo vowels attach to what precedes them.
            assert!(!icu.has_boundary_before('\u{301}'));
            assert!(!icu.has_boundary_before('\u{327}'));
            assert!(!icu.has_boundary_before('\u{1161}'));
        }

        #[test]
        fn backward_set_contains_known_starters() {
            let set = backward_combining();
            // Tamil AU length mark and Kannada length mark.
            assert!(set.contains(&'\u{0BD7}'));
            assert!(set.contains(&'\u{0CD5}'));
            assert!(set.contains(&'\u{11A8}'));
            assert!(!set.contains(&'a'));
        }

        #[test]
        fn per_char_decomposition_follows_the_family() {
            let icu = IcuUnicode::new();
            let mut sink = String::new();
            icu.decompose('\u{FB01}', NormalizationForm::Nfc, &mut sink);
            assert_eq!(sink, "\u{FB01}");
            sink.clear();
            icu.decompose('\u{FB01}', NormalizationForm::Nfkc, &mut sink);
            assert_eq!(sink, "fi");
            sink.clear();
            icu.decompose('é', NormalizationForm::Nfsc, &mut sink);
            assert_eq!(sink, "e\u{301}");
        }

        #[test]
        fn style_preserving_form_matches_nfc_on_plain_text() {
            let icu = IcuUnicode::new();
            assert_eq!(icu.normalize("e\u{301}", NormalizationForm::Nfsc), "é");
            assert!(icu.is_normalized("é", NormalizationForm::Nfsc));
            assert!(!icu.is_normalized("é", NormalizationForm::Nfd));
        }
    }
}
