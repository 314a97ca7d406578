// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style-preserving Unicode normalization.
//!
//! A string is cut into segments, maximal spans whose normalization cannot be computed
//! independently of their neighbors. Segments that are already normalized are copied with their
//! runs. A segment inside one run is normalized and takes that run's properties. A segment that
//! spans several runs is handled per form:
//!
//! - [`Nfd`](NormalizationForm::Nfd) and [`Nfkd`](NormalizationForm::Nfkd) decompose it and give
//!   every resulting codepoint the properties of the character it came from, even when canonical
//!   reordering moves it across a run boundary.
//! - [`Nfsc`](NormalizationForm::Nfsc) composes only the part inside the run of its base
//!   character and copies the rest as is, so characters with different properties never merge.
//! - [`Nfc`](NormalizationForm::Nfc) and [`Nfkc`](NormalizationForm::Nfkc) normalize it under
//!   the properties of its first run. Style is only kept on a best-effort basis in these forms.
//!
//! Offsets into the input can be carried along. A caret on a precomposed character lands on its
//! base character, and an offset inside a multi-byte character resolves like the start of that
//! character.

mod align;
mod engine;
mod form;
mod offsets;
mod service;

pub use form::NormalizationForm;
#[cfg(feature = "compiled_data")]
pub use service::IcuUnicode;
pub use service::UnicodeService;

use crate::RichString;

impl RichString {
    /// Returns `true` if this string is in `form`, according to `svc`.
    ///
    /// For [`NormalizationForm::Nfsc`] the answer comes from normalizing and comparing unless the
    /// text is already plain NFC. A positive answer is cached on this string.
    pub fn is_normalized_with<S: UnicodeService + ?Sized>(
        &self,
        svc: &S,
        form: NormalizationForm,
    ) -> bool {
        let flags = self.normalized_flags();
        if flags.contains(form) {
            return true;
        }
        let normalized = self.is_empty()
            || match form {
                NormalizationForm::Nfsc => {
                    svc.is_normalized(self.as_str(), NormalizationForm::Nfc)
                        || self.normalized_with(svc, form) == *self
                }
                _ => svc.is_normalized(self.as_str(), form),
            };
        if normalized {
            flags.mark(form);
        }
        normalized
    }

    /// Returns this string in `form`, using `svc`.
    ///
    /// The result remembers that it is in `form`, so asking again is free.
    pub fn normalized_with<S: UnicodeService + ?Sized>(
        &self,
        svc: &S,
        form: NormalizationForm,
    ) -> Self {
        engine::normalize(self, svc, form, &mut [])
    }

    /// Returns this string in `form`, rewriting `offsets` from positions in this string to
    /// positions in the result.
    ///
    /// Every offset yields a valid position: offsets past the end map to the end, and offsets
    /// with no counterpart fall back to the nearest earlier one, or 0.
    pub fn normalize_and_remap_offsets_with<S: UnicodeService + ?Sized>(
        &self,
        svc: &S,
        form: NormalizationForm,
        offsets: &mut [usize],
    ) -> Self {
        engine::normalize(self, svc, form, offsets)
    }
}

#[cfg(feature = "compiled_data")]
impl RichString {
    /// Returns `true` if this string is in `form`.
    ///
    /// See [`is_normalized_with`](Self::is_normalized_with).
    pub fn is_normalized(&self, form: NormalizationForm) -> bool {
        self.is_normalized_with(&IcuUnicode::new(), form)
    }

    /// Returns this string in `form`.
    ///
    /// ```
    /// use rich_string::{NormalizationForm, RichString};
    /// use text_properties::TextProperties;
    ///
    /// let s = RichString::new("cafe\u{301}", TextProperties::new());
    /// let nfc = s.normalized(NormalizationForm::Nfc);
    /// assert_eq!(nfc.as_str(), "café");
    /// assert!(nfc.is_normalized(NormalizationForm::Nfc));
    /// ```
    pub fn normalized(&self, form: NormalizationForm) -> Self {
        self.normalized_with(&IcuUnicode::new(), form)
    }

    /// Returns this string in `form`, rewriting `offsets` to match.
    ///
    /// See [`normalize_and_remap_offsets_with`](Self::normalize_and_remap_offsets_with).
    pub fn normalize_and_remap_offsets(
        &self,
        form: NormalizationForm,
        offsets: &mut [usize],
    ) -> Self {
        self.normalize_and_remap_offsets_with(&IcuUnicode::new(), form, offsets)
    }
}
