// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Error;

/// A Unicode normalization form, plus the style-preserving composed form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NormalizationForm {
    /// Canonical decomposition (NFD).
    Nfd,
    /// Compatibility decomposition (NFKD).
    Nfkd,
    /// Canonical decomposition followed by canonical composition (NFC).
    Nfc,
    /// Compatibility decomposition followed by canonical composition (NFKC).
    Nfkc,
    /// Canonical composition that never merges characters carrying different properties.
    ///
    /// On plain text this is the same as [`Nfc`](Self::Nfc).
    Nfsc,
}

impl NormalizationForm {
    /// Every form, in code order.
    pub const ALL: [Self; 5] = [Self::Nfd, Self::Nfkd, Self::Nfc, Self::Nfkc, Self::Nfsc];

    /// Returns the stable interchange code of this form.
    ///
    /// Code `0` is reserved for "no normalization" and is never returned.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Nfd => 1,
            Self::Nfkd => 2,
            Self::Nfc => 3,
            Self::Nfkc => 4,
            Self::Nfsc => 5,
        }
    }

    /// Looks up a form by its interchange code.
    ///
    /// The reserved code `0` and codes past the last form are rejected with
    /// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument).
    pub fn from_code(code: u8) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|form| form.code() == code)
            .ok_or(Error::invalid_argument("undefined normalization form"))
    }

    /// Returns `true` for the compatibility forms.
    #[must_use]
    pub const fn is_compatibility(self) -> bool {
        matches!(self, Self::Nfkd | Self::Nfkc)
    }

    /// Returns `true` for the decomposed forms.
    #[must_use]
    pub const fn is_decomposed(self) -> bool {
        matches!(self, Self::Nfd | Self::Nfkd)
    }

    /// The decomposed form of the same family.
    #[must_use]
    pub const fn decomposition(self) -> Self {
        if self.is_compatibility() {
            Self::Nfkd
        } else {
            Self::Nfd
        }
    }

    #[inline]
    pub(crate) const fn bit(self) -> u8 {
        1 << (self.code() - 1)
    }

    /// The bit of this form together with those of every form it implies.
    pub(crate) const fn implied_bits(self) -> u8 {
        match self {
            Self::Nfd => Self::Nfd.bit(),
            Self::Nfkd => Self::Nfkd.bit() | Self::Nfd.bit(),
            Self::Nfsc => Self::Nfsc.bit(),
            Self::Nfc => Self::Nfc.bit() | Self::Nfsc.bit(),
            Self::Nfkc => Self::Nfkc.bit() | Self::Nfc.bit() | Self::Nfsc.bit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NormalizationForm;
    use crate::ErrorKind;

    #[test]
    fn sentinel_codes_are_invalid() {
        for code in [0, 6, 255] {
            let err = NormalizationForm::from_code(code).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(err.to_string().contains("normalization form"));
        }
        for form in NormalizationForm::ALL {
            assert_eq!(NormalizationForm::from_code(form.code()), Ok(form));
        }
    }

    #[test]
    fn implications() {
        use NormalizationForm::*;
        let implies = |a: NormalizationForm, b: NormalizationForm| a.implied_bits() & b.bit() != 0;
        assert!(implies(Nfkd, Nfd));
        assert!(!implies(Nfd, Nfkd));
        assert!(implies(Nfkc, Nfc));
        assert!(implies(Nfkc, Nfsc));
        assert!(implies(Nfc, Nfsc));
        assert!(!implies(Nfsc, Nfc));
        assert!(!implies(Nfc, Nfd));
    }
}
