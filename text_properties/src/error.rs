// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// An error returned when replaying a raw, tagged property encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyError {
    kind: PropertyErrorKind,
    code: u32,
}

impl PropertyError {
    /// The category of this error.
    pub fn kind(&self) -> PropertyErrorKind {
        self.kind
    }

    /// The offending raw code.
    pub fn code(&self) -> u32 {
        self.code
    }

    pub(crate) fn unknown_int_kind(code: u16) -> Self {
        Self {
            kind: PropertyErrorKind::UnknownIntKind,
            code: code.into(),
        }
    }

    pub(crate) fn unknown_str_kind(code: u16) -> Self {
        Self {
            kind: PropertyErrorKind::UnknownStrKind,
            code: code.into(),
        }
    }

    pub(crate) fn unknown_variant(code: u8) -> Self {
        Self {
            kind: PropertyErrorKind::UnknownVariant,
            code: code.into(),
        }
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PropertyErrorKind::UnknownIntKind => {
                write!(f, "unknown integer property kind {}", self.code)
            }
            PropertyErrorKind::UnknownStrKind => {
                write!(f, "unknown string property kind {}", self.code)
            }
            PropertyErrorKind::UnknownVariant => {
                write!(f, "unknown property variant {}", self.code)
            }
        }
    }
}

impl core::error::Error for PropertyError {}

/// The non-exhaustive category of a [`PropertyError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PropertyErrorKind {
    /// The code does not name an [`IntPropKind`](crate::IntPropKind).
    UnknownIntKind,

    /// The code does not name a [`StrPropKind`](crate::StrPropKind).
    UnknownStrKind,

    /// The code does not name a [`PropVariant`](crate::PropVariant).
    UnknownVariant,
}
