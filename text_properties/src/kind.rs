// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed vocabulary of property kinds and variants.
//!
//! Codes are part of the interchange contract with the serialization layer. Never renumber an
//! existing kind; append new ones.

use crate::PropertyError;

/// The kind of an integer-valued property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[non_exhaustive]
pub enum IntPropKind {
    /// The writing system of the text. See [`WritingSystem`](crate::WritingSystem).
    WritingSystem,
    /// Font size.
    FontSize,
    /// Font weight (or a toggle, depending on the variant).
    Bold,
    /// Italic toggle.
    Italic,
    /// Underline style.
    Underline,
    /// Foreground color, as packed RGB.
    ForeColor,
    /// Background color, as packed RGB.
    BackColor,
    /// Superscript/subscript selector.
    Superscript,
    /// Baseline offset.
    Offset,
    /// Horizontal character scale, in percent.
    CharScale,
    /// Extra inter-character spacing.
    Spacing,
    /// Right-to-left paragraph or run direction.
    RightToLeft,
}

impl IntPropKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 12] = [
        Self::WritingSystem,
        Self::FontSize,
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::ForeColor,
        Self::BackColor,
        Self::Superscript,
        Self::Offset,
        Self::CharScale,
        Self::Spacing,
        Self::RightToLeft,
    ];

    /// Returns the stable interchange code of this kind.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::WritingSystem => 1,
            Self::FontSize => 2,
            Self::Bold => 3,
            Self::Italic => 4,
            Self::Underline => 5,
            Self::ForeColor => 6,
            Self::BackColor => 7,
            Self::Superscript => 8,
            Self::Offset => 9,
            Self::CharScale => 10,
            Self::Spacing => 11,
            Self::RightToLeft => 12,
        }
    }

    /// Looks up a kind by its interchange code.
    pub fn from_code(code: u16) -> Result<Self, PropertyError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(PropertyError::unknown_int_kind(code))
    }
}

/// The kind of a string-valued property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[non_exhaustive]
pub enum StrPropKind {
    /// Font family name.
    FontFamily,
    /// Name of a style sheet entry the run is tagged with.
    NamedStyle,
    /// Font variation settings, in the host's textual syntax.
    FontVariations,
    /// Embedded object data (links, pictures, footnote anchors).
    ObjectData,
    /// Opaque application tags.
    Tags,
}

impl StrPropKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 5] = [
        Self::FontFamily,
        Self::NamedStyle,
        Self::FontVariations,
        Self::ObjectData,
        Self::Tags,
    ];

    /// Returns the stable interchange code of this kind.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::FontFamily => 1,
            Self::NamedStyle => 2,
            Self::FontVariations => 3,
            Self::ObjectData => 4,
            Self::Tags => 5,
        }
    }

    /// Looks up a kind by its interchange code.
    pub fn from_code(code: u16) -> Result<Self, PropertyError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(PropertyError::unknown_str_kind(code))
    }
}

/// How the value of an integer property is to be read.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[non_exhaustive]
pub enum PropVariant {
    /// No particular unit.
    #[default]
    Default,
    /// Thousandths of a point.
    MilliPoint,
    /// Relative to the inherited value, in thousandths.
    Relative,
    /// One value of an enumeration.
    Enum,
    /// On/off, with `0` for off and anything else for on.
    Toggle,
    /// Packed `0x00BBGGRR` color.
    Rgb,
}

impl PropVariant {
    /// Every variant, in code order.
    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::MilliPoint,
        Self::Relative,
        Self::Enum,
        Self::Toggle,
        Self::Rgb,
    ];

    /// Returns the stable interchange code of this variant.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::MilliPoint => 1,
            Self::Relative => 2,
            Self::Enum => 3,
            Self::Toggle => 4,
            Self::Rgb => 5,
        }
    }

    /// Looks up a variant by its interchange code.
    pub fn from_code(code: u8) -> Result<Self, PropertyError> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.code() == code)
            .ok_or(PropertyError::unknown_variant(code))
    }
}
