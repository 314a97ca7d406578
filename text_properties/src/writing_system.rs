// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// An opaque writing-system identifier.
///
/// Writing systems are allocated by the host application (one per language/script/orthography
/// combination it knows about). This crate only compares and hashes them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct WritingSystem(u32);

impl WritingSystem {
    /// Creates a writing system from its raw identifier.
    #[must_use]
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    #[inline(always)]
    pub const fn id(self) -> u32 {
        self.0
    }

    // Property values are stored as `i32`; identifiers round-trip through the bit pattern.
    #[inline(always)]
    pub(crate) const fn to_value(self) -> i32 {
        self.0.cast_signed()
    }

    #[inline(always)]
    pub(crate) const fn from_value(value: i32) -> Self {
        Self(value.cast_unsigned())
    }
}

impl fmt::Debug for WritingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WritingSystem").field(&self.0).finish()
    }
}

impl fmt::Display for WritingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws{}", self.0)
    }
}

impl From<u32> for WritingSystem {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
