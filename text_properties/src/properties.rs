// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::{IntPropKind, PropVariant, PropertiesBuilder, StrPropKind, WritingSystem};

/// One integer property: a kind, how to read the value, and the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntProperty {
    /// What the property controls.
    pub kind: IntPropKind,
    /// The unit or interpretation of `value`.
    pub variant: PropVariant,
    /// The raw value.
    pub value: i32,
}

impl IntProperty {
    /// Creates a new integer property.
    pub const fn new(kind: IntPropKind, variant: PropVariant, value: i32) -> Self {
        Self {
            kind,
            variant,
            value,
        }
    }
}

/// One string property.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StrProperty {
    /// What the property controls.
    pub kind: StrPropKind,
    /// The value. Never empty; an empty value means "unset".
    pub value: Arc<str>,
}

#[derive(PartialEq, Eq, Hash, Default)]
struct PropertiesData {
    // Both sorted by kind, at most one entry per kind.
    ints: Vec<IntProperty>,
    strs: Vec<StrProperty>,
}

/// An immutable set of style attributes.
///
/// Cloning is a reference count increment. Equality and hashing look at the attributes, not at
/// the allocation, so values built independently still compare equal.
#[derive(Clone, Default)]
pub struct TextProperties {
    data: Arc<PropertiesData>,
}

impl TextProperties {
    /// Returns a value with no attributes set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_sorted(ints: Vec<IntProperty>, strs: Vec<StrProperty>) -> Self {
        debug_assert!(
            ints.windows(2).all(|w| w[0].kind < w[1].kind),
            "integer properties must be sorted and unique"
        );
        debug_assert!(
            strs.windows(2).all(|w| w[0].kind < w[1].kind),
            "string properties must be sorted and unique"
        );
        Self {
            data: Arc::new(PropertiesData { ints, strs }),
        }
    }

    /// Returns the integer property of the given kind, if set.
    pub fn int(&self, kind: IntPropKind) -> Option<&IntProperty> {
        let ints = &self.data.ints;
        ints.binary_search_by_key(&kind, |p| p.kind)
            .ok()
            .map(|ix| &ints[ix])
    }

    /// Returns the string property of the given kind, if set.
    pub fn str(&self, kind: StrPropKind) -> Option<&str> {
        let strs = &self.data.strs;
        strs.binary_search_by_key(&kind, |p| p.kind)
            .ok()
            .map(|ix| &*strs[ix].value)
    }

    /// Returns the writing system, if set.
    pub fn writing_system(&self) -> Option<WritingSystem> {
        self.int(IntPropKind::WritingSystem)
            .map(|p| WritingSystem::from_value(p.value))
    }

    /// All integer properties, sorted by kind.
    #[inline]
    pub fn int_properties(&self) -> &[IntProperty] {
        &self.data.ints
    }

    /// All string properties, sorted by kind.
    #[inline]
    pub fn str_properties(&self) -> &[StrProperty] {
        &self.data.strs
    }

    /// Returns `true` if no attribute is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.ints.is_empty() && self.data.strs.is_empty()
    }

    /// Returns a builder seeded with these attributes.
    pub fn to_builder(&self) -> PropertiesBuilder {
        PropertiesBuilder::from(self)
    }

    /// Returns `true` if both values share one allocation.
    ///
    /// This implies equality, but equal values need not share an allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }
}

impl PartialEq for TextProperties {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.data == other.data
    }
}

impl Eq for TextProperties {}

impl Hash for TextProperties {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl fmt::Debug for TextProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextProperties")
            .field("ints", &self.data.ints)
            .field("strs", &self.data.strs)
            .finish()
    }
}
