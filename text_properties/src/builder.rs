// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{
    IntPropKind, IntProperty, PropVariant, PropertyError, StrPropKind, StrProperty,
    TextProperties, WritingSystem,
};

/// Accumulates attribute changes and produces [`TextProperties`].
///
/// ## Example
///
/// ```
/// use text_properties::{IntPropKind, PropVariant, PropertiesBuilder, StrPropKind};
///
/// let mut builder = PropertiesBuilder::new();
/// builder.set_int(IntPropKind::Bold, PropVariant::Toggle, 1);
/// builder.set_str(StrPropKind::FontFamily, "Gentium");
/// let first = builder.build();
///
/// // The builder stays usable after `build`.
/// builder.clear_int(IntPropKind::Bold);
/// let second = builder.build();
/// assert_ne!(first, second);
/// assert_eq!(second.str(StrPropKind::FontFamily), Some("Gentium"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertiesBuilder {
    ints: Vec<IntProperty>,
    strs: Vec<StrProperty>,
}

impl PropertiesBuilder {
    /// Creates a builder with no attributes set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an integer property, replacing any previous value of that kind.
    pub fn set_int(&mut self, kind: IntPropKind, variant: PropVariant, value: i32) {
        let prop = IntProperty::new(kind, variant, value);
        match self.ints.binary_search_by_key(&kind, |p| p.kind) {
            Ok(ix) => self.ints[ix] = prop,
            Err(ix) => self.ints.insert(ix, prop),
        }
    }

    /// Sets an integer property from its raw interchange codes.
    pub fn set_int_raw(&mut self, code: u16, variant: u8, value: i32) -> Result<(), PropertyError> {
        let kind = IntPropKind::from_code(code)?;
        let variant = PropVariant::from_code(variant)?;
        self.set_int(kind, variant, value);
        Ok(())
    }

    /// Removes an integer property.
    pub fn clear_int(&mut self, kind: IntPropKind) {
        if let Ok(ix) = self.ints.binary_search_by_key(&kind, |p| p.kind) {
            self.ints.remove(ix);
        }
    }

    /// Returns the pending integer property of the given kind.
    pub fn get_int(&self, kind: IntPropKind) -> Option<&IntProperty> {
        self.ints
            .binary_search_by_key(&kind, |p| p.kind)
            .ok()
            .map(|ix| &self.ints[ix])
    }

    /// Sets the writing system.
    pub fn set_writing_system(&mut self, ws: WritingSystem) {
        self.set_int(IntPropKind::WritingSystem, PropVariant::Default, ws.to_value());
    }

    /// Sets a string property. Setting an empty value removes the property.
    pub fn set_str(&mut self, kind: StrPropKind, value: &str) {
        if value.is_empty() {
            self.clear_str(kind);
            return;
        }
        let prop = StrProperty {
            kind,
            value: Arc::from(value),
        };
        match self.strs.binary_search_by_key(&kind, |p| p.kind) {
            Ok(ix) => self.strs[ix] = prop,
            Err(ix) => self.strs.insert(ix, prop),
        }
    }

    /// Sets a string property from its raw interchange code.
    pub fn set_str_raw(&mut self, code: u16, value: &str) -> Result<(), PropertyError> {
        let kind = StrPropKind::from_code(code)?;
        self.set_str(kind, value);
        Ok(())
    }

    /// Removes a string property.
    pub fn clear_str(&mut self, kind: StrPropKind) {
        if let Ok(ix) = self.strs.binary_search_by_key(&kind, |p| p.kind) {
            self.strs.remove(ix);
        }
    }

    /// Returns the pending string property of the given kind.
    pub fn get_str(&self, kind: StrPropKind) -> Option<&str> {
        self.strs
            .binary_search_by_key(&kind, |p| p.kind)
            .ok()
            .map(|ix| &*self.strs[ix].value)
    }

    /// Returns `true` if no attribute is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ints.is_empty() && self.strs.is_empty()
    }

    /// Removes all pending attributes, retaining allocated storage.
    pub fn clear(&mut self) {
        self.ints.clear();
        self.strs.clear();
    }

    /// Snapshots the pending attributes.
    pub fn build(&self) -> TextProperties {
        TextProperties::from_sorted(self.ints.clone(), self.strs.clone())
    }
}

impl From<&TextProperties> for PropertiesBuilder {
    fn from(props: &TextProperties) -> Self {
        Self {
            ints: props.int_properties().to_vec(),
            strs: props.str_properties().to_vec(),
        }
    }
}

impl From<TextProperties> for PropertiesBuilder {
    fn from(props: TextProperties) -> Self {
        Self::from(&props)
    }
}
