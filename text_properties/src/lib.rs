// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable style attribute sets for rich text.
//!
//! A [`TextProperties`] value is the style attached to one run of a rich string. It holds two
//! attribute namespaces:
//!
//! - integer properties, each a `(kind, variant, value)` triple ([`IntProperty`])
//! - string properties, each a `(kind, value)` pair ([`StrProperty`])
//!
//! Values are immutable and cheap to clone. Equality and hashing are structural, so two
//! independently built values with the same attributes compare equal. New values are made with a
//! [`PropertiesBuilder`].
//!
//! Attribute kinds and variants carry stable numeric codes so a separate serialization layer can
//! round-trip them through a tagged encoding without this crate interpreting the tags.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_properties::{IntPropKind, PropVariant, PropertiesBuilder, WritingSystem};
//!
//! let mut builder = PropertiesBuilder::new();
//! builder.set_writing_system(WritingSystem::new(1));
//! builder.set_int(IntPropKind::Bold, PropVariant::Toggle, 1);
//! let bold = builder.build();
//!
//! assert_eq!(bold.writing_system(), Some(WritingSystem::new(1)));
//! assert_eq!(bold.int(IntPropKind::Bold).map(|p| p.value), Some(1));
//! assert_eq!(bold, bold.to_builder().build());
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod builder;
mod error;
mod kind;
mod properties;
mod writing_system;

pub use builder::PropertiesBuilder;
pub use error::{PropertyError, PropertyErrorKind};
pub use kind::{IntPropKind, PropVariant, StrPropKind};
pub use properties::{IntProperty, StrProperty, TextProperties};
pub use writing_system::WritingSystem;
