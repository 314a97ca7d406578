// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable, run-annotated strings with style-preserving Unicode normalization.
//!
//! A [`RichString`] is UTF-8 text partitioned into maximal runs, each carrying one
//! [`TextProperties`](text_properties::TextProperties) value. Strings are immutable and cheap to
//! share across threads. Modified copies are made with a builder:
//!
//! - [`IncrementalBuilder`] only appends, tracking a set of pending properties for the next
//!   append.
//! - [`FullBuilder`] supports arbitrary replacement of sub-ranges and property overwrites.
//!
//! Both implement [`RichStringBuilder`].
//!
//! Normalization ([`RichString::normalized`] and friends) converts a string to one of the
//! Unicode normalization forms while keeping each character's style, and can remap external
//! offsets such as caret positions into the result. [`NormalizationForm::Nfsc`] is a composed
//! form that never merges characters carrying different properties.
//!
//! All offsets are byte indices. Ranges must lie on character boundaries.
//!
//! ## Features
//!
//! - `compiled_data` (enabled by default): Provides [`IcuUnicode`], backed by the compiled data
//!   of [`icu_normalizer`], and the normalization methods that use it. Without it, supply your
//!   own [`UnicodeService`] to the `*_with` methods.
//!
//! ## Example
//!
//! ```
//! use rich_string::{IncrementalBuilder, NormalizationForm, RichStringBuilder};
//! use text_properties::{IntPropKind, PropVariant};
//!
//! let mut builder = IncrementalBuilder::new();
//! builder.append("caf");
//! builder.set_int_property(IntPropKind::Bold, PropVariant::Toggle, 1);
//! builder.append("é");
//! let s = builder.build();
//!
//! let mut carets = [3, 5];
//! let nfd = s.normalize_and_remap_offsets(NormalizationForm::Nfd, &mut carets);
//! assert_eq!(nfd.as_str(), "cafe\u{301}");
//! assert_eq!(carets, [3, 6]);
//! // The base character keeps the style of the precomposed character it came from.
//! assert_eq!(nfd.run_at(3)?.range, 3..6);
//! # Ok::<(), rich_string::Error>(())
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

extern crate alloc;

mod builder;
mod empty;
mod error;
mod flags;
mod incremental;
mod lock;
mod normalize;
mod range;
mod rich_string;
mod run;
mod traits;


pub use crate::builder::FullBuilder;
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind};
pub use crate::incremental::IncrementalBuilder;
pub use crate::lock::TextLock;
#[cfg(feature = "compiled_data")]
pub use crate::normalize::IcuUnicode;
pub use crate::normalize::{NormalizationForm, UnicodeService};
pub use crate::rich_string::RichString;
pub use crate::run::{Run, RunInfo};
pub use crate::traits::RichStringBuilder;
