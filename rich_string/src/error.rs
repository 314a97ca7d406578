// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

use crate::range::{ceil_char_boundary, floor_char_boundary};

/// Error returned by fallible rich string operations.
///
/// The [`ErrorKind`] says what went wrong. Range errors also record the caller's range and the
/// length of the text it was checked against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    range: Range<usize>,
    len: usize,
    detail: Detail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Detail {
    None,
    Boundary(BoundaryInfo),
    Reason(&'static str),
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` is the length of the text that was checked, not of the error."
)]
impl Error {
    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The range the caller asked for. Empty for errors not about a range.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Start of [`Error::range`].
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// End of [`Error::range`].
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Length in bytes of the text involved.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The character that an index fell inside of, for
    /// [`ErrorKind::NotOnCharBoundary`].
    pub fn boundary(&self) -> Option<&BoundaryInfo> {
        match &self.detail {
            Detail::Boundary(info) => Some(info),
            _ => None,
        }
    }

    /// Description of the offending argument, for [`ErrorKind::InvalidArgument`].
    pub fn reason(&self) -> Option<&'static str> {
        match self.detail {
            Detail::Reason(reason) => Some(reason),
            _ => None,
        }
    }

    fn new(kind: ErrorKind, range: Range<usize>, len: usize, detail: Detail) -> Self {
        Self {
            kind,
            range,
            len,
            detail,
        }
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidBounds, start..end, len, Detail::None)
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidRange, start..end, len, Detail::None)
    }

    /// `index` is the endpoint of `start..end` that falls inside a character of `text`.
    pub(crate) fn not_on_char_boundary(
        text: &str,
        start: usize,
        end: usize,
        endpoint: Endpoint,
        index: usize,
    ) -> Self {
        let info = BoundaryInfo {
            endpoint,
            index,
            char_range: floor_char_boundary(text, index)..ceil_char_boundary(text, index),
        };
        Self::new(
            ErrorKind::NotOnCharBoundary,
            start..end,
            text.len(),
            Detail::Boundary(info),
        )
    }

    pub(crate) fn invalid_argument(reason: &'static str) -> Self {
        Self::new(ErrorKind::InvalidArgument, 0..0, 0, Detail::Reason(reason))
    }

    pub(crate) fn immutability_violation(len: usize) -> Self {
        Self::new(ErrorKind::ImmutabilityViolation, 0..len, len, Detail::None)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Range { start, end } = self.range;
        match (&self.kind, &self.detail) {
            (ErrorKind::InvalidBounds, _) => {
                write!(f, "range {start}..{end} exceeds text length {}", self.len)
            }
            (ErrorKind::InvalidRange, _) => write!(f, "range {start}..{end} is inverted"),
            (ErrorKind::NotOnCharBoundary, Detail::Boundary(info)) => write!(
                f,
                "{} of range {start}..{end} at byte {} splits the character at {:?}",
                info.endpoint, info.index, info.char_range
            ),
            (ErrorKind::NotOnCharBoundary, _) => {
                write!(f, "range {start}..{end} splits a character")
            }
            (ErrorKind::InvalidArgument, Detail::Reason(reason)) => {
                write!(f, "invalid argument: {reason}")
            }
            (ErrorKind::InvalidArgument, _) => f.write_str("invalid argument"),
            (ErrorKind::ImmutabilityViolation, _) => write!(
                f,
                "locked text ({} bytes) was modified before unlock",
                self.len
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An index lies past the end of the text.
    InvalidBounds,
    /// A range has `start > end`.
    InvalidRange,
    /// An index falls inside a multi-byte character.
    NotOnCharBoundary,
    /// An argument was malformed, such as an undefined normalization form code or an
    /// inconsistent run list.
    InvalidArgument,
    /// Text handed out by [`RichString::lock_text`](crate::RichString::lock_text) was modified.
    ImmutabilityViolation,
}

impl ErrorKind {
    /// Returns `true` for the kinds that describe a bad index or range.
    pub fn is_range_error(self) -> bool {
        matches!(
            self,
            Self::InvalidBounds | Self::InvalidRange | Self::NotOnCharBoundary
        )
    }
}

/// One end of a range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The inclusive start.
    Start,
    /// The exclusive end.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Where a range endpoint split a character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryInfo {
    /// The endpoint that was misplaced.
    pub endpoint: Endpoint,
    /// Its byte index.
    pub index: usize,
    /// Byte range of the character containing it.
    pub char_range: Range<usize>,
}
