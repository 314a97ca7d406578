// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::{Error, RichString};

/// A scratch copy of a [`RichString`]'s text, for consumers that need a mutable buffer.
///
/// The string itself is never modified. [`TextLock::unlock`] verifies that the consumer handed
/// the buffer back unchanged, and reports
/// [`ErrorKind::ImmutabilityViolation`](crate::ErrorKind::ImmutabilityViolation) otherwise.
///
/// ```
/// use rich_string::{ErrorKind, RichString};
/// use text_properties::TextProperties;
///
/// let s = RichString::new("abc", TextProperties::new());
/// let mut lock = s.lock_text();
/// lock.buffer_mut().push('!');
/// assert_eq!(lock.unlock().unwrap_err().kind(), ErrorKind::ImmutabilityViolation);
/// assert_eq!(s.as_str(), "abc");
/// ```
#[derive(Debug)]
pub struct TextLock<'a> {
    source: &'a RichString,
    buffer: String,
}

impl<'a> TextLock<'a> {
    pub(crate) fn new(source: &'a RichString) -> Self {
        Self {
            source,
            buffer: String::from(source.as_str()),
        }
    }

    /// The locked text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// The buffer, for APIs that insist on mutable access.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Releases the lock, checking that the buffer still matches the string.
    pub fn unlock(self) -> Result<(), Error> {
        if self.buffer == self.source.as_str() {
            Ok(())
        } else {
            Err(Error::immutability_violation(self.source.len()))
        }
    }
}
