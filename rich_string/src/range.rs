// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Endpoint, Error};

/// Checks that `range` is ordered, inside `text`, and does not split a character.
pub(crate) fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    let Range { start, end } = *range;
    if start > end {
        return Err(Error::invalid_range(start, end, text.len()));
    }
    if end > text.len() {
        return Err(Error::invalid_bounds(start, end, text.len()));
    }
    for (endpoint, index) in [(Endpoint::Start, start), (Endpoint::End, end)] {
        if !text.is_char_boundary(index) {
            return Err(Error::not_on_char_boundary(text, start, end, endpoint, index));
        }
    }
    Ok(())
}

/// The last character boundary at or before `index`. Indices past the end give the length.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}

/// The first character boundary at or after `index`. Indices past the end give the length.
pub(crate) fn ceil_char_boundary(text: &str, index: usize) -> usize {
    (index..text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(text.len())
}
