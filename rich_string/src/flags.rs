// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::sync::atomic::{AtomicU8, Ordering};

use crate::NormalizationForm;

/// Which normalization forms a string is known to satisfy.
///
/// This is a cache: a clear bit means "unknown", never "not normalized". Threads that prove
/// forms concurrently union their bits, so a set bit is never lost or wrong.
#[derive(Debug, Default)]
pub(crate) struct NormalizedFlags(AtomicU8);

impl NormalizedFlags {
    #[inline]
    pub(crate) fn contains(&self, form: NormalizationForm) -> bool {
        self.0.load(Ordering::Acquire) & form.bit() != 0
    }

    /// Records that `form`, and every form it implies, holds.
    pub(crate) fn mark(&self, form: NormalizationForm) {
        let bits = form.implied_bits();
        if self.0.load(Ordering::Relaxed) & bits == bits {
            return;
        }
        self.0.fetch_or(bits, Ordering::AcqRel);
    }

    #[cfg(test)]
    pub(crate) fn bits(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }
}
