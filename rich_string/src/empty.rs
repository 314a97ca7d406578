// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide empty strings, one per writing system.

use std::sync::{Mutex, OnceLock, PoisonError};

use hashbrown::HashMap;
use text_properties::{PropertiesBuilder, WritingSystem};

use crate::RichString;

static EMPTY_STRINGS: OnceLock<Mutex<HashMap<WritingSystem, RichString>>> = OnceLock::new();

pub(crate) fn shared_empty(ws: WritingSystem) -> RichString {
    let cache = EMPTY_STRINGS.get_or_init(Mutex::default);
    // The map is only ever inserted into, so a panic elsewhere cannot leave it inconsistent.
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(ws)
        .or_insert_with(|| {
            log::debug!("creating shared empty string for {ws}");
            let mut props = PropertiesBuilder::new();
            props.set_writing_system(ws);
            RichString::empty_with(props.build())
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use crate::RichString;
    use std::thread;
    use text_properties::WritingSystem;

    #[test]
    fn same_writing_system_is_shared() {
        let a = RichString::empty(WritingSystem::new(41));
        let b = RichString::empty(WritingSystem::new(41));
        let c = RichString::empty(WritingSystem::new(42));
        assert!(RichString::ptr_eq(&a, &b));
        assert!(!RichString::ptr_eq(&a, &c));
        assert_eq!(
            a.properties_at_end().writing_system(),
            Some(WritingSystem::new(41))
        );
    }

    #[test]
    fn shared_across_threads() {
        let here = RichString::empty(WritingSystem::new(43));
        let there = thread::spawn(|| RichString::empty(WritingSystem::new(43)))
            .join()
            .unwrap();
        assert!(RichString::ptr_eq(&here, &there));
    }
}
