//! ResultCache - per-mode slot for the last successfully fetched payload.
//!
//! Written only by a settlement whose attempt token is still current;
//! cleared wholesale on reset so every hub revisit fetches fresh.

use std::collections::HashMap;

use dangchat_core::{FortuneResult, Mode};

#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    slots: HashMap<Mode, FortuneResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a payload for its mode, replacing any previous one.
    pub fn insert(&mut self, result: FortuneResult) {
        self.slots.insert(result.mode(), result);
    }

    pub fn get(&self, mode: Mode) -> Option<&FortuneResult> {
        self.slots.get(&mode)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
