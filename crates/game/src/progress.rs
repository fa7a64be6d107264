//! Player progress: inventory, objectives, diary pages.
//!
//! Handlers mutate this through the interaction context; nothing here is
//! persisted (saving belongs to a future settings/save layer).

use std::collections::HashSet;

/// Inventory and objective state for one playthrough.
#[derive(Debug, Default)]
pub struct GameProgress {
    /// Item ids in pickup order (keys, diary pages, safe contents).
    items: Vec<String>,
    /// Completed objective ids.
    objectives_done: HashSet<String>,
    /// Diary pages placed back into the diary.
    pub pages_placed: u32,
}

impl GameProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item id to the inventory.
    pub fn add_item(&mut self, id: impl Into<String>) {
        let id = id.into();
        log::info!("Picked up: {}", id);
        self.items.push(id);
    }

    /// True if the inventory holds `id`.
    pub fn has_item(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    /// Remove one instance of `id`. Returns false (logged) if absent, so a
    /// buggy handler cannot double-spend a key.
    pub fn remove_item(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => {
                log::warn!("Tried to remove missing item {:?}", id);
                false
            }
        }
    }

    /// Items in pickup order, for overlays.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Mark an objective complete. Re-completion is a quiet no-op.
    pub fn complete_objective(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.objectives_done.insert(id.clone()) {
            log::info!("Objective complete: {}", id);
        }
    }

    pub fn is_objective_complete(&self, id: &str) -> bool {
        self.objectives_done.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Removing a key consumes exactly one instance and fails cleanly when
    /// none remain.
    #[test]
    fn remove_item_is_single_use() {
        let mut progress = GameProgress::new();
        progress.add_item("library_key");
        assert!(progress.has_item("library_key"));
        assert!(progress.remove_item("library_key"));
        assert!(!progress.has_item("library_key"));
        assert!(!progress.remove_item("library_key"));
    }

    /// Objectives complete once and stay complete.
    #[test]
    fn objectives_are_idempotent() {
        let mut progress = GameProgress::new();
        assert!(!progress.is_objective_complete("open_safe"));
        progress.complete_objective("open_safe");
        progress.complete_objective("open_safe");
        assert!(progress.is_objective_complete("open_safe"));
    }
}
