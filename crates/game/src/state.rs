//! Game state types: dev settings and interaction prompts.

// ── Interaction prompts (single source of truth for key labels) ──────────

/// Key label shown in prompts (e.g. "E"). Change here to update all
/// interact prompts.
pub const INTERACT_KEY: &str = "E";
/// Key to confirm dialogs.
pub const CONFIRM_KEY: &str = "Enter";
/// Key to cancel/close dialogs.
pub const CANCEL_KEY: &str = "Esc";
/// Keys for dialog choices (shown when a choice dialog is open).
pub const CHOICE_KEYS: &str = "1-9";

/// One on-screen interaction prompt: "[key] action" (e.g. "[E] Take the key").
#[derive(Debug, Clone, PartialEq)]
pub struct InteractPrompt {
    pub key: &'static str,
    pub action: String,
}

impl InteractPrompt {
    /// Build the full prompt string for the overlay (e.g. "[E] Open the door").
    pub fn display_text(&self) -> String {
        format!("[{}] {}", self.key, self.action)
    }
}

// ── Dev settings ─────────────────────────────────────────────────────────

/// Developer settings, toggled via the in-game dev menu (F3). The movement
/// entries are one-shot requests consumed by the frame loop, which routes
/// them to the motion controller (where dev gating lives).
pub struct DevSettings {
    /// Show the dev menu overlay.
    pub menu_open: bool,
    /// Currently selected menu item index.
    pub selected: usize,
    /// Show the top-left debug text block (FPS, position, mode).
    pub show_overlay: bool,
    /// Request: toggle fly mode.
    pub toggle_fly_requested: bool,
    /// Request: toggle fixed-height mode.
    pub toggle_fixed_height_requested: bool,
    /// Request: toggle noclip.
    pub toggle_noclip_requested: bool,
    /// Request: toggle spawn freeze.
    pub toggle_spawn_freeze_requested: bool,
    /// Request: emergency rescue (fell through geometry).
    pub rescue_requested: bool,
    /// Request: teleport back to the spawn point.
    pub teleport_spawn_requested: bool,
}

impl DevSettings {
    pub fn new() -> Self {
        Self {
            menu_open: false,
            selected: 0,
            show_overlay: true,
            toggle_fly_requested: false,
            toggle_fixed_height_requested: false,
            toggle_noclip_requested: false,
            toggle_spawn_freeze_requested: false,
            rescue_requested: false,
            teleport_spawn_requested: false,
        }
    }

    pub fn menu_items(&self) -> Vec<(&str, bool)> {
        vec![
            ("Show Overlay", self.show_overlay),
            ("-- Toggle Fly --", false),
            ("-- Toggle Fixed Height --", false),
            ("-- Toggle Noclip --", false),
            ("-- Toggle Spawn Freeze --", false),
            ("-- Emergency Rescue --", false),
            ("-- Teleport to Spawn --", false),
        ]
    }

    pub fn menu_item_count(&self) -> usize {
        7
    }

    pub fn select_previous(&mut self) {
        let count = self.menu_item_count();
        self.selected = (self.selected + count - 1) % count;
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.menu_item_count();
    }

    pub fn toggle_selected(&mut self) {
        match self.selected {
            0 => self.show_overlay = !self.show_overlay,
            1 => self.toggle_fly_requested = true,
            2 => self.toggle_fixed_height_requested = true,
            3 => self.toggle_noclip_requested = true,
            4 => self.toggle_spawn_freeze_requested = true,
            5 => self.rescue_requested = true,
            6 => self.teleport_spawn_requested = true,
            _ => {}
        }
    }
}

impl Default for DevSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Menu selection wraps in both directions.
    #[test]
    fn menu_selection_wraps() {
        let mut dev = DevSettings::new();
        dev.select_previous();
        assert_eq!(dev.selected, dev.menu_item_count() - 1);
        dev.select_next();
        assert_eq!(dev.selected, 0);
    }

    /// Action items set their one-shot request flags.
    #[test]
    fn toggle_selected_sets_requests() {
        let mut dev = DevSettings::new();
        dev.selected = 5;
        dev.toggle_selected();
        assert!(dev.rescue_requested);
        dev.selected = 0;
        dev.toggle_selected();
        assert!(!dev.show_overlay);
    }
}
