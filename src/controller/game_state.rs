use std::collections::BTreeMap;

use crate::error::GameError;

/// Score, progress and the start gate for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub score: u64,
    pub coins_collected: u32,
    pub level: u32,
    pub controls_enabled: bool,
    hud_dirty: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            coins_collected: 0,
            level: 1,
            controls_enabled: false,
            // HUD shows initial values on the first frame
            hud_dirty: true,
        }
    }

    pub fn enable_controls(&mut self) {
        self.controls_enabled = true;
    }

    pub fn record_pickup(&mut self, reward: u64) {
        self.coins_collected += 1;
        self.score += reward;
        self.hud_dirty = true;
    }

    /// Returns whether the HUD needs a refresh and clears the flag
    pub fn take_hud_dirty(&mut self) -> bool {
        std::mem::take(&mut self.hud_dirty)
    }

    /// Flat key-value view of the run
    pub fn snapshot(&self) -> BTreeMap<&'static str, u64> {
        BTreeMap::from([
            ("coins", u64::from(self.coins_collected)),
            ("level", u64::from(self.level)),
            ("score", self.score),
        ])
    }

    pub fn snapshot_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_level_one_with_controls_locked() {
        let state = GameState::new();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(!state.controls_enabled);
    }

    #[test]
    fn pickups_add_reward_and_dirty_hud() {
        let mut state = GameState::new();
        assert!(state.take_hud_dirty());
        assert!(!state.take_hud_dirty());

        state.record_pickup(10);
        state.record_pickup(10);
        assert_eq!(state.score, 20);
        assert_eq!(state.coins_collected, 2);
        assert!(state.take_hud_dirty());
    }

    #[test]
    fn snapshot_is_flat_json() {
        let mut state = GameState::new();
        state.record_pickup(10);
        let json = state.snapshot_json().unwrap();
        assert_eq!(json, r#"{"coins":1,"level":1,"score":10}"#);
    }
}
