use std::collections::BTreeMap;

use tracing::debug;

use crate::controller::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HudField {
    Speed,
    Score,
    Level,
}

impl HudField {
    /// DOM element id the browser front-end writes this field into
    pub fn element_id(self) -> &'static str {
        match self {
            HudField::Speed => "speed",
            HudField::Score => "score",
            HudField::Level => "level",
        }
    }
}

/// Anything that can display HUD lines
pub trait HudSink {
    fn show(&mut self, field: HudField, text: &str);
}

/// Speed rounded half away from zero, like the browser's `toFixed(0)`
pub fn speed_kmh(speed: f32, factor: f32) -> i64 {
    (speed * factor).round() as i64
}

pub fn speed_text(kmh: i64) -> String {
    format!("Speed: {kmh} km/h")
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

pub fn level_text(level: u32) -> String {
    format!("Level: {level}")
}

/// Push all three fields to the sink
pub fn refresh(hud: &mut dyn HudSink, kmh: i64, state: &GameState) {
    hud.show(HudField::Speed, &speed_text(kmh));
    hud.show(HudField::Score, &score_text(state.score));
    hud.show(HudField::Level, &level_text(state.level));
}

/// Keeps the latest text per field; used headless and in tests
#[derive(Debug, Default)]
pub struct TextHud {
    lines: BTreeMap<HudField, String>,
    updates: usize,
}

impl TextHud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: HudField) -> Option<&str> {
        self.lines.get(&field).map(String::as_str)
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl HudSink for TextHud {
    fn show(&mut self, field: HudField, text: &str) {
        debug!(?field, text, "hud");
        self.lines.insert(field, text.to_string());
        self.updates += 1;
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::DomHud;

#[cfg(target_arch = "wasm32")]
mod dom {
    use super::{HudField, HudSink};
    use web_sys::Document;

    /// Writes HUD lines into elements with ids `speed`, `score`, `level`
    pub struct DomHud {
        document: Document,
    }

    impl DomHud {
        pub fn new(document: Document) -> Self {
            Self { document }
        }
    }

    impl HudSink for DomHud {
        fn show(&mut self, field: HudField, text: &str) {
            // pages without a HUD element simply don't show that field
            if let Some(el) = self.document.get_element_by_id(field.element_id()) {
                el.set_text_content(Some(text));
            }
        }
    }
}
