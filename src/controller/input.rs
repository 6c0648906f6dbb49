//! Platform-agnostic input handling system

/// The two on-screen touch pads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchControl {
    Accelerate,
    Brake,
}

impl TouchControl {
    pub fn element_id(self) -> &'static str {
        match self {
            TouchControl::Accelerate => "accelerate",
            TouchControl::Brake => "brake",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        match id {
            "accelerate" => Some(TouchControl::Accelerate),
            "brake" => Some(TouchControl::Brake),
            _ => None,
        }
    }
}

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Touch pads
    TouchStart(TouchControl),
    TouchEnd(TouchControl),

    /// Left-to-right device tilt in degrees, None when the sensor gave nothing
    Tilt { gamma: Option<f64> },

    // Window events
    FocusLost,
    VisibilityChanged { visible: bool },
}

/// What the player is asking for right now. Written by input handlers, read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    pub accelerate: bool,
    pub brake: bool,
    steering: f32,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steering(&self) -> f32 {
        self.steering
    }

    pub fn set_steering(&mut self, steering: f32) {
        self.steering = if steering.is_finite() { steering.clamp(-1.0, 1.0) } else { 0.0 };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Map a tilt angle in degrees onto [-1, 1] steering
pub fn tilt_to_steering(gamma: Option<f64>, max_tilt_deg: f64) -> f32 {
    match gamma {
        Some(g) if g.is_finite() && g != 0.0 => (g / max_tilt_deg).clamp(-1.0, 1.0) as f32,
        _ => 0.0,
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub accelerate: String,
    pub brake: String,
    pub steer_left: String,
    pub steer_right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            accelerate: "ArrowUp".to_string(),
            brake: "ArrowDown".to_string(),
            steer_left: "ArrowLeft".to_string(),
            steer_right: "ArrowRight".to_string(),
        }
    }
}

/// Turns input events into control state. Later events simply overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct InputProcessor {
    bindings: KeyBindings,
    max_tilt_deg: f64,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            max_tilt_deg: 45.0,
        }
    }

    /// True for keys the game uses, so the page should not scroll on them
    pub fn is_game_key(&self, key: &str) -> bool {
        let b = &self.bindings;
        key == b.accelerate || key == b.brake || key == b.steer_left || key == b.steer_right
    }

    pub fn process(&self, state: &mut ControlState, event: &InputEvent) {
        let b = &self.bindings;
        match event {
            InputEvent::KeyDown(key) => {
                if *key == b.accelerate {
                    state.accelerate = true;
                } else if *key == b.brake {
                    state.brake = true;
                } else if *key == b.steer_left {
                    state.set_steering(-1.0);
                } else if *key == b.steer_right {
                    state.set_steering(1.0);
                }
            }
            InputEvent::KeyUp(key) => {
                if *key == b.accelerate {
                    state.accelerate = false;
                } else if *key == b.brake {
                    state.brake = false;
                } else if *key == b.steer_left || *key == b.steer_right {
                    state.set_steering(0.0);
                }
            }
            InputEvent::TouchStart(TouchControl::Accelerate) => state.accelerate = true,
            InputEvent::TouchEnd(TouchControl::Accelerate) => state.accelerate = false,
            InputEvent::TouchStart(TouchControl::Brake) => state.brake = true,
            InputEvent::TouchEnd(TouchControl::Brake) => state.brake = false,
            InputEvent::Tilt { gamma } => {
                state.set_steering(tilt_to_steering(*gamma, self.max_tilt_deg));
            }
            InputEvent::FocusLost | InputEvent::VisibilityChanged { .. } => state.clear(),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

pub mod wasm {
    use super::*;
    use web_sys::{DeviceOrientationEvent, KeyboardEvent};

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        }
    }

    pub fn touch_to_input(control: TouchControl, is_start: bool) -> InputEvent {
        if is_start {
            InputEvent::TouchStart(control)
        } else {
            InputEvent::TouchEnd(control)
        }
    }

    pub fn orientation_to_input(e: &DeviceOrientationEvent) -> InputEvent {
        InputEvent::Tilt { gamma: e.gamma() }
    }
}
