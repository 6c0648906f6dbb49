use thiserror::Error;

use crate::controller::BodyHandle;

/// Errors raised while wiring up or driving the game
#[derive(Error, Debug)]
pub enum GameError {
    /// A DOM element the front-end expects is not on the page
    #[error("missing element: {0}")]
    MissingElement(String),

    /// A browser API call failed
    #[error("js error: {0}")]
    Js(String),

    /// The physics world has no body for this handle
    #[error("unknown physics body {0:?}")]
    UnknownBody(BodyHandle),

    /// Snapshot could not be serialised
    #[error("snapshot serialisation failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for wasm_bindgen::JsValue {
    fn from(err: GameError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
