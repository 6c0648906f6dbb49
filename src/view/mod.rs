// VIEW: Render surface, HUD and the browser debug canvas
pub mod hud;
pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use hud::{HudField, HudSink, TextHud};
pub use surface::RenderSurface;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
