// CONTROLLER: Input and game logic
pub mod camera_controller;
pub mod game_state;
pub mod input;
pub mod physics;
pub mod rapier_world;
pub mod scoring;
pub mod speed;

pub use camera_controller::ChaseCamera;
pub use game_state::GameState;
pub use input::{ControlState, InputEvent, InputProcessor, KeyBindings, TouchControl};
pub use physics::{BodyDriver, BodyHandle, BoxBodyDesc, PhysicsWorld};
pub use rapier_world::RapierWorld;
pub use scoring::ProximityScorer;
pub use speed::SpeedModel;
