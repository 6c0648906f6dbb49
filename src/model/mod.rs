// MODEL: Game state and data
pub mod actor;
pub mod camera;
pub mod collectible;
pub mod scene;
pub mod track;

pub use actor::{ActorState, Pose};
pub use camera::Camera;
pub use collectible::{Coin, CoinField};
pub use scene::{MeshDesc, MeshId, MeshShape, SceneGraph, SceneNode};
pub use track::{TrackLayout, TrackPlan};
