use glam::Vec3;

use crate::controller::{BodyDriver, BoxBodyDesc, ChaseCamera, ProximityScorer, SpeedModel};
use crate::model::TrackLayout;

/// Every tuning knob of a run, defaulting to the stock game
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub speed: SpeedModel,
    pub driver: BodyDriver,
    pub chase: ChaseCamera,
    pub scoring: ProximityScorer,
    pub track: TrackLayout,
    pub bike: BoxBodyDesc,
    pub gravity: Vec3,
    pub solver_iterations: usize,
    /// Longest frame the simulation will step in one go, in seconds
    pub max_frame_delta: f32,
    /// Speed units to km/h for the HUD
    pub hud_speed_factor: f32,
    pub viewport: (u32, u32),
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            speed: SpeedModel::new(),
            driver: BodyDriver::new(),
            chase: ChaseCamera::new(),
            scoring: ProximityScorer::new(),
            track: TrackLayout::new(),
            bike: BoxBodyDesc::bike(),
            gravity: Vec3::new(0.0, -9.82, 0.0),
            solver_iterations: 10,
            max_frame_delta: 0.1,
            hud_speed_factor: 50.0,
            viewport: (800, 600),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
