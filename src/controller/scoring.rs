use glam::Vec3;
use tracing::info;

use crate::controller::GameState;
use crate::model::CoinField;
use crate::view::RenderSurface;

/// Picks up coins the actor drives close enough to
#[derive(Debug, Clone, Copy)]
pub struct ProximityScorer {
    /// Added to each coin's own radius
    pub margin: f32,
    pub reward: u64,
}

impl ProximityScorer {
    pub fn new() -> Self {
        Self {
            margin: 1.0,
            reward: 10,
        }
    }

    /// Collect every active coin within reach, in spawn order.
    /// Returns how many were collected this call.
    pub fn collect<S: RenderSurface + ?Sized>(
        &self,
        coins: &mut CoinField,
        actor: Vec3,
        state: &mut GameState,
        surface: &mut S,
    ) -> usize {
        let mut collected = 0;
        for coin in coins.iter_mut() {
            if coin.is_collected() {
                continue;
            }
            let distance = coin.position.distance(actor);
            if distance >= coin.radius + self.margin {
                continue;
            }
            coin.collect();

            if let Some(mesh) = coin.mesh.take() {
                surface.remove_mesh(mesh);
            }
            state.record_pickup(self.reward);
            collected += 1;
            info!(
                position = ?coin.position,
                distance,
                score = state.score,
                "coin collected"
            );
        }
        collected
    }
}

impl Default for ProximityScorer {
    fn default() -> Self {
        Self::new()
    }
}
