use glam::{Quat, Vec3};
use rand::Rng;

/// Where coins, obstacles and ramps get placed along the -Z track
#[derive(Debug, Clone)]
pub struct TrackLayout {
    pub ground_size: f32,
    pub coin_count: usize,
    pub coin_radius: f32,
    pub coin_spread: f32,
    pub coin_spacing: f32,
    pub obstacle_count: usize,
    pub obstacle_spread: f32,
    pub obstacle_spacing: f32,
    pub ramp_count: usize,
    pub ramp_spread: f32,
    pub ramp_spacing: f32,
    pub ramp_tilt: f32,
}

impl TrackLayout {
    pub fn new() -> Self {
        Self {
            ground_size: 100.0,
            coin_count: 20,
            coin_radius: 0.5,
            coin_spread: 50.0,
            coin_spacing: 10.0,
            obstacle_count: 10,
            obstacle_spread: 20.0,
            obstacle_spacing: 15.0,
            ramp_count: 5,
            ramp_spread: 20.0,
            ramp_spacing: 30.0,
            ramp_tilt: -std::f32::consts::FRAC_PI_6,
        }
    }

    /// Roll random lateral offsets for every item. Z positions are fixed by index.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> TrackPlan {
        let lateral = |rng: &mut R, spread: f32| rng.gen::<f32>() * spread - spread / 2.0;

        let coins = (0..self.coin_count)
            .map(|i| {
                let x = lateral(rng, self.coin_spread);
                Vec3::new(x, 0.5, -(i as f32) * self.coin_spacing - 10.0)
            })
            .collect();

        let obstacles = (0..self.obstacle_count)
            .map(|i| {
                let x = lateral(rng, self.obstacle_spread);
                Vec3::new(x, 0.5, -(i as f32) * self.obstacle_spacing - 20.0)
            })
            .collect();

        let ramps = (0..self.ramp_count)
            .map(|i| {
                let x = lateral(rng, self.ramp_spread);
                Vec3::new(x, 0.25, -(i as f32) * self.ramp_spacing - 40.0)
            })
            .collect();

        TrackPlan {
            coins,
            obstacles,
            ramps,
            ramp_orientation: Quat::from_rotation_x(self.ramp_tilt),
        }
    }
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Concrete positions for one run
#[derive(Debug, Clone)]
pub struct TrackPlan {
    pub coins: Vec<Vec3>,
    pub obstacles: Vec<Vec3>,
    pub ramps: Vec<Vec3>,
    pub ramp_orientation: Quat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn plan_has_the_configured_counts() {
        let layout = TrackLayout::new();
        let plan = layout.generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(plan.coins.len(), 20);
        assert_eq!(plan.obstacles.len(), 10);
        assert_eq!(plan.ramps.len(), 5);
    }

    #[test]
    fn items_stay_within_their_lanes() {
        let layout = TrackLayout::new();
        let plan = layout.generate(&mut StdRng::seed_from_u64(42));

        for (i, c) in plan.coins.iter().enumerate() {
            assert!(c.x >= -25.0 && c.x < 25.0);
            assert_eq!(c.y, 0.5);
            assert_eq!(c.z, -(i as f32) * 10.0 - 10.0);
        }
        for (i, o) in plan.obstacles.iter().enumerate() {
            assert!(o.x >= -10.0 && o.x < 10.0);
            assert_eq!(o.z, -(i as f32) * 15.0 - 20.0);
        }
        for (i, r) in plan.ramps.iter().enumerate() {
            assert!(r.x >= -10.0 && r.x < 10.0);
            assert_eq!(r.y, 0.25);
            assert_eq!(r.z, -(i as f32) * 30.0 - 40.0);
        }
    }

    #[test]
    fn same_seed_same_track() {
        let layout = TrackLayout::new();
        let a = layout.generate(&mut StdRng::seed_from_u64(3));
        let b = layout.generate(&mut StdRng::seed_from_u64(3));
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.obstacles, b.obstacles);
    }
}
