/// Longitudinal speed model: one scalar, pushed up by throttle and down by brake or drag
#[derive(Debug, Clone, Copy)]
pub struct SpeedModel {
    pub acceleration: f32,
    pub brake_deceleration: f32,
    pub max_speed: f32,
}

impl SpeedModel {
    pub fn new() -> Self {
        Self {
            acceleration: 0.05,
            brake_deceleration: 0.1,
            max_speed: 2.0,
        }
    }

    /// Speed for the next frame. Throttle wins over brake; with neither held the
    /// bike coasts down at half the acceleration rate. Result is within [0, max_speed].
    pub fn next(&self, speed: f32, accelerate: bool, brake: bool) -> f32 {
        let next = if accelerate {
            speed + self.acceleration
        } else if brake {
            speed - self.brake_deceleration
        } else {
            speed - self.acceleration / 2.0
        };
        next.clamp(0.0, self.max_speed)
    }
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn ten_frames_of_throttle_reach_half_speed() {
        let model = SpeedModel::new();
        let mut speed = 0.0;
        for _ in 0..10 {
            speed = model.next(speed, true, false);
        }
        assert_relative_eq!(speed, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn throttle_saturates_at_max_speed() {
        let model = SpeedModel::new();
        let mut speed = 0.0;
        for _ in 0..100 {
            speed = model.next(speed, true, false);
        }
        assert_eq!(speed, model.max_speed);
    }

    #[test]
    fn brake_decays_faster_than_coasting() {
        let model = SpeedModel::new();
        let braked = model.next(1.0, false, true);
        let coasted = model.next(1.0, false, false);
        assert_relative_eq!(braked, 0.9, epsilon = 1e-6);
        assert_relative_eq!(coasted, 0.975, epsilon = 1e-6);
        assert!(braked < coasted);
    }

    #[test]
    fn throttle_wins_over_brake() {
        let model = SpeedModel::new();
        assert_relative_eq!(model.next(1.0, true, true), 1.05, epsilon = 1e-6);
    }

    #[test]
    fn never_goes_negative() {
        let model = SpeedModel::new();
        assert_eq!(model.next(0.0, false, true), 0.0);
        assert_eq!(model.next(0.0, false, false), 0.0);
        assert_eq!(model.next(0.01, false, true), 0.0);
    }

    #[test]
    fn random_input_sequences_stay_in_range_and_respect_direction() {
        let model = SpeedModel::new();
        let mut rng = StdRng::seed_from_u64(0xb1ce);
        let mut speed = 0.0;
        for _ in 0..5000 {
            let accelerate = rng.gen_bool(0.5);
            let brake = rng.gen_bool(0.3);
            let next = model.next(speed, accelerate, brake);
            assert!((0.0..=model.max_speed).contains(&next));
            if accelerate {
                assert!(next >= speed);
            } else {
                assert!(next <= speed);
            }
            speed = next;
        }
    }
}
