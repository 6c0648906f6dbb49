use glam::Vec3;

use crate::model::{Camera, Pose};

/// Follows the actor from a fixed offset expressed in the actor's own frame
#[derive(Debug, Clone, Copy)]
pub struct ChaseCamera {
    pub offset: Vec3,
    /// Fraction of the remaining distance covered each frame
    pub smoothing: f32,
}

impl ChaseCamera {
    pub fn new() -> Self {
        Self {
            offset: Vec3::new(0.0, 5.0, -10.0),
            smoothing: 0.1,
        }
    }

    /// Where the camera wants to be for the given actor pose
    pub fn target_for(&self, actor: &Pose) -> Vec3 {
        actor.transform_point(self.offset)
    }

    /// Move the camera part of the way toward its target and aim it at the actor.
    /// Smoothing is per frame, so the follow speed depends on the frame rate.
    pub fn follow(&self, camera: &mut Camera, actor: &Pose) {
        let target = self.target_for(actor);
        camera.eye = camera.eye.lerp(target, self.smoothing);
        camera.look_at(actor.position);
    }
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;

    #[test]
    fn target_is_offset_in_actor_frame() {
        let chase = ChaseCamera::new();
        let actor = Pose::new(
            Vec3::new(2.0, 0.3, -4.0),
            Quat::from_rotation_y(std::f32::consts::PI),
        );
        let t = chase.target_for(&actor);
        assert_relative_eq!(t.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(t.y, 5.3, epsilon = 1e-5);
        assert_relative_eq!(t.z, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn camera_covers_a_tenth_of_the_gap_and_aims_at_actor() {
        let chase = ChaseCamera::new();
        let mut cam = Camera::new(800, 600);
        cam.eye = Vec3::ZERO;
        let actor = Pose::from_position(Vec3::new(0.0, 0.0, -10.0));

        chase.follow(&mut cam, &actor);
        // target = (0, 5, -20)
        assert_relative_eq!(cam.eye.y, 0.5, epsilon = 1e-5);
        assert_relative_eq!(cam.eye.z, -2.0, epsilon = 1e-5);
        assert_eq!(cam.target, actor.position);
    }

    #[test]
    fn camera_converges_on_a_still_actor() {
        let chase = ChaseCamera::new();
        let mut cam = Camera::new(800, 600);
        let actor = Pose::from_position(Vec3::new(3.0, 0.3, -7.0));
        let target = chase.target_for(&actor);

        let mut last_gap = cam.eye.distance(target);
        for _ in 0..200 {
            chase.follow(&mut cam, &actor);
            let gap = cam.eye.distance(target);
            assert!(gap <= last_gap + 1e-6);
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
    }
}
