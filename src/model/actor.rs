use glam::{Quat, Vec3};

use crate::controller::BodyHandle;
use crate::model::MeshId;

/// Position and orientation of a simulated body or a renderable mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Map a point given in this pose's local frame into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The player-controlled bike: one rigid body plus the mesh kept in sync with it
pub struct ActorState {
    pub pose: Pose,
    pub speed: f32,
    steering: f32,
    pub body: BodyHandle,
    pub mesh: MeshId,
}

impl ActorState {
    pub fn new(body: BodyHandle, mesh: MeshId, start: Vec3) -> Self {
        Self {
            pose: Pose::from_position(start),
            speed: 0.0,
            steering: 0.0,
            body,
            mesh,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn steering(&self) -> f32 {
        self.steering
    }

    /// Steering is always kept within [-1, 1]
    pub fn set_steering(&mut self, steering: f32) {
        self.steering = if steering.is_finite() { steering.clamp(-1.0, 1.0) } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn actor() -> ActorState {
        ActorState::new(BodyHandle::new(0), MeshId::new(0), Vec3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn new_actor_starts_at_rest() {
        let a = actor();
        assert_eq!(a.speed, 0.0);
        assert_eq!(a.steering(), 0.0);
        assert_eq!(a.position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(a.pose.orientation, Quat::IDENTITY);
    }

    #[test]
    fn steering_is_clamped() {
        let mut a = actor();
        a.set_steering(3.5);
        assert_eq!(a.steering(), 1.0);
        a.set_steering(-7.0);
        assert_eq!(a.steering(), -1.0);
        a.set_steering(f32::NAN);
        assert_eq!(a.steering(), 0.0);
    }

    #[test]
    fn transform_point_applies_rotation_then_translation() {
        let pose = Pose::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let p = pose.transform_point(Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }
}
