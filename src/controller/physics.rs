use glam::Vec3;
use tracing::trace;

use crate::error::GameError;
use crate::model::Pose;

/// Opaque handle to a body inside a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(usize);

impl BodyHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A dynamic box-shaped body
#[derive(Debug, Clone, Copy)]
pub struct BoxBodyDesc {
    pub half_extents: Vec3,
    pub mass: f32,
    pub angular_damping: f32,
    pub position: Vec3,
}

impl BoxBodyDesc {
    /// The bike: a 1 x 0.6 x 2 box dropped just above the ground
    pub fn bike() -> Self {
        Self {
            half_extents: Vec3::new(0.5, 0.3, 1.0),
            mass: 5.0,
            angular_damping: 0.5,
            position: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

/// The slice of a rigid-body engine the game needs. Contact resolution,
/// integration and constraint solving all happen behind `step`.
pub trait PhysicsWorld {
    /// Infinite static ground at the given height, normal +Y
    fn create_ground_plane(&mut self, height: f32);

    fn create_box_body(&mut self, desc: &BoxBodyDesc) -> BodyHandle;

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) -> Result<(), GameError>;

    fn set_angular_velocity(&mut self, body: BodyHandle, angular: Vec3) -> Result<(), GameError>;

    fn step(&mut self, delta: f32);

    fn pose(&self, body: BodyHandle) -> Option<Pose>;
}

/// Converts speed and steering into body velocities and advances the simulation
#[derive(Debug, Clone, Copy)]
pub struct BodyDriver {
    pub forward: Vec3,
    pub velocity_scale: f32,
    pub turn_speed: f32,
}

impl BodyDriver {
    pub fn new() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            velocity_scale: 10.0,
            turn_speed: 0.03,
        }
    }

    /// Horizontal velocity from speed; the vertical part is left to the simulation
    pub fn linear_velocity(&self, speed: f32, current: Vec3) -> Vec3 {
        let planar = self.forward * speed * self.velocity_scale;
        Vec3::new(planar.x, current.y, planar.z)
    }

    /// Yaw rate about +Y. Steering right (positive) turns clockwise seen from above.
    /// Pitch and roll spin stay with the simulation.
    pub fn angular_velocity(&self, steering: f32, current: Vec3) -> Vec3 {
        Vec3::new(current.x, -steering * self.turn_speed * self.velocity_scale, current.z)
    }

    /// Push velocities into the body, step the world and read the pose back
    pub fn drive<P: PhysicsWorld + ?Sized>(
        &self,
        physics: &mut P,
        body: BodyHandle,
        speed: f32,
        steering: f32,
        delta: f32,
    ) -> Result<Pose, GameError> {
        let current = physics
            .linear_velocity(body)
            .ok_or(GameError::UnknownBody(body))?;
        let spin = physics
            .angular_velocity(body)
            .ok_or(GameError::UnknownBody(body))?;
        physics.set_velocity(body, self.linear_velocity(speed, current))?;
        physics.set_angular_velocity(body, self.angular_velocity(steering, spin))?;

        physics.step(delta);

        let pose = physics.pose(body).ok_or(GameError::UnknownBody(body))?;
        trace!(?pose, speed, steering, delta, "body stepped");
        Ok(pose)
    }
}

impl Default for BodyDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;

    /// Integrates velocities directly, no contacts
    #[derive(Default)]
    struct Kinematic {
        bodies: Vec<(Pose, Vec3, Vec3)>,
        steps: Vec<f32>,
    }

    impl PhysicsWorld for Kinematic {
        fn create_ground_plane(&mut self, _height: f32) {}

        fn create_box_body(&mut self, desc: &BoxBodyDesc) -> BodyHandle {
            self.bodies.push((Pose::from_position(desc.position), Vec3::ZERO, Vec3::ZERO));
            BodyHandle::new(self.bodies.len() - 1)
        }

        fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3> {
            self.bodies.get(body.index()).map(|b| b.1)
        }

        fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
            self.bodies.get(body.index()).map(|b| b.2)
        }

        fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) -> Result<(), GameError> {
            let b = self.bodies.get_mut(body.index()).ok_or(GameError::UnknownBody(body))?;
            b.1 = velocity;
            Ok(())
        }

        fn set_angular_velocity(&mut self, body: BodyHandle, angular: Vec3) -> Result<(), GameError> {
            let b = self.bodies.get_mut(body.index()).ok_or(GameError::UnknownBody(body))?;
            b.2 = angular;
            Ok(())
        }

        fn step(&mut self, delta: f32) {
            self.steps.push(delta);
            for (pose, v, w) in &mut self.bodies {
                pose.position += *v * delta;
                pose.orientation = Quat::from_rotation_y(w.y * delta) * pose.orientation;
            }
        }

        fn pose(&self, body: BodyHandle) -> Option<Pose> {
            self.bodies.get(body.index()).map(|b| b.0)
        }
    }

    #[test]
    fn full_left_steer_gives_positive_yaw_rate() {
        let driver = BodyDriver::new();
        let w = driver.angular_velocity(-1.0, Vec3::ZERO);
        assert_relative_eq!(w.y, 0.3, epsilon = 1e-6);
        assert_eq!(w.x, 0.0);
        assert_eq!(w.z, 0.0);
        assert_relative_eq!(driver.angular_velocity(1.0, Vec3::ZERO).y, -0.3, epsilon = 1e-6);
    }

    #[test]
    fn steering_replaces_yaw_but_keeps_pitch_and_roll() {
        let driver = BodyDriver::new();
        let w = driver.angular_velocity(1.0, Vec3::new(1.0, 4.0, 2.0));
        assert_eq!(w.x, 1.0);
        assert_eq!(w.z, 2.0);
        assert_relative_eq!(w.y, -0.3, epsilon = 1e-6);
    }

    #[test]
    fn drive_leaves_contact_spin_alone() {
        let driver = BodyDriver::new();
        let mut world = Kinematic::default();
        let body = world.create_box_body(&BoxBodyDesc::bike());
        world.set_angular_velocity(body, Vec3::new(1.0, 0.0, 2.0)).unwrap();

        driver.drive(&mut world, body, 0.0, 0.0, 0.0).unwrap();
        let w = world.angular_velocity(body).unwrap();
        assert_eq!((w.x, w.z), (1.0, 2.0));
        assert_eq!(w.y, 0.0);
    }

    #[test]
    fn linear_velocity_points_down_negative_z_and_keeps_vertical() {
        let driver = BodyDriver::new();
        let v = driver.linear_velocity(2.0, Vec3::new(5.0, -1.5, 7.0));
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, -1.5);
        assert_relative_eq!(v.z, -20.0);
    }

    #[test]
    fn drive_steps_once_and_returns_new_pose() {
        let driver = BodyDriver::new();
        let mut world = Kinematic::default();
        let body = world.create_box_body(&BoxBodyDesc::bike());

        let pose = driver.drive(&mut world, body, 1.0, 0.0, 0.5).unwrap();
        assert_eq!(world.steps, vec![0.5]);
        assert_relative_eq!(pose.position.z, -5.0, epsilon = 1e-5);
        assert_relative_eq!(pose.position.y, 1.0);
    }

    #[test]
    fn unknown_body_is_an_error() {
        let driver = BodyDriver::new();
        let mut world = Kinematic::default();
        let err = driver
            .drive(&mut world, BodyHandle::new(3), 1.0, 0.0, 0.016)
            .unwrap_err();
        assert!(matches!(err, GameError::UnknownBody(h) if h.index() == 3));
        assert!(world.steps.is_empty());
    }
}
