use std::num::NonZeroUsize;

use glam::{Quat, Vec3};
use rapier3d::prelude::*;
use tracing::debug;

use crate::controller::physics::{BodyHandle, BoxBodyDesc, PhysicsWorld};
use crate::error::GameError;
use crate::model::Pose;

/// `PhysicsWorld` backed by rapier3d
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    handles: Vec<RigidBodyHandle>,
}

impl RapierWorld {
    pub fn new(gravity: Vec3, solver_iterations: usize) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        if let Some(iterations) = NonZeroUsize::new(solver_iterations) {
            integration_parameters.num_solver_iterations = iterations;
        }

        Self {
            gravity: to_vector(gravity),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            handles: Vec::new(),
        }
    }

    fn body(&self, body: BodyHandle) -> Option<&RigidBody> {
        let handle = self.handles.get(body.index())?;
        self.bodies.get(*handle)
    }

    fn body_mut(&mut self, body: BodyHandle) -> Result<&mut RigidBody, GameError> {
        let handle = self
            .handles
            .get(body.index())
            .ok_or(GameError::UnknownBody(body))?;
        self.bodies
            .get_mut(*handle)
            .ok_or(GameError::UnknownBody(body))
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -9.82, 0.0), 10)
    }
}

impl PhysicsWorld for RapierWorld {
    fn create_ground_plane(&mut self, height: f32) {
        let ground = ColliderBuilder::halfspace(Vector::y_axis())
            .translation(vector![0.0, height, 0.0])
            .build();
        self.colliders.insert(ground);
        debug!(height, "ground plane added");
    }

    fn create_box_body(&mut self, desc: &BoxBodyDesc) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(desc.position))
            .angular_damping(desc.angular_damping)
            .build();
        let handle = self.bodies.insert(body);

        let h = desc.half_extents;
        let collider = ColliderBuilder::cuboid(h.x, h.y, h.z).mass(desc.mass).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.handles.push(handle);
        let id = BodyHandle::new(self.handles.len() - 1);
        debug!(?id, half_extents = ?h, mass = desc.mass, "box body added");
        id
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|rb| to_vec3(rb.linvel()))
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|rb| to_vec3(rb.angvel()))
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) -> Result<(), GameError> {
        self.body_mut(body)?.set_linvel(to_vector(velocity), true);
        Ok(())
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, angular: Vec3) -> Result<(), GameError> {
        self.body_mut(body)?.set_angvel(to_vector(angular), true);
        Ok(())
    }

    fn step(&mut self, delta: f32) {
        if delta <= 0.0 {
            return;
        }
        self.integration_parameters.dt = delta;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        let rb = self.body(body)?;
        let t = rb.translation();
        // nalgebra stores quaternions as (i, j, k, w)
        let q = &rb.rotation().coords;
        Some(Pose::new(
            Vec3::new(t.x, t.y, t.z),
            Quat::from_xyzw(q.x, q.y, q.z, q.w),
        ))
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
