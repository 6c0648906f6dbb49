use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::{Quat, Vec3};
use rand::Rng;
use tracing::{info, trace, warn};

use crate::config::GameConfig;
use crate::controller::{ControlState, GameState, PhysicsWorld};
use crate::model::{ActorState, Camera, Coin, CoinField, MeshDesc, MeshId, MeshShape, Pose};
use crate::view::hud::{self, HudSink};
use crate::view::RenderSurface;

const GROUND_COLOR: u32 = 0x228b22;
const BIKE_COLOR: u32 = 0xff0000;
const COIN_COLOR: u32 = 0xffd700;
const OBSTACLE_COLOR: u32 = 0x8b4513;
const RAMP_COLOR: u32 = 0x555555;

/// What one call to `update` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Delta after clamping, in seconds
    pub delta: f32,
    /// False while controls are still locked
    pub simulated: bool,
    pub speed: f32,
    pub collected: usize,
    pub hud_refreshed: bool,
    /// Score, coins or level changed this frame
    pub state_changed: bool,
}

/// Turns timestamps in milliseconds into frame deltas in seconds
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick; zero on the first tick or if time went backwards
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }
}

/// Main game loop state and update logic
pub struct FrameLoopContext<P: PhysicsWorld, S: RenderSurface> {
    pub config: GameConfig,
    pub physics: P,
    pub surface: S,
    pub camera: Camera,
    pub actor: ActorState,
    pub coins: CoinField,
    pub scenery: Vec<MeshId>,
    pub controls: Rc<RefCell<ControlState>>,
    pub game_state: Rc<RefCell<GameState>>,
    shown_speed: Option<i64>,
}

impl<P: PhysicsWorld, S: RenderSurface> FrameLoopContext<P, S> {
    /// Build the ground, the bike and the track, both in physics and on the render surface
    pub fn new<R: Rng + ?Sized>(config: GameConfig, mut physics: P, mut surface: S, rng: &mut R) -> Self {
        let (width, height) = config.viewport;
        let camera = Camera::new(width, height);

        physics.create_ground_plane(0.0);
        let mut scenery = vec![surface.create_mesh(MeshDesc::new(
            MeshShape::Plane {
                width: config.track.ground_size,
                depth: config.track.ground_size,
            },
            GROUND_COLOR,
            Pose::IDENTITY,
        ))];

        let body = physics.create_box_body(&config.bike);
        let bike_mesh = surface.create_mesh(MeshDesc::new(
            MeshShape::Box { size: config.bike.half_extents * 2.0 },
            BIKE_COLOR,
            Pose::from_position(config.bike.position),
        ));
        let actor = ActorState::new(body, bike_mesh, config.bike.position);

        let plan = config.track.generate(rng);
        let coin_orientation = Quat::from_rotation_x(FRAC_PI_2);
        let coins: CoinField = plan
            .coins
            .iter()
            .map(|&position| {
                let mesh = surface.create_mesh(MeshDesc::new(
                    MeshShape::Cylinder { radius: 0.3, height: 0.1 },
                    COIN_COLOR,
                    Pose::new(position, coin_orientation),
                ));
                Coin::new(position, config.track.coin_radius).with_mesh(mesh)
            })
            .collect();

        for &position in &plan.obstacles {
            scenery.push(surface.create_mesh(MeshDesc::new(
                MeshShape::Box { size: Vec3::ONE },
                OBSTACLE_COLOR,
                Pose::from_position(position),
            )));
        }
        for &position in &plan.ramps {
            scenery.push(surface.create_mesh(MeshDesc::new(
                MeshShape::Box { size: Vec3::new(3.0, 0.5, 5.0) },
                RAMP_COLOR,
                Pose::new(position, plan.ramp_orientation),
            )));
        }

        info!(
            coins = coins.len(),
            obstacles = plan.obstacles.len(),
            ramps = plan.ramps.len(),
            "track built"
        );

        Self {
            config,
            physics,
            surface,
            camera,
            actor,
            coins,
            scenery,
            controls: Rc::new(RefCell::new(ControlState::new())),
            game_state: Rc::new(RefCell::new(GameState::new())),
            shown_speed: None,
        }
    }

    /// Clamp a raw frame delta so a long pause (e.g. a background tab) doesn't
    /// hand the physics engine one huge step
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        if delta.is_finite() {
            delta.clamp(0.0, self.config.max_frame_delta)
        } else {
            0.0
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    /// Run one frame: controls, speed, physics, visual sync, camera, scoring, render
    pub fn update(&mut self, delta: f32, hud: &mut dyn HudSink) -> FrameReport {
        let delta = self.clamp_delta(delta);
        let simulated = self.game_state.borrow().controls_enabled;
        let mut collected = 0;

        if simulated {
            let controls = *self.controls.borrow();
            self.actor.set_steering(controls.steering());
            self.actor.speed = self
                .config
                .speed
                .next(self.actor.speed, controls.accelerate, controls.brake);

            match self.config.driver.drive(
                &mut self.physics,
                self.actor.body,
                self.actor.speed,
                self.actor.steering(),
                delta,
            ) {
                Ok(pose) => {
                    self.actor.pose = pose;
                    self.surface.set_transform(self.actor.mesh, pose);
                }
                Err(err) => warn!(%err, "physics step skipped"),
            }

            self.config.chase.follow(&mut self.camera, &self.actor.pose);

            let mut state = self.game_state.borrow_mut();
            collected = self.config.scoring.collect(
                &mut self.coins,
                self.actor.position(),
                &mut state,
                &mut self.surface,
            );
        }

        self.surface.render(&self.camera);

        let (hud_refreshed, state_changed) = self.refresh_hud(hud);
        trace!(delta, speed = self.actor.speed, collected, "frame done");

        FrameReport {
            delta,
            simulated,
            speed: self.actor.speed,
            collected,
            hud_refreshed,
            state_changed,
        }
    }

    /// Returns (hud refreshed, game state changed)
    fn refresh_hud(&mut self, hud: &mut dyn HudSink) -> (bool, bool) {
        let kmh = hud::speed_kmh(self.actor.speed, self.config.hud_speed_factor);
        let mut state = self.game_state.borrow_mut();
        let dirty = state.take_hud_dirty();
        if !dirty && self.shown_speed == Some(kmh) {
            return (false, false);
        }
        hud::refresh(hud, kmh, &state);
        self.shown_speed = Some(kmh);
        (true, dirty)
    }
}
