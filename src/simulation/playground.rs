//! Playground controller: the single coordination point between input,
//! simulation time, and drawing
//!
//! Owns the physics world, the orbit camera, the spawner, and the per-body
//! render records. Input handlers mutate it between frames; the render loop
//! calls [`Playground::advance_frame`] exactly once per callback and only
//! then reads transforms, so a frame never mixes pre-step and post-step
//! positions.
//!
//! In Bevy terms this is inserted as a `Resource` and read/written by the
//! viewer systems.

use bevy::prelude::Resource;
use nalgebra::{Isometry3, Translation3, Vector3};

use crate::configuration::config::PlaygroundConfig;
use crate::simulation::camera::OrbitCamera;
use crate::simulation::error::PhysicsError;
use crate::simulation::physics::{BodyId, PhysicsWorld, ShapeDescriptor};
use crate::simulation::spawner::BodySpawner;

/// What a body looks like, independent of its dynamics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Cube,
    Sphere,
    Projectile,
}

/// Render-side record of one live body
///
/// Kept 1:1 with the physics world: every record's id is live until
/// [`Playground::reset`] clears both collections together.
#[derive(Debug, Clone, Copy)]
pub struct BodyRecord {
    pub id: BodyId,
    pub kind: BodyKind,
    pub shape: ShapeDescriptor,
}

/// Bevy resource holding the whole interactive session
#[derive(Resource)]
pub struct Playground {
    pub config: PlaygroundConfig,
    pub world: PhysicsWorld,
    pub camera: OrbitCamera,
    spawner: BodySpawner,
    records: Vec<BodyRecord>,

    // Mutable toggles, owned here and only here
    pub animate: bool,
    pub random_place: bool,
    pub draw_bbox: bool,
    pub wireframe: bool,

    aspect: f32,
    rejected: u32,
}

impl Playground {
    /// Build a fresh session: empty world, configured camera, animation on,
    /// all debug flags off.
    pub fn new(config: PlaygroundConfig) -> Self {
        let world = PhysicsWorld::new(
            Vector3::from(config.physics.gravity),
            config.physics.max_bodies,
            config.physics.ground.as_ref(),
        );
        let camera = OrbitCamera::new(&config.camera);
        let spawner = BodySpawner::new(&config.spawn);

        Self {
            config,
            world,
            camera,
            spawner,
            records: Vec::new(),
            animate: true,
            random_place: false,
            draw_bbox: false,
            wireframe: false,
            aspect: 16.0 / 9.0,
            rejected: 0,
        }
    }

    /// Window resize: only the projection aspect changes.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Advance simulation time for this render callback.
    ///
    /// Steps the world once iff animating; the caller must invoke this
    /// before reading any transform for the frame. Returns whether a step
    /// ran.
    pub fn advance_frame(&mut self, dt: f32) -> bool {
        if self.animate && dt > 0.0 {
            self.world.step(dt);
            true
        } else {
            false
        }
    }

    /// Manual single step at the fixed tick, for use while paused.
    ///
    /// A no-op while animating: the automatic path owns stepping that
    /// frame, and a frame must never step twice.
    pub fn step_once(&mut self) -> bool {
        if self.animate {
            return false;
        }
        self.world.step(self.config.physics.timestep);
        true
    }

    /// Spawn a cube under the current placement policy.
    pub fn add_cube(&mut self) -> Option<BodyRecord> {
        let (shape, transform) = self.spawner.spawn_cube(self.random_place);
        self.insert(BodyKind::Cube, shape, transform, None)
    }

    /// Spawn a sphere under the current placement policy.
    pub fn add_sphere(&mut self) -> Option<BodyRecord> {
        let (shape, transform) = self.spawner.spawn_sphere(self.random_place);
        self.insert(BodyKind::Sphere, shape, transform, None)
    }

    /// Launch a projectile from the viewpoint.
    ///
    /// The body spawns offset along the view direction (clear of the near
    /// plane) with initial velocity `forward * speed`; both constants come
    /// from [`FireConfig`](crate::configuration::config::FireConfig).
    pub fn fire(&mut self) -> Option<BodyRecord> {
        let forward = self.camera.forward();
        let origin = self.camera.eye() + forward * self.config.fire.offset;

        let shape = ShapeDescriptor::Ball {
            radius: self.config.fire.radius,
        };
        let transform = Isometry3::from_parts(
            Translation3::new(origin.x, origin.y, origin.z),
            nalgebra::UnitQuaternion::identity(),
        );
        let velocity = forward * self.config.fire.speed;

        self.insert(BodyKind::Projectile, shape, transform, Some(velocity))
    }

    /// Remove every body from the world and the render records together.
    ///
    /// The camera is untouched; see [`reset_view`](Self::reset_view).
    pub fn reset(&mut self) {
        self.world.remove_all_bodies();
        self.records.clear();
    }

    /// Restore the configured camera pose.
    pub fn reset_view(&mut self) {
        self.camera.reset(&self.config.camera);
    }

    pub fn toggle_animate(&mut self) {
        self.animate = !self.animate;
    }

    pub fn toggle_random_place(&mut self) {
        self.random_place = !self.random_place;
    }

    pub fn toggle_bbox(&mut self) {
        self.draw_bbox = !self.draw_bbox;
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    /// Current world transform of a live body.
    pub fn transform(&self, id: BodyId) -> Result<Isometry3<f32>, PhysicsError> {
        self.world.transform(id)
    }

    /// Render records, 1:1 with the live bodies.
    pub fn records(&self) -> &[BodyRecord] {
        &self.records
    }

    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Adds dropped so far because the world was full.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    fn insert(
        &mut self,
        kind: BodyKind,
        shape: ShapeDescriptor,
        transform: Isometry3<f32>,
        velocity: Option<Vector3<f32>>,
    ) -> Option<BodyRecord> {
        let id = match self.world.add_body(&shape, transform) {
            Ok(id) => id,
            Err(PhysicsError::CapacityExceeded { .. }) => {
                // Dropped, counted, not an error
                self.rejected += 1;
                return None;
            }
            Err(_) => return None,
        };

        if let Some(v) = velocity {
            self.world
                .set_linear_velocity(id, v)
                .expect("freshly added body is live");
        }

        let record = BodyRecord { id, kind, shape };
        self.records.push(record);
        Some(record)
    }
}
