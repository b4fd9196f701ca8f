//! Body spawner: decides where and how a new body enters the world
//!
//! Two placement modes:
//! - fixed: every body spawns at the canonical transform, identity position
//!   and identity orientation
//! - randomized: position uniform in an axis-aligned box around the drop
//!   point, orientation from uniform per-axis Euler angles
//!
//! The RNG is a seeded `StdRng` so a given seed always reproduces the same
//! placement sequence.

use std::f32::consts::TAU;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::SpawnConfig;
use crate::simulation::physics::ShapeDescriptor;

pub struct BodySpawner {
    rng: StdRng,
    drop_point: Vector3<f32>,
    half_extent: f32,
    cube_half_extent: f32,
    sphere_radius: f32,
}

impl BodySpawner {
    pub fn new(cfg: &SpawnConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(cfg.seed),
            drop_point: Vector3::from(cfg.drop_point),
            half_extent: cfg.half_extent,
            cube_half_extent: cfg.cube_half_extent,
            sphere_radius: cfg.sphere_radius,
        }
    }

    /// Shape and transform for a new cube.
    pub fn spawn_cube(&mut self, randomize: bool) -> (ShapeDescriptor, Isometry3<f32>) {
        let h = self.cube_half_extent;
        let shape = ShapeDescriptor::Cuboid {
            half_extents: Vector3::new(h, h, h),
        };
        (shape, self.placement(randomize))
    }

    /// Shape and transform for a new sphere.
    pub fn spawn_sphere(&mut self, randomize: bool) -> (ShapeDescriptor, Isometry3<f32>) {
        let shape = ShapeDescriptor::Ball {
            radius: self.sphere_radius,
        };
        (shape, self.placement(randomize))
    }

    fn placement(&mut self, randomize: bool) -> Isometry3<f32> {
        if !randomize {
            // Canonical transform: origin, identity orientation
            return Isometry3::identity();
        }

        let e = self.half_extent;
        let offset = Vector3::new(
            self.rng.gen_range(-e..=e),
            self.rng.gen_range(-e..=e),
            self.rng.gen_range(-e..=e),
        );
        // Uniform per-axis angles, an approximation of uniform rotations
        let rotation = UnitQuaternion::from_euler_angles(
            self.rng.gen_range(0.0..TAU),
            self.rng.gen_range(0.0..TAU),
            self.rng.gen_range(0.0..TAU),
        );

        Isometry3::from_parts(Translation3::from(self.drop_point + offset), rotation)
    }
}
