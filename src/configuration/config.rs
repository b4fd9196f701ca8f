//! Configuration types for loading playground setups from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! playground session. A setup consists of:
//!
//! - [`PhysicsConfig`] – gravity, timestep, body ceiling, optional ground
//! - [`SpawnConfig`]   – placement policy region, shape sizes, RNG seed
//! - [`FireConfig`]    – projectile launch geometry and speed
//! - [`CameraConfig`]  – initial orbit pose and motion limits
//! - [`PlaygroundConfig`] – top-level wrapper used to load a setup from YAML
//!
//! # YAML format
//! An example setup YAML matching these types:
//!
//! ```yaml
//! physics:
//!   gravity: [ 0.0, -9.81, 0.0 ]
//!   timestep: 0.016666          # fixed tick used for manual stepping
//!   max_bodies: 256             # adds past this are dropped, not fatal
//!   ground:
//!     half_extents: [ 50.0, 0.5, 50.0 ]
//!     center_y: -1.0            # ground top sits at center_y + half height
//!
//! spawn:
//!   seed: 42                    # placement RNG seed, reruns reproduce
//!   drop_point: [ 0.0, 6.0, 0.0 ]
//!   half_extent: 4.0            # randomized positions fall in this box
//!   cube_half_extent: 0.5
//!   sphere_radius: 0.5
//!
//! fire:
//!   offset: 2.0                 # spawn distance along the view direction
//!   speed: 18.0                 # launch speed, units per second
//!   radius: 0.25                # projectile sphere radius
//!
//! camera:
//!   target: [ 0.0, 2.0, 0.0 ]
//!   yaw: 0.0
//!   pitch: 0.35
//!   distance: 14.0
//!   fov_deg: 45.0
//!   near: 0.1
//!   far: 500.0
//!   min_distance: 1.0
//! ```
//!
//! The viewer maps this configuration into the runtime playground state.

use serde::Deserialize;

/// Physics world configuration
#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],            // world gravity vector
    pub timestep: f32,                // fixed tick for single-stepping
    pub max_bodies: usize,            // live-body ceiling, soft rejection past it
    pub ground: Option<GroundConfig>, // omit for a free-fall world (tests)
}

/// Fixed ground slab; not a dynamic body, never removed by reset
#[derive(Deserialize, Debug, Clone)]
pub struct GroundConfig {
    pub half_extents: [f32; 3], // cuboid half extents
    pub center_y: f32,          // slab center height
}

/// Placement policy for newly spawned bodies
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub seed: u64,             // RNG seed, same seed -> same placements
    pub drop_point: [f32; 3],  // center of the randomized spawn region
    pub half_extent: f32,      // half side of the spawn box
    pub cube_half_extent: f32, // cube size
    pub sphere_radius: f32,    // sphere size
}

/// Projectile launch geometry
///
/// The offset keeps new projectiles clear of the camera near plane.
#[derive(Deserialize, Debug, Clone)]
pub struct FireConfig {
    pub offset: f32, // spawn distance along the view direction
    pub speed: f32,  // launch speed
    pub radius: f32, // projectile sphere radius
}

/// Initial orbit camera pose and motion limits
#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
    pub target: [f32; 3],  // look-at point
    pub yaw: f32,          // radians around the vertical axis
    pub pitch: f32,        // radians above/below the horizon
    pub distance: f32,     // eye distance from the target
    pub fov_deg: f32,      // vertical field of view, degrees
    pub near: f32,         // near plane
    pub far: f32,          // far plane
    pub min_distance: f32, // zoom floor, prevents inversion through the target
}

/// Top-level playground configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct PlaygroundConfig {
    pub physics: PhysicsConfig, // world-level settings
    pub spawn: SpawnConfig,     // placement policy
    pub fire: FireConfig,       // projectile launch constants
    pub camera: CameraConfig,   // initial viewpoint
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            timestep: 1.0 / 60.0,
            max_bodies: 256,
            ground: Some(GroundConfig {
                half_extents: [50.0, 0.5, 50.0],
                center_y: -1.0,
            }),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            drop_point: [0.0, 6.0, 0.0],
            half_extent: 4.0,
            cube_half_extent: 0.5,
            sphere_radius: 0.5,
        }
    }
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            offset: 2.0,
            speed: 18.0,
            radius: 0.25,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 2.0, 0.0],
            yaw: 0.0,
            pitch: 0.35,
            distance: 14.0,
            fov_deg: 45.0,
            near: 0.1,
            far: 500.0,
            min_distance: 1.0,
        }
    }
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            spawn: SpawnConfig::default(),
            fire: FireConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}
