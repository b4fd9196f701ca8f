//! Physics world wrapper around Rapier
//!
//! Owns every rigid body and integrates them forward in time. The rest of
//! the crate only sees this interface:
//! - `add_body` / `set_linear_velocity` / `remove_all_bodies`
//! - `step` (one logical advance per call)
//! - `transform` / `linear_velocity` queries by [`BodyId`]
//!
//! Rapier types never leak past this module, so the engine stays swappable.

use nalgebra::{Isometry3, Vector3};
use rapier3d::dynamics::{
    CCDSolver, ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet,
    RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
};
use rapier3d::geometry::{BroadPhaseMultiSap, ColliderBuilder, ColliderSet, NarrowPhase};
use rapier3d::pipeline::{PhysicsPipeline, QueryPipeline};

use crate::configuration::config::GroundConfig;
use crate::simulation::error::PhysicsError;

/// Stable identifier for a live dynamic body
///
/// Wraps Rapier's generational handle, so an id from a removed body can
/// never alias a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(RigidBodyHandle);

/// Collision shape for a new body, in Rapier's collider vocabulary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDescriptor {
    Cuboid { half_extents: Vector3<f32> },
    Ball { radius: f32 },
}

/// Rigid-body simulation world.
pub struct PhysicsWorld {
    // Rapier components
    pipeline: PhysicsPipeline,
    gravity: Vector3<f32>,
    integration_params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: BroadPhaseMultiSap,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    // Live dynamic bodies, in insertion order; the ground is not in here
    dynamic: Vec<RigidBodyHandle>,
    max_bodies: usize,
}

impl PhysicsWorld {
    /// Create a world with the given gravity and body ceiling.
    ///
    /// When `ground` is set, a fixed cuboid is inserted at the configured
    /// height; it never counts toward the ceiling and survives
    /// [`remove_all_bodies`](Self::remove_all_bodies).
    pub fn new(gravity: Vector3<f32>, max_bodies: usize, ground: Option<&GroundConfig>) -> Self {
        let mut world = Self {
            pipeline: PhysicsPipeline::new(),
            gravity,
            integration_params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseMultiSap::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            dynamic: Vec::new(),
            max_bodies,
        };

        if let Some(g) = ground {
            let body = RigidBodyBuilder::fixed()
                .translation(Vector3::new(0.0, g.center_y, 0.0))
                .build();
            let handle = world.bodies.insert(body);
            let collider = ColliderBuilder::cuboid(
                g.half_extents[0],
                g.half_extents[1],
                g.half_extents[2],
            )
            .friction(0.8)
            .build();
            world
                .colliders
                .insert_with_parent(collider, handle, &mut world.bodies);
        }

        world
    }

    /// Insert a new dynamic body and return its id.
    ///
    /// Rejects with [`PhysicsError::CapacityExceeded`] once the ceiling is
    /// reached; the world is left untouched in that case.
    pub fn add_body(
        &mut self,
        shape: &ShapeDescriptor,
        transform: Isometry3<f32>,
    ) -> Result<BodyId, PhysicsError> {
        if self.dynamic.len() >= self.max_bodies {
            return Err(PhysicsError::CapacityExceeded {
                limit: self.max_bodies,
            });
        }

        let body = RigidBodyBuilder::dynamic().position(transform).build();
        let handle = self.bodies.insert(body);

        let collider = match shape {
            ShapeDescriptor::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                    .friction(0.8)
                    .restitution(0.1)
            }
            ShapeDescriptor::Ball { radius } => {
                ColliderBuilder::ball(*radius).friction(0.5).restitution(0.4)
            }
        }
        .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.dynamic.push(handle);
        Ok(BodyId(handle))
    }

    /// Set a body's linear velocity; takes effect on the very next `step`.
    pub fn set_linear_velocity(
        &mut self,
        id: BodyId,
        velocity: Vector3<f32>,
    ) -> Result<(), PhysicsError> {
        let body = self
            .bodies
            .get_mut(id.0)
            .ok_or(PhysicsError::UnknownBody(id))?;
        body.set_linvel(velocity, true);
        Ok(())
    }

    /// Remove every dynamic body. Static ground geometry is unaffected.
    pub fn remove_all_bodies(&mut self) {
        for handle in self.dynamic.drain(..) {
            self.bodies.remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    /// Advance the simulation by `dt` seconds: exactly one logical step.
    pub fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
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

    /// Current world transform of a live body.
    pub fn transform(&self, id: BodyId) -> Result<Isometry3<f32>, PhysicsError> {
        let body = self.bodies.get(id.0).ok_or(PhysicsError::UnknownBody(id))?;
        Ok(*body.position())
    }

    /// Current linear velocity of a live body.
    pub fn linear_velocity(&self, id: BodyId) -> Result<Vector3<f32>, PhysicsError> {
        let body = self.bodies.get(id.0).ok_or(PhysicsError::UnknownBody(id))?;
        Ok(*body.linvel())
    }

    /// Number of live dynamic bodies (ground excluded).
    pub fn body_count(&self) -> usize {
        self.dynamic.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_fall_world(max_bodies: usize) -> PhysicsWorld {
        PhysicsWorld::new(Vector3::new(0.0, -9.81, 0.0), max_bodies, None)
    }

    #[test]
    fn add_then_query_roundtrip() {
        let mut world = free_fall_world(8);
        let shape = ShapeDescriptor::Ball { radius: 0.5 };
        let iso = Isometry3::translation(1.0, 2.0, 3.0);

        let id = world.add_body(&shape, iso).unwrap();
        let got = world.transform(id).unwrap();

        assert_eq!(got.translation.vector, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn removed_id_is_an_error() {
        let mut world = free_fall_world(8);
        let id = world
            .add_body(&ShapeDescriptor::Ball { radius: 0.5 }, Isometry3::identity())
            .unwrap();

        world.remove_all_bodies();

        assert!(matches!(
            world.transform(id),
            Err(PhysicsError::UnknownBody(_))
        ));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn capacity_is_a_soft_rejection() {
        let mut world = free_fall_world(2);
        let shape = ShapeDescriptor::Cuboid {
            half_extents: Vector3::new(0.5, 0.5, 0.5),
        };

        assert!(world.add_body(&shape, Isometry3::identity()).is_ok());
        assert!(world.add_body(&shape, Isometry3::identity()).is_ok());
        assert!(matches!(
            world.add_body(&shape, Isometry3::identity()),
            Err(PhysicsError::CapacityExceeded { limit: 2 })
        ));
        assert_eq!(world.body_count(), 2);
    }

    #[test]
    fn velocity_applies_before_first_step() {
        let mut world = free_fall_world(8);
        let id = world
            .add_body(&ShapeDescriptor::Ball { radius: 0.5 }, Isometry3::identity())
            .unwrap();

        world.set_linear_velocity(id, Vector3::new(3.0, 0.0, 0.0)).unwrap();

        // Reported immediately, before any step has run
        assert_eq!(world.linear_velocity(id).unwrap(), Vector3::new(3.0, 0.0, 0.0));
    }
}
