//! Error types for the playground simulation.

use thiserror::Error;

use crate::simulation::physics::BodyId;

/// Errors that can occur while talking to the physics world.
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// Queried a body id that is not (or no longer) live.
    #[error("unknown body id {0:?}")]
    UnknownBody(BodyId),

    /// The world is at its configured body ceiling; the add was dropped.
    #[error("body capacity exceeded (limit {limit})")]
    CapacityExceeded {
        /// Configured maximum number of live dynamic bodies.
        limit: usize,
    },
}
