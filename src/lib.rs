pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::camera::OrbitCamera;
pub use simulation::error::PhysicsError;
pub use simulation::physics::{BodyId, PhysicsWorld, ShapeDescriptor};
pub use simulation::playground::{BodyKind, BodyRecord, Playground};
pub use simulation::spawner::BodySpawner;
pub use simulation::transform::{model_matrix, mvp};

pub use configuration::config::{
    CameraConfig, FireConfig, GroundConfig, PhysicsConfig, PlaygroundConfig, SpawnConfig,
};

pub use visualization::viewer::run;

pub use benchmark::benchmark::bench_step;
