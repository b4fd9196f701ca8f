use std::time::Instant;

use nalgebra::{Isometry3, Vector3};

use crate::configuration::config::GroundConfig;
use crate::simulation::physics::{PhysicsWorld, ShapeDescriptor};

/// Step-throughput benchmark: stacked cube worlds of increasing size
pub fn bench_step() {
    // Different world sizes to test
    let ns = [64, 128, 256, 512, 1024];
    let steps = 60; // one simulated second per world at the fixed tick
    let dt = 1.0 / 60.0;

    let ground = GroundConfig {
        half_extents: [50.0, 0.5, 50.0],
        center_y: -1.0,
    };

    for n in ns {
        let mut world = PhysicsWorld::new(Vector3::new(0.0, -9.81, 0.0), n, Some(&ground));

        // Deterministic grid of cubes above the ground, no rand needed
        let shape = ShapeDescriptor::Cuboid {
            half_extents: Vector3::new(0.5, 0.5, 0.5),
        };
        for i in 0..n {
            let col = (i % 8) as f32;
            let row = ((i / 8) % 8) as f32;
            let layer = (i / 64) as f32;
            let iso = Isometry3::translation(
                col * 1.1 - 4.0,
                layer * 1.1 + 0.5,
                row * 1.1 - 4.0,
            );
            world
                .add_body(&shape, iso)
                .expect("grid stays under the ceiling");
        }

        // Warm up
        world.step(dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step(dt);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, step = {:8.6} s", per_step);
    }
}
