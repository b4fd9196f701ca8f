use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::primitives::{Cuboid, Sphere};
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::configuration::config::PlaygroundConfig;
use crate::simulation::physics::{BodyId, ShapeDescriptor};
use crate::simulation::playground::{BodyKind, BodyRecord, Playground};

/// Component tagging each mesh entity with its body id
#[derive(Component)]
struct BodyRef(BodyId);

/// Marker for the HUD text line
#[derive(Component)]
struct HudText;

/// Entrypoint: build the Bevy app around a [`Playground`] resource
pub fn run(config: PlaygroundConfig) {
    println!("run: starting playground viewer ({} max bodies)", config.physics.max_bodies);
    print_controls();

    App::new()
        .insert_resource(Playground::new(config))
        .add_plugins(DefaultPlugins)
        .add_plugins(WireframePlugin)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                handle_resize,
                handle_keys,
                handle_mouse,
                advance_simulation,
                sync_body_transforms,
                sync_camera,
                draw_bboxes,
                update_hud,
            )
                .chain(),
        )
        .run();
}

fn print_controls() {
    println!("controls:");
    println!("  space  toggle animation      e      single step (paused)");
    println!("  1      add cube              2      add sphere");
    println!("  f      fire projectile       r      reset bodies");
    println!("  p      toggle random place   v      reset view");
    println!("  b      toggle bounding box   w      toggle wireframe");
    println!("  LMB drag orbit, RMB drag pan, wheel zoom");
}

/// Startup system: camera, light, ground, axes, HUD
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    playground: Res<Playground>,
) {
    let cam = &playground.camera;
    let eye = cam.eye();
    let target = cam.target;

    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.02, 0.02, 0.04)),
            ..Default::default()
        },
        projection: Projection::Perspective(PerspectiveProjection {
            fov: cam.fov_y(),
            near: cam.near(),
            far: cam.far(),
            ..Default::default()
        }),
        transform: Transform::from_xyz(eye.x, eye.y, eye.z)
            .looking_at(Vec3::new(target.x, target.y, target.z), Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 2_000_000.0,
            range: 200.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0),
        ..Default::default()
    });

    // Ground slab, when the config has one
    if let Some(ground) = &playground.config.physics.ground {
        let [hx, hy, hz] = ground.half_extents;
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0).mesh()),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.25, 0.25, 0.28),
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, ground.center_y, 0.0),
            ..Default::default()
        });
    }

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 18.0,
                color: Color::WHITE,
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..Default::default()
        }),
        HudText,
    ));
}

/// Resize only touches the projection aspect
fn handle_resize(mut events: EventReader<WindowResized>, mut playground: ResMut<Playground>) {
    for e in events.read() {
        playground.on_resize(e.width, e.height);
    }
}

/// Discrete actions: toggles, spawning, fire, reset, single step
fn handle_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut playground: ResMut<Playground>,
    mut wireframe_config: ResMut<WireframeConfig>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    body_entities: Query<Entity, With<BodyRef>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        playground.toggle_animate();
    }
    if keys.just_pressed(KeyCode::KeyE) {
        playground.step_once();
    }
    if keys.just_pressed(KeyCode::KeyP) {
        playground.toggle_random_place();
    }
    if keys.just_pressed(KeyCode::KeyB) {
        playground.toggle_bbox();
    }
    if keys.just_pressed(KeyCode::KeyW) {
        playground.toggle_wireframe();
        wireframe_config.global = playground.wireframe;
    }
    if keys.just_pressed(KeyCode::KeyV) {
        playground.reset_view();
    }

    if keys.just_pressed(KeyCode::Digit1) {
        match playground.add_cube() {
            Some(record) => spawn_body_mesh(&mut commands, &mut meshes, &mut materials, &playground, &record),
            None => warn!("add cube dropped: world full ({} rejected)", playground.rejected()),
        }
    }
    if keys.just_pressed(KeyCode::Digit2) {
        match playground.add_sphere() {
            Some(record) => spawn_body_mesh(&mut commands, &mut meshes, &mut materials, &playground, &record),
            None => warn!("add sphere dropped: world full ({} rejected)", playground.rejected()),
        }
    }
    if keys.just_pressed(KeyCode::KeyF) {
        match playground.fire() {
            Some(record) => spawn_body_mesh(&mut commands, &mut meshes, &mut materials, &playground, &record),
            None => warn!("fire dropped: world full ({} rejected)", playground.rejected()),
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        playground.reset();
        // Keep the mesh entities 1:1 with the (now empty) records
        for entity in body_entities.iter() {
            commands.entity(entity).despawn();
        }
    }
}

/// Pointer input: LMB orbit, RMB pan, wheel zoom
fn handle_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut playground: ResMut<Playground>,
) {
    let mut delta = Vec2::ZERO;
    for e in motion.read() {
        delta += e.delta;
    }

    if delta != Vec2::ZERO {
        if buttons.pressed(MouseButton::Left) {
            playground.camera.orbit(delta.x, delta.y);
        } else if buttons.pressed(MouseButton::Right) {
            playground.camera.pan(delta.x, delta.y);
        }
    }

    for e in wheel.read() {
        let notches = match e.unit {
            MouseScrollUnit::Line => e.y,
            MouseScrollUnit::Pixel => e.y * 0.05,
        };
        if notches != 0.0 {
            playground.camera.zoom(notches);
        }
    }
}

/// The frame's single physics step, before any transform read
fn advance_simulation(time: Res<Time>, mut playground: ResMut<Playground>) {
    playground.advance_frame(time.delta_seconds());
}

/// Copy post-step body transforms onto the mesh entities
fn sync_body_transforms(
    playground: Res<Playground>,
    mut query: Query<(&BodyRef, &mut Transform)>,
) {
    for (BodyRef(id), mut transform) in &mut query {
        match playground.transform(*id) {
            Ok(iso) => {
                transform.translation = Vec3::new(
                    iso.translation.vector.x,
                    iso.translation.vector.y,
                    iso.translation.vector.z,
                );
                transform.rotation =
                    Quat::from_xyzw(iso.rotation.i, iso.rotation.j, iso.rotation.k, iso.rotation.w);
            }
            // Records and world are kept 1:1, so this is a contract bug
            Err(e) => error!("stale body entity: {e}"),
        }
    }
}

/// Drive the render camera from the orbit camera state
fn sync_camera(playground: Res<Playground>, mut query: Query<&mut Transform, With<Camera3d>>) {
    let eye = playground.camera.eye();
    let target = playground.camera.target;

    for mut transform in &mut query {
        *transform = Transform::from_xyz(eye.x, eye.y, eye.z)
            .looking_at(Vec3::new(target.x, target.y, target.z), Vec3::Y);
    }
}

/// Bounding-box overlay via gizmos, oriented with each body
fn draw_bboxes(playground: Res<Playground>, mut gizmos: Gizmos) {
    if !playground.draw_bbox {
        return;
    }

    for record in playground.records() {
        let Ok(iso) = playground.transform(record.id) else {
            continue;
        };
        let translation = Vec3::new(
            iso.translation.vector.x,
            iso.translation.vector.y,
            iso.translation.vector.z,
        );
        let rotation =
            Quat::from_xyzw(iso.rotation.i, iso.rotation.j, iso.rotation.k, iso.rotation.w);
        let scale = match record.shape {
            ShapeDescriptor::Cuboid { half_extents } => {
                Vec3::new(half_extents.x, half_extents.y, half_extents.z) * 2.0
            }
            ShapeDescriptor::Ball { radius } => Vec3::splat(radius * 2.0),
        };

        gizmos.cuboid(
            Transform::from_translation(translation)
                .with_rotation(rotation)
                .with_scale(scale),
            Color::srgb(0.1, 1.0, 0.1),
        );
    }
}

/// One-line frame info
fn update_hud(playground: Res<Playground>, mut query: Query<&mut Text, With<HudText>>) {
    let status = if playground.animate { "running" } else { "paused" };
    let line = format!(
        "bodies {}  rejected {}  {}{}{}{}",
        playground.body_count(),
        playground.rejected(),
        status,
        if playground.random_place { "  random" } else { "" },
        if playground.draw_bbox { "  bbox" } else { "" },
        if playground.wireframe { "  wire" } else { "" },
    );

    for mut text in &mut query {
        text.sections[0].value.clone_from(&line);
    }
}

/// Build the mesh entity for a freshly spawned body
fn spawn_body_mesh(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    playground: &Playground,
    record: &BodyRecord,
) {
    let mesh = match record.shape {
        ShapeDescriptor::Cuboid { half_extents } => meshes.add(
            Cuboid::new(half_extents.x * 2.0, half_extents.y * 2.0, half_extents.z * 2.0).mesh(),
        ),
        ShapeDescriptor::Ball { radius } => meshes.add(Sphere::new(radius).mesh()),
    };

    let color = match record.kind {
        BodyKind::Cube => Color::srgb(0.85, 0.35, 0.2),
        BodyKind::Sphere => Color::srgb(0.25, 0.45, 0.9),
        BodyKind::Projectile => Color::srgb(0.95, 0.85, 0.2),
    };

    let transform = playground
        .transform(record.id)
        .map(|iso| {
            Transform::from_xyz(
                iso.translation.vector.x,
                iso.translation.vector.y,
                iso.translation.vector.z,
            )
            .with_rotation(Quat::from_xyzw(
                iso.rotation.i,
                iso.rotation.j,
                iso.rotation.k,
                iso.rotation.w,
            ))
        })
        .unwrap_or_default();

    commands.spawn((
        PbrBundle {
            mesh,
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            transform,
            ..Default::default()
        },
        BodyRef(record.id),
    ));
}

// =========================================================================================
// World axes for visual reference
// =========================================================================================

fn spawn_axes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let axis_len = 10.0;
    let axis_thickness = 0.04;

    // X axis: red
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_len, axis_thickness, axis_thickness).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0),
            unlit: true,
            ..Default::default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });

    // Y axis: green
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_thickness, axis_len, axis_thickness).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 1.0, 0.0),
            unlit: true,
            ..Default::default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });

    // Z axis: blue
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_thickness, axis_thickness, axis_len).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 0.0, 1.0),
            unlit: true,
            ..Default::default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });
}
