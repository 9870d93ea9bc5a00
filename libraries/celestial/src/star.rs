use crate::body::{self, BodyKind, RotationSpeed};
use crate::record::HostStarRecord;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

pub const HOST_STAR_SPIN: f32 = 0.002;
const GLOW_SCALE: f32 = 1.3;
const GLOW_OPACITY: f32 = 0.4;
const LIGHT_RANGE: f32 = 50.0;
/// Intensity of a star with solar luminosity.
const BASE_LIGHT_INTENSITY: f32 = 200_000.0;

/// Translucent shell around a star.
#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct StarGlow;

#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct StarLight;

/// Spawns a host star with its glow shell and point light as children.
pub fn spawn_host_star(
    commands: &mut Commands,
    sphere: Handle<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    record: &HostStarRecord,
) -> Entity {
    let surface = record.surface_color();
    let tint = record.tint().unwrap_or(surface);
    let material = materials.add(StandardMaterial {
        base_color: surface.into(),
        emissive: LinearRgba::from(surface),
        unlit: true,
        ..default()
    });
    let glow = glow_material(materials, tint, GLOW_OPACITY);

    body::spawn(
        commands,
        BodyKind::HostStar,
        record.name.clone(),
        sphere.clone(),
        material,
        record.position(),
        record.visual_radius(),
        RotationSpeed(HOST_STAR_SPIN),
    )
    .insert((record.clone(), NotShadowCaster))
    .with_children(|star| {
        star.spawn((
            StarGlow,
            Name::new("Glow"),
            Mesh3d(sphere),
            MeshMaterial3d(glow),
            Transform::from_scale(Vec3::splat(GLOW_SCALE)),
            NotShadowCaster,
        ));
        star.spawn((
            StarLight,
            Name::new("Light"),
            PointLight {
                color: tint.into(),
                intensity: BASE_LIGHT_INTENSITY * record.luminosity_ratio(),
                range: LIGHT_RANGE,
                ..default()
            },
        ));
    })
    .id()
}

pub fn glow_material(
    materials: &mut Assets<StandardMaterial>,
    color: Srgba,
    opacity: f32,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color.with_alpha(opacity).into(),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    })
}
