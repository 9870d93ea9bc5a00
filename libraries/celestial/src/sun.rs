use crate::body::{self, BodyKind, RotationSpeed};
use crate::color;
use crate::scene::SunConfig;
use crate::star::{glow_material, StarGlow, StarLight};
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

/// Spawns the sun at the origin along with its glow shells, its light and the
/// scene's ambient light. Glow shells spin on their own, so they are not children.
pub fn spawn_sun(
    commands: &mut Commands,
    sphere: Handle<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &SunConfig,
) -> Entity {
    let surface = color::parse_or_fallback(&config.color);
    let material = materials.add(StandardMaterial {
        base_color: surface.into(),
        emissive: LinearRgba::from(surface),
        unlit: true,
        ..default()
    });

    let sun = body::spawn(
        commands,
        BodyKind::Sun,
        config.name.clone(),
        sphere.clone(),
        material,
        Vec3::ZERO,
        config.radius,
        RotationSpeed(config.spin),
    )
    .insert(NotShadowCaster)
    .id();

    for (i, glow) in config.glows.iter().enumerate() {
        let tint = color::parse_or_fallback(&glow.color);
        let material = glow_material(materials, tint, glow.opacity);
        commands.spawn((
            StarGlow,
            Name::new(format!("{} glow {i}", config.name)),
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material),
            Transform::from_scale(Vec3::splat(glow.radius)),
            RotationSpeed(glow.spin),
            NotShadowCaster,
        ));
    }

    commands.spawn((
        StarLight,
        Name::new(format!("{} light", config.name)),
        PointLight {
            color: Color::WHITE,
            intensity: config.light.intensity,
            range: config.light.range,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: config.ambient_brightness,
    });

    sun
}
