use crate::body::{self, BodyKind, RotationSpeed};
use crate::orbit::HostedOrbit;
use crate::record::ExoplanetRecord;
use bevy::prelude::*;

pub const EXOPLANET_SPIN: f32 = 0.01;
const EMISSIVE_STRENGTH: f32 = 0.2;

/// Spawns an exoplanet at `translation`. Hosted exoplanets also get their orbit.
pub fn spawn_exoplanet(
    commands: &mut Commands,
    sphere: Handle<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    record: &ExoplanetRecord,
    translation: Vec3,
    orbit: Option<HostedOrbit>,
) -> Entity {
    let color = record.surface_color();
    let material = materials.add(StandardMaterial {
        base_color: color.into(),
        emissive: LinearRgba::from(color) * EMISSIVE_STRENGTH,
        perceptual_roughness: 0.7,
        metallic: 0.3,
        ..default()
    });

    let mut entity = body::spawn(
        commands,
        BodyKind::Exoplanet,
        record.name.clone(),
        sphere,
        material,
        translation,
        record.visual_radius(),
        RotationSpeed(EXOPLANET_SPIN),
    );
    entity.insert(record.clone());
    if let Some(orbit) = orbit {
        entity.insert(orbit);
    }
    entity.id()
}
