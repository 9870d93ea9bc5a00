use crate::body::{self, BodyAssets, BodyKind, RotationSpeed};
use crate::color;
use crate::orbit::CircularOrbit;
use crate::registry::{EntityRegistry, RegistryEntry};
use crate::sun::spawn_sun;
use crate::CelestialRng;
use bevy::prelude::*;
use bevy::utils::HashSet;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::Path;

mod error;
mod manifest;

pub use error::SceneLoadError;
pub use manifest::{
    BackdropConfig, CameraConfig, GlowConfig, LightConfig, PlanetConfig, RingConfig, SolarSystem,
    SunConfig,
};

pub const PLANET_COUNT: usize = 8;
const RING_SEGMENTS: u32 = 64;
const EMBEDDED_MANIFEST: &str = include_str!("solar.system.yaml");

pub struct ScenePlugin {
    pub scene: SolarSystem,
}

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.scene.clone())
            .add_systems(Startup, spawn_solar_system);
    }
}

impl SolarSystem {
    pub fn from_yaml(input: &str) -> Result<Self, SceneLoadError> {
        let scene = serde_yaml::from_str::<Self>(input)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneLoadError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml(&input)
    }

    pub fn validate(&self) -> Result<(), SceneLoadError> {
        if self.planets.len() != PLANET_COUNT {
            return Err(SceneLoadError::PlanetCount {
                expected: PLANET_COUNT,
                found: self.planets.len(),
            });
        }
        let mut names = HashSet::new();
        let planet_names = self.planets.iter().map(|planet| &planet.name);
        for name in std::iter::once(&self.sun.name).chain(planet_names) {
            if !names.insert(name.as_str()) {
                return Err(SceneLoadError::DuplicateName(name.clone()));
            }
        }
        Ok(())
    }

    pub fn planet(&self, name: &str) -> Option<&PlanetConfig> {
        self.planets.iter().find(|planet| planet.name == name)
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        serde_yaml::from_str(EMBEDDED_MANIFEST).expect("embedded solar system manifest is valid")
    }
}

fn spawn_solar_system(
    mut commands: Commands,
    scene: Res<SolarSystem>,
    assets: Res<BodyAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<EntityRegistry>,
    mut rng: ResMut<CelestialRng>,
) {
    let sun = spawn_sun(
        &mut commands,
        assets.sphere.clone(),
        &mut materials,
        &scene.sun,
    );
    registry.register_fixed(
        BodyKind::Sun,
        scene.sun.name.clone(),
        RegistryEntry {
            entity: sun,
            radius: scene.sun.radius,
            spawn_position: Vec3::ZERO,
        },
    );

    for config in &scene.planets {
        let angle = rng.gen_range(0.0..TAU);
        let orbit = CircularOrbit::new(config.distance, config.orbit_speed, angle);
        let surface = color::parse_or_fallback(&config.color);
        let material = materials.add(StandardMaterial {
            base_color: surface.into(),
            perceptual_roughness: 0.8,
            metallic: 0.2,
            ..default()
        });
        let mut planet = body::spawn(
            &mut commands,
            BodyKind::Planet,
            config.name.clone(),
            assets.sphere.clone(),
            material,
            orbit.position(),
            config.radius,
            RotationSpeed(config.spin),
        );
        planet.insert(orbit);
        if let Some(ring) = &config.ring {
            let mesh = meshes.add(
                Annulus::new(ring.inner, ring.outer)
                    .mesh()
                    .resolution(RING_SEGMENTS),
            );
            let material = materials.add(StandardMaterial {
                base_color: color::parse_or_fallback(&ring.color)
                    .with_alpha(ring.opacity)
                    .into(),
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                perceptual_roughness: 0.8,
                metallic: 0.1,
                ..default()
            });
            planet.with_children(|parent| {
                parent.spawn((
                    Name::new(format!("{} ring", config.name)),
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                    Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
                ));
            });
        }

        registry.register_fixed(
            BodyKind::Planet,
            config.name.clone(),
            RegistryEntry {
                entity: planet.id(),
                radius: config.radius,
                spawn_position: orbit.position(),
            },
        );
    }
    info!("Spawned {} with {} planets", scene.sun.name, scene.planets.len());
}
