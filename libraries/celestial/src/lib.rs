use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod backdrop;
pub mod body;
pub mod color;
pub mod exoplanet;
pub mod orbit;
pub mod record;
pub mod registry;
pub mod scene;
pub mod star;
pub mod sun;

/// Systems that move bodies. Runs once per frame, before the camera reads positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum CelestialSet {
    Animate,
}

pub struct CelestialPlugin {
    pub scene: scene::SolarSystem,
    pub draw_orbits: bool,
    pub seed: Option<u64>,
}

impl Default for CelestialPlugin {
    fn default() -> Self {
        Self {
            scene: scene::SolarSystem::default(),
            draw_orbits: true,
            seed: None,
        }
    }
}

impl PluginGroup for CelestialPlugin {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(body::BodyPlugin)
            .add(registry::RegistryPlugin { seed: self.seed })
            .add(orbit::OrbitPlugin {
                draw_orbits: self.draw_orbits,
            })
            .add(scene::ScenePlugin { scene: self.scene })
            .add(backdrop::BackdropPlugin)
    }
}

/// Source of every random draw in the scene: initial planet angles, exoplanet
/// orbit placement and the backdrop.
#[derive(Resource, Deref, DerefMut)]
pub struct CelestialRng(StdRng);

impl CelestialRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for CelestialRng {
    fn default() -> Self {
        Self::new(None)
    }
}
