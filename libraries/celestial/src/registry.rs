use crate::body::{BodyAssets, BodyKind};
use crate::exoplanet::spawn_exoplanet;
use crate::orbit::HostedOrbit;
use crate::record::{ExoplanetRecord, HostStarRecord};
use crate::star::spawn_host_star;
use crate::CelestialRng;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::utils::HashMap;

pub struct RegistryPlugin {
    pub seed: Option<u64>,
}

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EntityRegistry>()
            .insert_resource(CelestialRng::new(self.seed));
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegistryEntry {
    pub entity: Entity,
    pub radius: f32,
    /// Where the body was placed when registered. Host stars never move, so this is
    /// their position for good; orbiting bodies must be read from their `Transform`.
    pub spawn_position: Vec3,
}

#[derive(Debug, Default)]
struct Collection {
    index: HashMap<String, RegistryEntry>,
    order: Vec<String>,
}

impl Collection {
    fn insert(&mut self, key: String, entry: RegistryEntry) -> Option<RegistryEntry> {
        let previous = self.index.insert(key.clone(), entry);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    fn remove(&mut self, key: &str) -> Option<RegistryEntry> {
        let entry = self.index.remove(key)?;
        self.order.retain(|k| k != key);
        Some(entry)
    }

    fn get(&self, key: &str) -> Option<RegistryEntry> {
        self.index.get(key).copied()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, RegistryEntry)> + '_ {
        self.order
            .iter()
            .filter_map(|key| Some((key.as_str(), *self.index.get(key)?)))
    }

    fn drain(&mut self) -> Vec<(String, RegistryEntry)> {
        let mut index = std::mem::take(&mut self.index);
        std::mem::take(&mut self.order)
            .into_iter()
            .filter_map(|key| {
                let entry = index.remove(&key)?;
                Some((key, entry))
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Index of every body in the scene, keyed by kind and then by id (dynamic bodies)
/// or name (the sun and the planets). Insertion order is kept.
#[derive(Debug, Default, Resource)]
pub struct EntityRegistry {
    sun: Collection,
    planets: Collection,
    host_stars: Collection,
    exoplanets: Collection,
}

impl EntityRegistry {
    fn collection(&self, kind: BodyKind) -> &Collection {
        match kind {
            BodyKind::Sun => &self.sun,
            BodyKind::Planet => &self.planets,
            BodyKind::HostStar => &self.host_stars,
            BodyKind::Exoplanet => &self.exoplanets,
        }
    }

    fn collection_mut(&mut self, kind: BodyKind) -> &mut Collection {
        match kind {
            BodyKind::Sun => &mut self.sun,
            BodyKind::Planet => &mut self.planets,
            BodyKind::HostStar => &mut self.host_stars,
            BodyKind::Exoplanet => &mut self.exoplanets,
        }
    }

    pub fn find(&self, kind: BodyKind, key: &str) -> Option<RegistryEntry> {
        self.collection(kind).get(key)
    }

    pub fn all(&self, kind: BodyKind) -> impl Iterator<Item = (&str, RegistryEntry)> + '_ {
        self.collection(kind).iter()
    }

    pub fn len(&self, kind: BodyKind) -> usize {
        self.collection(kind).len()
    }

    pub fn is_empty(&self, kind: BodyKind) -> bool {
        self.len(kind) == 0
    }

    pub fn host_star_position(&self, id: &str) -> Option<Vec3> {
        self.host_stars.get(id).map(|entry| entry.spawn_position)
    }

    pub(crate) fn insert(
        &mut self,
        kind: BodyKind,
        key: impl Into<String>,
        entry: RegistryEntry,
    ) -> Option<RegistryEntry> {
        self.collection_mut(kind).insert(key.into(), entry)
    }

    /// Registers the sun or a planet. Fixed bodies are only registered during scene setup.
    pub(crate) fn register_fixed(
        &mut self,
        kind: BodyKind,
        name: impl Into<String>,
        entry: RegistryEntry,
    ) {
        debug_assert!(!kind.is_dynamic());
        self.insert(kind, name, entry);
    }

    fn remove(&mut self, kind: BodyKind, key: &str) -> Option<RegistryEntry> {
        if !kind.is_dynamic() {
            return None;
        }
        self.collection_mut(kind).remove(key)
    }

    fn drain(&mut self, kind: BodyKind) -> Vec<(String, RegistryEntry)> {
        if !kind.is_dynamic() {
            return Vec::new();
        }
        self.collection_mut(kind).drain()
    }
}

/// Mutating access to the registry. Adding spawns the body with all of its
/// auxiliary entities, removing despawns them recursively.
#[derive(SystemParam)]
pub struct Registry<'w, 's> {
    commands: Commands<'w, 's>,
    index: ResMut<'w, EntityRegistry>,
    assets: Res<'w, BodyAssets>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    rng: ResMut<'w, CelestialRng>,
}

impl Registry<'_, '_> {
    pub fn index(&self) -> &EntityRegistry {
        &self.index
    }

    pub fn find(&self, kind: BodyKind, key: &str) -> Option<RegistryEntry> {
        self.index.find(kind, key)
    }

    pub fn add_host_star(&mut self, record: HostStarRecord) -> Entity {
        let entity = spawn_host_star(
            &mut self.commands,
            self.assets.sphere.clone(),
            &mut self.materials,
            &record,
        );
        let entry = RegistryEntry {
            entity,
            radius: record.visual_radius(),
            spawn_position: record.position(),
        };
        self.replace(BodyKind::HostStar, record.id.clone(), entry);
        info!("Added host star {} ({})", record.name, record.id);
        entity
    }

    /// Adds an exoplanet, orbiting its host if the host is registered right now.
    /// Otherwise it sits at its stored coordinates for good.
    pub fn add_exoplanet(&mut self, record: ExoplanetRecord) -> Entity {
        let host = record
            .host_star_id
            .as_deref()
            .and_then(|id| Some((id, self.index.host_star_position(id)?)));
        let (translation, orbit) = match host {
            Some((host_id, host_position)) => {
                let orbit = HostedOrbit::random(host_id, &mut **self.rng);
                (orbit.position(host_position), Some(orbit))
            }
            None => {
                if let Some(host_id) = &record.host_star_id {
                    debug!(
                        "Host star {host_id} of {} is not loaded, using stored coordinates",
                        record.name
                    );
                }
                (record.position(), None)
            }
        };

        let entity = spawn_exoplanet(
            &mut self.commands,
            self.assets.sphere.clone(),
            &mut self.materials,
            &record,
            translation,
            orbit,
        );
        let entry = RegistryEntry {
            entity,
            radius: record.visual_radius(),
            spawn_position: translation,
        };
        self.replace(BodyKind::Exoplanet, record.id.clone(), entry);
        info!("Added exoplanet {} ({})", record.name, record.id);
        entity
    }

    /// Returns `false` for unknown ids and for fixed bodies, without touching anything.
    pub fn remove(&mut self, kind: BodyKind, id: &str) -> bool {
        let Some(entry) = self.index.remove(kind, id) else {
            debug!("Nothing to remove for {} {id}", kind.label());
            return false;
        };
        self.commands.entity(entry.entity).despawn_recursive();
        info!("Removed {} {id}", kind.label());
        true
    }

    pub fn clear(&mut self, kind: BodyKind) -> usize {
        let drained = self.index.drain(kind);
        for (_, entry) in &drained {
            self.commands.entity(entry.entity).despawn_recursive();
        }
        if !drained.is_empty() {
            info!("Cleared {} {} entities", drained.len(), kind.label());
        }
        drained.len()
    }

    fn replace(&mut self, kind: BodyKind, id: String, entry: RegistryEntry) {
        if let Some(previous) = self.index.insert(kind, id.as_str(), entry) {
            debug!("Replacing {} {id}", kind.label());
            self.commands.entity(previous.entity).despawn_recursive();
        }
    }
}
