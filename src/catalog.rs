//! Bulk loader for catalog files exported from the exoplanet archive. In the app the
//! catalog is an asset; the `check` command reads it straight from disk.

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoadFailedEvent, AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::utils::ConditionalSendFuture;
use celestial::record::{ExoplanetRecord, HostStarRecord};
use scene_sync::SceneHandle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Asset, TypePath)]
pub(crate) struct Catalog {
    #[serde(default)]
    pub(crate) host_stars: Vec<HostStarRecord>,
    #[serde(default)]
    pub(crate) exoplanets: Vec<ExoplanetRecord>,
}

impl Catalog {
    pub(crate) fn from_json(input: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(input)?)
    }

    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// Exoplanets whose host star is not part of this catalog.
    pub(crate) fn orphans(&self) -> impl Iterator<Item = &ExoplanetRecord> {
        self.exoplanets.iter().filter(|planet| {
            planet
                .host_star_id
                .as_deref()
                .is_some_and(|id| !self.host_stars.iter().any(|star| star.id == id))
        })
    }

    /// Host stars go first so that their exoplanets resolve onto them.
    pub(crate) fn push(&self, handle: &SceneHandle) {
        for star in &self.host_stars {
            handle.add_host_star(star.clone());
        }
        for planet in &self.exoplanets {
            handle.add_exoplanet(planet.clone());
        }
    }
}

#[derive(Default)]
pub(crate) struct CatalogLoader;

impl AssetLoader for CatalogLoader {
    type Asset = Catalog;
    type Settings = ();
    type Error = CatalogError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }

    fn extensions(&self) -> &[&str] {
        &["catalog.json", "json"]
    }
}

/// Loads the catalog at `path` (relative to the asset folder, or absolute) and pushes
/// its records into the scene once loaded. Reloading the file pushes it again.
pub(crate) struct CatalogPlugin {
    pub(crate) path: PathBuf,
}

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<Catalog>()
            .init_asset_loader::<CatalogLoader>()
            .insert_resource(CatalogPath(self.path.clone()))
            .add_systems(Startup, load_catalog)
            .add_systems(Update, (push_loaded_catalog, report_failed_catalog));
    }
}

#[derive(Resource, Deref)]
struct CatalogPath(PathBuf);

/// Keeps the catalog loaded for as long as the app runs.
#[derive(Resource)]
#[allow(dead_code)]
struct CatalogHandle(Handle<Catalog>);

fn load_catalog(mut commands: Commands, path: Res<CatalogPath>, asset_server: Res<AssetServer>) {
    debug!("Loading catalog {}", path.display());
    commands.insert_resource(CatalogHandle(asset_server.load(path.to_path_buf())));
}

fn push_loaded_catalog(
    mut events: EventReader<AssetEvent<Catalog>>,
    catalogs: Res<Assets<Catalog>>,
    handle: Res<SceneHandle>,
) {
    for event in events.read() {
        let AssetEvent::LoadedWithDependencies { id } = event else {
            continue;
        };
        let Some(catalog) = catalogs.get(*id) else {
            continue;
        };
        info!(
            "Loaded {} host stars and {} exoplanets",
            catalog.host_stars.len(),
            catalog.exoplanets.len()
        );
        catalog.push(&handle);
    }
}

fn report_failed_catalog(mut failures: EventReader<AssetLoadFailedEvent<Catalog>>) {
    for failure in failures.read() {
        error!("Cannot load catalog {}: {}", failure.path, failure.error);
    }
}
