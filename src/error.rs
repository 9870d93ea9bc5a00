use crate::catalog::CatalogError;
use celestial::scene::SceneLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("No render surface available, cannot draw the scene")]
    NoRenderSurface,
    #[error("App exited with code {0}")]
    Exit(u8),
    #[error("Cannot load scene: {0}")]
    Scene(#[from] SceneLoadError),
    #[error("Cannot load catalog: {0}")]
    Catalog(#[from] CatalogError),
}
