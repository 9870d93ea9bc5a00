use crate::app;
use crate::catalog::{Catalog, CatalogError};
use crate::error::AppError;
use bevy::log::Level;
use bevy::window::WindowResolution;
use celestial::scene::SolarSystem;
use clap::ArgAction;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(clap::Parser)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    command: CliCommand,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), AppError> {
        self.command.run()
    }
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Open the scene window
    Run {
        #[clap(short, long)]
        resolution: Option<Resolution>,
        #[clap(long, action = ArgAction::SetTrue)]
        inspector: bool,
        /// Solar system manifest, the built-in one when omitted
        #[clap(long)]
        scene: Option<PathBuf>,
        /// Host stars and exoplanets to load once the scene is up, a `.catalog.json` or `.json` file
        #[clap(long)]
        catalog: Option<PathBuf>,
        /// Seed for planet placement, exoplanet orbits and the backdrop
        #[clap(long)]
        seed: Option<u64>,
        #[clap(long, default_value = "info")]
        log_level: Level,
    },
    /// Validate a scene manifest and a catalog without opening a window
    Check {
        #[clap(long)]
        scene: Option<PathBuf>,
        #[clap(long)]
        catalog: Option<PathBuf>,
    },
}

/// Window size given as `<width>x<height>`, for example `1600x900`.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Resolution {
    width: f32,
    height: f32,
}

impl Resolution {
    fn window(self) -> WindowResolution {
        WindowResolution::new(self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = InvalidResolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidResolution(s.to_string());
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let side = |text: &str| {
            text.trim()
                .parse::<f32>()
                .ok()
                .filter(|size| size.is_finite() && *size >= 1.0)
                .ok_or_else(invalid)
        };
        Ok(Self {
            width: side(width)?,
            height: side(height)?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Cannot use {0:?} as a window size, expected <width>x<height> in pixels")]
struct InvalidResolution(String);

impl CliCommand {
    fn run(self) -> Result<(), AppError> {
        match self {
            Self::Run {
                resolution,
                inspector,
                scene,
                catalog,
                seed,
                log_level,
            } => {
                let app = app::get_app(app::AppSettings {
                    resolution: resolution
                        .map(Resolution::window)
                        .unwrap_or_default(),
                    with_inspector: inspector,
                    scene: load_scene(scene.as_deref())?,
                    catalog: catalog
                        .map(std::path::absolute)
                        .transpose()
                        .map_err(CatalogError::from)?,
                    seed,
                    log_level,
                });
                app::run(app)
            }
            Self::Check { scene, catalog } => {
                let scene = load_scene(scene.as_deref())?;
                println!(
                    "Scene: {} with {} planets, camera at {:?}",
                    scene.sun.name,
                    scene.planets.len(),
                    scene.camera.position
                );
                if let Some(path) = catalog {
                    let catalog = Catalog::load(&path)?;
                    println!(
                        "Catalog: {} host stars, {} exoplanets, {} without a host in the catalog",
                        catalog.host_stars.len(),
                        catalog.exoplanets.len(),
                        catalog.orphans().count()
                    );
                }
                Ok(())
            }
        }
    }
}

fn load_scene(path: Option<&Path>) -> Result<SolarSystem, AppError> {
    Ok(match path {
        Some(path) => SolarSystem::load(path)?,
        None => SolarSystem::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_resolution() {
        let resolution: Resolution = "1280x720".parse().unwrap();
        assert_eq!(resolution.width, 1280.0);
        assert_eq!(resolution.height, 720.0);
        assert_eq!(
            " 800 X 600 ".parse::<Resolution>().unwrap(),
            Resolution {
                width: 800.0,
                height: 600.0
            }
        );
        assert!("1280".parse::<Resolution>().is_err());
        assert!("wide x tall".parse::<Resolution>().is_err());
        assert!("0x720".parse::<Resolution>().is_err());
        assert!("-1280x720".parse::<Resolution>().is_err());
        assert!("infx720".parse::<Resolution>().is_err());

        let error = "1280x".parse::<Resolution>().unwrap_err();
        assert!(error.to_string().contains("\"1280x\""));
    }

    #[test]
    fn run_arguments() {
        let cli = Cli::try_parse_from([
            "exoplanet-explorer",
            "run",
            "--seed",
            "42",
            "--catalog",
            "catalog.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let CliCommand::Run {
            seed,
            catalog,
            log_level,
            inspector,
            ..
        } = cli.command
        else {
            panic!("expected the run command");
        };
        assert_eq!(seed, Some(42));
        assert_eq!(catalog, Some(PathBuf::from("catalog.json")));
        assert_eq!(log_level, Level::DEBUG);
        assert!(!inspector);
    }

    #[test]
    fn missing_scene_file_is_an_error() {
        let result = load_scene(Some(Path::new("does/not/exist.yaml")));
        assert!(matches!(result, Err(AppError::Scene(_))));
    }
}
