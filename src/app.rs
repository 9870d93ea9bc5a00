use crate::catalog::CatalogPlugin;
use crate::error::AppError;
use crate::inspector::InspectorPlugin;
use bevy::core_pipeline::bloom::Bloom;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use celestial::scene::SolarSystem;
use celestial::{CelestialPlugin, CelestialSet};
use orbit_camera::components::{OrbitCamera, OrbitCameraState};
use orbit_camera::{OrbitCameraPlugin, OrbitCameraSet};
use picking::{PickingPlugin, PickingSet};
use scene_sync::SceneSyncPlugin;
use std::path::PathBuf;

/// Exit code reserved for a missing render surface.
pub(crate) const NO_RENDER_SURFACE_EXIT: u8 = 3;

pub(crate) struct AppSettings {
    pub(crate) resolution: WindowResolution,
    pub(crate) with_inspector: bool,
    pub(crate) scene: SolarSystem,
    pub(crate) catalog: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) log_level: Level,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            resolution: WindowResolution::default(),
            with_inspector: false,
            scene: SolarSystem::default(),
            catalog: None,
            seed: None,
            log_level: Level::INFO,
        }
    }
}

pub(crate) fn get_app(settings: AppSettings) -> App {
    let mut app = App::new();
    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Exoplanet Explorer".to_string(),
                    resolution: settings.resolution,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                level: settings.log_level,
                ..default()
            }),
        CelestialPlugin {
            scene: settings.scene,
            draw_orbits: true,
            seed: settings.seed,
        },
        OrbitCameraPlugin,
        PickingPlugin,
        SceneSyncPlugin,
    ))
    .configure_sets(
        Update,
        (PickingSet, CelestialSet::Animate, OrbitCameraSet).chain(),
    )
    .insert_resource(ClearColor(Color::BLACK))
    .add_systems(Startup, (ensure_render_surface, spawn_camera))
    .add_observer(debug_show_named_entities);

    if let Some(path) = settings.catalog {
        app.add_plugins(CatalogPlugin { path });
    }
    if settings.with_inspector {
        app.add_plugins(InspectorPlugin);
    }
    app
}

/// Runs the app to completion and turns its exit status into a result.
pub(crate) fn run(mut app: App) -> Result<(), AppError> {
    exit_result(app.run())
}

fn exit_result(exit: AppExit) -> Result<(), AppError> {
    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) if code.get() == NO_RENDER_SURFACE_EXIT => {
            Err(AppError::NoRenderSurface)
        }
        AppExit::Error(code) => Err(AppError::Exit(code.get())),
    }
}

fn ensure_render_surface(
    q_window: Query<(), With<PrimaryWindow>>,
    mut exit: EventWriter<AppExit>,
) {
    if q_window.is_empty() {
        error!("No primary window, nothing can be rendered");
        exit.send(AppExit::from_code(NO_RENDER_SURFACE_EXIT));
    }
}

fn spawn_camera(mut commands: Commands, scene: Res<SolarSystem>) {
    let transform = scene.camera.transform();
    let settings = OrbitCamera::default();
    let state = OrbitCameraState::new(&transform, &settings);
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 5000.0,
            ..default()
        }),
        Bloom {
            intensity: 0.05,
            ..default()
        },
        transform,
        settings,
        state,
    ));
}

fn debug_show_named_entities(trigger: Trigger<OnAdd, Name>, q: Query<&Name>) {
    let Ok(name) = q.get(trigger.entity()) else {
        return;
    };
    debug!("{entity}: {name}", entity = trigger.entity());
}
