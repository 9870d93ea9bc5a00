//! Entry point for code outside the render loop. Requests go through a channel and
//! are applied at the start of the next frame, before anything reads the registry.

use bevy::prelude::*;
use celestial::body::BodyKind;
use celestial::record::{ExoplanetRecord, HostStarRecord};
use celestial::registry::{Registry, RegistryEntry};
use crossbeam_channel::{Receiver, Sender};
use orbit_camera::events::CameraCommand;

pub use orbit_camera::DEFAULT_FOCUS_DISTANCE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct SceneSyncSet;

pub struct SceneSyncPlugin;

impl Plugin for SceneSyncPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        app.insert_resource(SceneHandle { sender })
            .insert_resource(SceneInbox(receiver))
            .add_event::<SceneRequest>()
            .add_systems(
                PreUpdate,
                (forward_requests, apply_requests)
                    .chain()
                    .in_set(SceneSyncSet),
            );
    }
}

#[derive(Debug, Clone, PartialEq, Event)]
pub enum SceneRequest {
    AddHostStar(HostStarRecord),
    RemoveHostStar(String),
    ClearHostStars,
    AddExoplanet(ExoplanetRecord),
    RemoveExoplanet(String),
    ClearExoplanets,
    FocusOnPosition { point: Vec3, distance: f32 },
    /// Exoplanets are searched first, then host stars.
    FollowEntityById(String),
    /// Planet names and the sun's name.
    FollowFixedBodyByName(String),
}

/// Cloneable handle any thread can use to change the scene. Requests take effect on
/// the next frame; sending after the scene is gone does nothing.
#[derive(Debug, Clone, Resource)]
pub struct SceneHandle {
    sender: Sender<SceneRequest>,
}

impl SceneHandle {
    pub fn send(&self, request: SceneRequest) {
        if let Err(err) = self.sender.send(request) {
            debug!("Scene is gone, dropping {:?}", err.into_inner());
        }
    }

    pub fn add_host_star(&self, record: HostStarRecord) {
        self.send(SceneRequest::AddHostStar(record));
    }

    pub fn remove_host_star(&self, id: impl Into<String>) {
        self.send(SceneRequest::RemoveHostStar(id.into()));
    }

    pub fn clear_host_stars(&self) {
        self.send(SceneRequest::ClearHostStars);
    }

    pub fn add_exoplanet(&self, record: ExoplanetRecord) {
        self.send(SceneRequest::AddExoplanet(record));
    }

    pub fn remove_exoplanet(&self, id: impl Into<String>) {
        self.send(SceneRequest::RemoveExoplanet(id.into()));
    }

    pub fn clear_exoplanets(&self) {
        self.send(SceneRequest::ClearExoplanets);
    }

    pub fn focus_on_position(&self, point: Vec3, distance: Option<f32>) {
        self.send(SceneRequest::FocusOnPosition {
            point,
            distance: distance.unwrap_or(DEFAULT_FOCUS_DISTANCE),
        });
    }

    pub fn follow_entity_by_id(&self, id: impl Into<String>) {
        self.send(SceneRequest::FollowEntityById(id.into()));
    }

    pub fn follow_fixed_body_by_name(&self, name: impl Into<String>) {
        self.send(SceneRequest::FollowFixedBodyByName(name.into()));
    }
}

#[derive(Resource, Deref)]
struct SceneInbox(Receiver<SceneRequest>);

fn forward_requests(inbox: Res<SceneInbox>, mut requests: EventWriter<SceneRequest>) {
    requests.send_batch(inbox.try_iter());
}

fn apply_requests(
    mut commands: Commands,
    mut requests: EventReader<SceneRequest>,
    mut registry: Registry,
) {
    for request in requests.read() {
        match request {
            SceneRequest::AddHostStar(record) => {
                registry.add_host_star(record.clone());
            }
            SceneRequest::RemoveHostStar(id) => {
                registry.remove(BodyKind::HostStar, id);
            }
            SceneRequest::ClearHostStars => {
                registry.clear(BodyKind::HostStar);
            }
            SceneRequest::AddExoplanet(record) => {
                registry.add_exoplanet(record.clone());
            }
            SceneRequest::RemoveExoplanet(id) => {
                registry.remove(BodyKind::Exoplanet, id);
            }
            SceneRequest::ClearExoplanets => {
                registry.clear(BodyKind::Exoplanet);
            }
            SceneRequest::FocusOnPosition { point, distance } => {
                commands.trigger(CameraCommand::Focus {
                    point: *point,
                    distance: *distance,
                });
            }
            SceneRequest::FollowEntityById(id) => {
                let entry = registry
                    .find(BodyKind::Exoplanet, id)
                    .or_else(|| registry.find(BodyKind::HostStar, id));
                follow(&mut commands, entry, id);
            }
            SceneRequest::FollowFixedBodyByName(name) => {
                let entry = registry
                    .find(BodyKind::Planet, name)
                    .or_else(|| registry.find(BodyKind::Sun, name));
                follow(&mut commands, entry, name);
            }
        }
    }
}

fn follow(commands: &mut Commands, entry: Option<RegistryEntry>, key: &str) {
    let Some(entry) = entry else {
        debug!("Nothing to follow for {key}");
        return;
    };
    commands.trigger(CameraCommand::Follow {
        target: entry.entity,
        radius: entry.radius,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy::input::InputPlugin;
    use celestial::body::BodyPlugin;
    use celestial::registry::{EntityRegistry, RegistryPlugin};
    use celestial::scene::{ScenePlugin, SolarSystem};
    use orbit_camera::components::{CameraMode, OrbitCamera, OrbitCameraState};
    use orbit_camera::OrbitCameraPlugin;

    fn test_app() -> (App, SceneHandle, Entity) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins((
                BodyPlugin,
                RegistryPlugin { seed: Some(11) },
                ScenePlugin {
                    scene: SolarSystem::default(),
                },
                OrbitCameraPlugin,
                SceneSyncPlugin,
            ));
        let settings = OrbitCamera::default();
        let transform = Transform::from_xyz(0.0, 30.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y);
        let state = OrbitCameraState::new(&transform, &settings);
        let camera = app.world_mut().spawn((settings, state, transform)).id();
        let handle = app.world().resource::<SceneHandle>().clone();
        app.update();
        (app, handle, camera)
    }

    fn registry(app: &App) -> &EntityRegistry {
        app.world().resource::<EntityRegistry>()
    }

    fn camera_mode(app: &App, camera: Entity) -> CameraMode {
        app.world().get::<OrbitCameraState>(camera).unwrap().mode
    }

    #[test]
    fn requests_from_another_thread_apply_on_the_next_frame() {
        let (mut app, handle, _) = test_app();
        std::thread::spawn(move || {
            handle.add_host_star(HostStarRecord::new("hs-1", "Host", Vec3::new(10.0, 0.0, 0.0)));
            handle.add_exoplanet(
                ExoplanetRecord::new("ex-1", "Host b", Vec3::ZERO).with_host("hs-1"),
            );
        })
        .join()
        .unwrap();
        assert_eq!(registry(&app).len(BodyKind::HostStar), 0);

        app.update();

        assert_eq!(registry(&app).len(BodyKind::HostStar), 1);
        let planet = registry(&app).find(BodyKind::Exoplanet, "ex-1").unwrap();
        let position = app.world().get::<Transform>(planet.entity).unwrap().translation;
        let distance = position.distance(Vec3::new(10.0, 0.0, 0.0));
        assert!((3.0..=8.0).contains(&distance), "distance {distance}");
    }

    #[test]
    fn removing_unknown_ids_changes_nothing() {
        let (mut app, handle, _) = test_app();
        handle.add_exoplanet(ExoplanetRecord::new("ex-1", "b", Vec3::ZERO));
        app.update();

        handle.remove_exoplanet("ex-2");
        handle.remove_host_star("ex-1");
        app.update();

        assert_eq!(registry(&app).len(BodyKind::Exoplanet), 1);
        assert_eq!(registry(&app).len(BodyKind::HostStar), 0);
    }

    #[test]
    fn following_then_removing_an_exoplanet_returns_to_free_orbit() {
        let (mut app, handle, camera) = test_app();
        handle.add_exoplanet(ExoplanetRecord::new("ex-1", "b", Vec3::new(30.0, 0.0, 0.0)));
        handle.follow_entity_by_id("ex-1");
        app.update();
        let entity = registry(&app).find(BodyKind::Exoplanet, "ex-1").unwrap().entity;
        assert_eq!(app.world().get::<OrbitCameraState>(camera).unwrap().followed(), Some(entity));

        handle.remove_exoplanet("ex-1");
        app.update();

        assert_eq!(camera_mode(&app, camera), CameraMode::FreeOrbit);
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.is_finite());
    }

    #[test]
    fn follow_falls_back_to_host_stars_and_ignores_unknown_ids() {
        let (mut app, handle, camera) = test_app();
        handle.follow_entity_by_id("missing");
        app.update();
        assert_eq!(camera_mode(&app, camera), CameraMode::FreeOrbit);

        handle.add_host_star(HostStarRecord::new("hs-1", "Host", Vec3::new(0.0, 0.0, -80.0)));
        handle.follow_entity_by_id("hs-1");
        app.update();
        let star = registry(&app).find(BodyKind::HostStar, "hs-1").unwrap().entity;
        assert_eq!(app.world().get::<OrbitCameraState>(camera).unwrap().followed(), Some(star));
    }

    #[test]
    fn follow_fixed_body_by_name() {
        let (mut app, handle, camera) = test_app();
        handle.follow_fixed_body_by_name("pluto");
        app.update();
        assert_eq!(camera_mode(&app, camera), CameraMode::FreeOrbit);

        handle.follow_fixed_body_by_name("saturn");
        app.update();
        let CameraMode::Following(follow) = camera_mode(&app, camera) else {
            panic!("expected the camera to follow saturn");
        };
        let saturn = registry(&app).find(BodyKind::Planet, "saturn").unwrap();
        assert_eq!(follow.target, saturn.entity);
        assert_abs_diff_eq!(follow.offset.y, 2.0 * 2.2, epsilon = 1e-5);

        handle.follow_fixed_body_by_name("sun");
        app.update();
        let sun = registry(&app).find(BodyKind::Sun, "sun").unwrap();
        assert_eq!(app.world().get::<OrbitCameraState>(camera).unwrap().followed(), Some(sun.entity));
    }

    #[test]
    fn focus_defaults_to_twenty_units() {
        let (mut app, handle, camera) = test_app();
        let point = Vec3::new(5.0, 0.0, -5.0);
        handle.focus_on_position(point, None);
        app.update();

        let CameraMode::Transitioning(transition) = camera_mode(&app, camera) else {
            panic!("expected a transition");
        };
        assert_eq!(transition.target_look_at, point);
        assert_eq!(transition.target_position, point + Vec3::new(0.0, 6.0, 20.0));
    }

    #[test]
    fn unusable_focus_distance_falls_back_to_the_default() {
        let (mut app, handle, camera) = test_app();
        let point = Vec3::new(5.0, 0.0, -5.0);
        handle.focus_on_position(point, Some(f32::NAN));
        app.update();

        let CameraMode::Transitioning(transition) = camera_mode(&app, camera) else {
            panic!("expected a transition");
        };
        assert_eq!(transition.target_position, point + Vec3::new(0.0, 6.0, 20.0));

        handle.focus_on_position(Vec3::splat(f32::INFINITY), None);
        for _ in 0..5 {
            app.update();
        }
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.is_finite());
    }

    #[test]
    fn handle_outliving_the_scene_is_harmless() {
        let (app, handle, _) = test_app();
        drop(app);
        handle.clear_exoplanets();
        handle.focus_on_position(Vec3::ZERO, Some(5.0));
    }
}
