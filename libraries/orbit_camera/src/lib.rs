use bevy::prelude::*;

pub mod components;
mod controller;
pub mod events;
mod systems;

/// Framing distance used when a focus request does not give a usable one.
pub const DEFAULT_FOCUS_DISTANCE: f32 = 20.0;

/// Input handling, then one step of the camera state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct OrbitCameraSet;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::OrbitCamera>()
            .register_type::<components::OrbitCameraState>()
            .init_resource::<events::PointerBlocked>()
            .add_systems(
                Update,
                (systems::orbit_camera_input, systems::update_camera)
                    .chain()
                    .in_set(OrbitCameraSet)
                    .run_if(any_with_component::<components::OrbitCameraState>),
            )
            .add_observer(systems::apply_camera_command);
    }
}

#[cfg(test)]
mod tests {
    use super::components::{CameraMode, OrbitCamera, OrbitCameraState};
    use super::events::{CameraCommand, PointerBlocked};
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
    use bevy::input::InputPlugin;

    fn test_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin, OrbitCameraPlugin));
        let settings = OrbitCamera::default();
        let transform = Transform::from_xyz(0.0, 30.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y);
        let state = OrbitCameraState::new(&transform, &settings);
        let camera = app.world_mut().spawn((settings, state, transform)).id();
        (app, camera)
    }

    fn scroll(app: &mut App, lines: f32) {
        app.world_mut().send_event(MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: lines,
            window: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn scrolling_toward_the_user_zooms_out_to_the_limit() {
        let (mut app, camera) = test_app();
        scroll(&mut app, -50.0);
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_abs_diff_eq!(transform.translation.length(), 300.0, epsilon = 1e-3);
    }

    #[test]
    fn blocked_pointer_ignores_the_wheel() {
        let (mut app, camera) = test_app();
        app.insert_resource(PointerBlocked(true));
        scroll(&mut app, 10.0);
        app.update();

        let state = app.world().get::<OrbitCameraState>(camera).unwrap();
        assert_abs_diff_eq!(state.angles.radius, Vec3::new(0.0, 30.0, 50.0).length());
    }

    #[test]
    fn following_a_despawned_entity_falls_back_to_free_orbit() {
        let (mut app, camera) = test_app();
        let body = app.world_mut().spawn(Transform::from_xyz(16.0, 0.0, 0.0)).id();
        app.world_mut().trigger(CameraCommand::Follow {
            target: body,
            radius: 1.0,
        });
        app.update();
        assert!(matches!(
            app.world().get::<OrbitCameraState>(camera).unwrap().mode,
            CameraMode::Following(_)
        ));

        app.world_mut().despawn(body);
        app.update();
        let state = app.world().get::<OrbitCameraState>(camera).unwrap();
        assert_eq!(state.mode, CameraMode::FreeOrbit);
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.is_finite());
    }

    #[test]
    fn focus_command_reaches_the_camera() {
        let (mut app, camera) = test_app();
        let point = Vec3::new(10.0, 0.0, 0.0);
        app.world_mut().trigger(CameraCommand::Focus {
            point,
            distance: 30.0,
        });
        for _ in 0..200 {
            app.update();
        }

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.distance(Vec3::new(10.0, 9.0, 30.0)) < 0.5);
        let state = app.world().get::<OrbitCameraState>(camera).unwrap();
        assert_eq!(state.mode, CameraMode::FreeOrbit);
    }
}
