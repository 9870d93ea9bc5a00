use crate::gesture::PointerGesture;
use crate::ray::{nearest_hit, pointer_ray};
use crate::selection::{Selection, SelectionHandler, SelectionKind, SelectionPayload};
use crate::{Pointer, PointerClick, HOST_STAR_FOCUS_DISTANCE};
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use celestial::body::{BodyKind, BodyRadius};
use celestial::record::{ExoplanetRecord, HostStarRecord};
use orbit_camera::events::{CameraCommand, PointerBlocked};

pub(crate) fn track_pointer(
    mut pointer: ResMut<Pointer>,
    q_window: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = q_window.get_single() else {
        return;
    };
    pointer.position = window.cursor_position();
    pointer.viewport = window.size();
}

pub(crate) fn track_gesture(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    blocked: Res<PointerBlocked>,
    pointer: Res<Pointer>,
    mut evr_motion: EventReader<MouseMotion>,
    mut gesture: ResMut<PointerGesture>,
    mut clicks: EventWriter<PointerClick>,
) {
    if mouse_buttons.just_pressed(MouseButton::Left) {
        gesture.press();
    }
    gesture.moved(evr_motion.read().map(|ev| ev.delta.length()).sum());
    if mouse_buttons.just_released(MouseButton::Left) {
        let is_click = gesture.release();
        if !is_click || **blocked {
            return;
        }
        if let Some(position) = pointer.position {
            clicks.send(PointerClick { position });
        }
    }
}

#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub(crate) fn resolve_clicks(
    mut commands: Commands,
    mut clicks: EventReader<PointerClick>,
    pointer: Res<Pointer>,
    q_camera: Query<(&GlobalTransform, &Projection), With<Camera3d>>,
    q_bodies: Query<(Entity, &BodyKind, &BodyRadius, &GlobalTransform)>,
    q_details: Query<(&Name, Option<&HostStarRecord>, Option<&ExoplanetRecord>)>,
    mut handler: ResMut<SelectionHandler>,
    mut selections: EventWriter<Selection>,
) {
    let Ok((camera, projection)) = q_camera.get_single() else {
        clicks.clear();
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        clicks.clear();
        return;
    };

    for click in clicks.read() {
        let Some(ray) = pointer_ray(camera, perspective.fov, pointer.viewport, click.position)
        else {
            continue;
        };
        let candidates = q_bodies
            .iter()
            .map(|(entity, _, radius, transform)| (entity, transform.translation(), **radius));
        let hit = nearest_hit(ray, candidates)
            .and_then(|(entity, _)| q_bodies.get(entity).ok());

        let selection = match hit {
            Some((entity, kind, radius, transform)) => {
                let position = transform.translation();
                if *kind == BodyKind::HostStar {
                    // Picking a star ends the follow instead of resuming it after the glide
                    commands.trigger(CameraCommand::Release);
                }
                commands.trigger(camera_reaction(entity, *kind, **radius, position));
                describe(entity, *kind, &q_details)
            }
            None => {
                commands.trigger(CameraCommand::Release);
                Selection::none()
            }
        };

        info!("Selected {} {:?}", selection.kind, selection.name);
        handler.dispatch(&selection);
        selections.send(selection);
    }
}

fn camera_reaction(entity: Entity, kind: BodyKind, radius: f32, position: Vec3) -> CameraCommand {
    match kind {
        BodyKind::Sun => CameraCommand::Release,
        BodyKind::HostStar => CameraCommand::Focus {
            point: position,
            distance: HOST_STAR_FOCUS_DISTANCE,
        },
        BodyKind::Planet | BodyKind::Exoplanet => CameraCommand::Follow {
            target: entity,
            radius,
        },
    }
}

fn describe(
    entity: Entity,
    kind: BodyKind,
    q_details: &Query<(&Name, Option<&HostStarRecord>, Option<&ExoplanetRecord>)>,
) -> Selection {
    let Ok((name, host_star, exoplanet)) = q_details.get(entity) else {
        return Selection {
            name: String::new(),
            kind: kind.into(),
            payload: None,
        };
    };
    let payload = match kind {
        BodyKind::HostStar => host_star.cloned().map(SelectionPayload::HostStar),
        BodyKind::Exoplanet => exoplanet.cloned().map(SelectionPayload::Exoplanet),
        BodyKind::Sun | BodyKind::Planet => None,
    };
    Selection {
        name: name.as_str().to_string(),
        kind: SelectionKind::from(kind),
        payload,
    }
}
