use crate::components::{OrbitCamera, OrbitCameraState};
use crate::events::{CameraCommand, PointerBlocked};
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

pub(crate) fn orbit_camera_input(
    blocked: Res<PointerBlocked>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut evr_motion: EventReader<MouseMotion>,
    mut evr_scroll: EventReader<MouseWheel>,
    mut q_camera: Query<(&OrbitCamera, &mut OrbitCameraState, &Transform)>,
) {
    if **blocked {
        evr_motion.clear();
        evr_scroll.clear();
        return;
    }

    let total_motion: Vec2 = evr_motion.read().map(|ev| ev.delta).sum();

    // Wheel events are positive away from the user, the controller zooms out on positive deltas
    let mut total_scroll_lines = 0.0;
    let mut total_scroll_pixels = 0.0;
    for ev in evr_scroll.read() {
        match ev.unit {
            MouseScrollUnit::Line => total_scroll_lines -= ev.y,
            MouseScrollUnit::Pixel => total_scroll_pixels -= ev.y,
        }
    }

    let dragging = mouse_buttons.pressed(MouseButton::Left) && total_motion != Vec2::ZERO;
    for (settings, mut state, transform) in &mut q_camera {
        if dragging {
            state.drag(settings, transform, total_motion);
        }
        let scroll = total_scroll_lines * settings.scroll_line_pixels + total_scroll_pixels;
        if scroll != 0.0 {
            state.zoom(settings, transform, scroll);
        }
    }
}

pub(crate) fn apply_camera_command(
    trigger: Trigger<CameraCommand>,
    mut q_camera: Query<(&OrbitCamera, &mut OrbitCameraState, &Transform)>,
) {
    for (settings, mut state, transform) in &mut q_camera {
        match *trigger.event() {
            CameraCommand::Focus { point, distance } => {
                state.focus(settings, transform, point, distance)
            }
            CameraCommand::Follow { target, radius } => state.follow(target, radius),
            CameraCommand::Release => state.release(settings, transform),
        }
    }
}

pub(crate) fn update_camera(
    mut q_camera: Query<(&OrbitCamera, &mut OrbitCameraState, &mut Transform)>,
    q_targets: Query<&Transform, Without<OrbitCamera>>,
) {
    for (settings, mut state, mut transform) in &mut q_camera {
        state.step(settings, &mut transform, |entity| {
            q_targets.get(entity).ok().map(|target| target.translation)
        });
    }
}
