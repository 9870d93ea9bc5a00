use bevy::prelude::*;

pub mod gesture;
pub mod ray;
pub mod selection;
mod systems;

/// Distance a picked host star is framed from.
pub const HOST_STAR_FOCUS_DISTANCE: f32 = 30.0;

/// Pointer tracking and click resolution. Runs before bodies move, so clicks hit
/// what was drawn last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct PickingSet;

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Pointer>()
            .init_resource::<gesture::PointerGesture>()
            .init_resource::<selection::SelectionHandler>()
            .init_resource::<orbit_camera::events::PointerBlocked>()
            .add_event::<PointerClick>()
            .add_event::<selection::Selection>()
            .add_systems(
                Update,
                (
                    systems::track_pointer,
                    systems::track_gesture,
                    systems::resolve_clicks,
                )
                    .chain()
                    .in_set(PickingSet),
            );
    }
}

/// Last known cursor position and viewport size, in logical pixels.
#[derive(Debug, Default, Resource)]
pub struct Pointer {
    pub position: Option<Vec2>,
    pub viewport: Vec2,
}

/// A press-release of the primary button that did not turn into a drag.
#[derive(Debug, Clone, Copy, Event)]
pub struct PointerClick {
    pub position: Vec2,
}
