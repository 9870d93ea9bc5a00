use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use orbit_camera::events::PointerBlocked;
use picking::PickingSet;

/// World inspector window. The scene ignores the pointer while egui wants it.
pub(crate) struct InspectorPlugin;

impl Plugin for InspectorPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        app.add_plugins(WorldInspectorPlugin::new())
            .add_systems(Update, block_pointer_over_egui.before(PickingSet));
    }
}

fn block_pointer_over_egui(
    mut egui: EguiContexts,
    q_window_entities: Query<Entity, With<Window>>,
    mut blocked: ResMut<PointerBlocked>,
) {
    let mut wants_pointer = false;
    for window_entity in &q_window_entities {
        if let Some(ctx) = egui.try_ctx_for_entity_mut(window_entity) {
            wants_pointer |= ctx.wants_pointer_input();
        }
    }
    if **blocked != wants_pointer {
        **blocked = wants_pointer;
    }
}
