use bevy::prelude::*;

/// Request for the camera controller. Triggered on the world; the controller's
/// observer applies it right away to every orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Event)]
pub enum CameraCommand {
    /// Glide to frame `point` from `distance` away.
    Focus { point: Vec3, distance: f32 },
    /// Track `target`, sized by its visual `radius`.
    Follow { target: Entity, radius: f32 },
    /// Drop any follow or transition and orbit the origin again.
    Release,
}

/// Set while something drawn over the scene owns the pointer.
#[derive(Debug, Default, Resource, Deref, DerefMut)]
pub struct PointerBlocked(pub bool);
