use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

/// Normalized device coordinates of a cursor position given in logical pixels,
/// origin at the top-left corner of the viewport.
pub fn ndc(cursor: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        -(cursor.y / viewport.y * 2.0 - 1.0),
    )
}

/// Ray from a perspective camera through the cursor. `fov` is the vertical field of view.
pub fn pointer_ray(
    camera: &GlobalTransform,
    fov: f32,
    viewport: Vec2,
    cursor: Vec2,
) -> Option<Ray3d> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let ndc = ndc(cursor, viewport);
    let half_height = (fov / 2.0).tan();
    let half_width = half_height * viewport.x / viewport.y;
    let local = Vec3::new(ndc.x * half_width, ndc.y * half_height, -1.0);
    let (_, rotation, origin) = camera.to_scale_rotation_translation();
    let direction = Dir3::new(rotation * local).ok()?;
    Some(Ray3d { origin, direction })
}

/// Closest sphere hit along `ray` among `(entity, center, radius)` candidates.
pub fn nearest_hit(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, Vec3, f32)>,
) -> Option<(Entity, f32)> {
    let cast = RayCast3d::from_ray(ray, f32::MAX);
    candidates
        .into_iter()
        .filter_map(|(entity, center, radius)| {
            let distance = cast.sphere_intersection_at(&BoundingSphere::new(center, radius))?;
            Some((entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
