use crate::CelestialSet;
use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use std::borrow::Cow;

pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BodyKind>()
            .register_type::<BodyRadius>()
            .register_type::<RotationSpeed>()
            .init_resource::<BodyAssets>()
            .add_systems(Update, spin_bodies.in_set(CelestialSet::Animate));
    }
}

/// Smallest radius a dynamic body is drawn (and picked) with.
pub const MIN_VISIBLE_RADIUS: f32 = 0.2;

/// Kind discriminant carried by every pickable body.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Component, Reflect)]
#[reflect(Component)]
pub enum BodyKind {
    Sun,
    Planet,
    HostStar,
    Exoplanet,
}

impl BodyKind {
    pub const ALL: [Self; 4] = [Self::Sun, Self::Planet, Self::HostStar, Self::Exoplanet];

    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::Sun => "star",
            BodyKind::Planet => "planet",
            BodyKind::HostStar => "host_star",
            BodyKind::Exoplanet => "exoplanet",
        }
    }

    /// Dynamic bodies come and go through the sync layer; fixed ones live for the whole scene.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, BodyKind::HostStar | BodyKind::Exoplanet)
    }
}

/// Visual radius in world units. Also the radius of the picking sphere.
#[derive(Debug, Copy, Clone, PartialEq, Component, Deref, Reflect)]
#[reflect(Component)]
pub struct BodyRadius(pub f32);

/// Visual spin around the local Y axis, in radians per frame.
#[derive(Debug, Clone, Copy, PartialEq, Component, Reflect)]
#[reflect(Component)]
pub struct RotationSpeed(pub f32);

/// Clamps an optional radius to something that can be seen and clicked.
pub fn visible_radius(radius: Option<f32>) -> f32 {
    radius
        .filter(|r| r.is_finite())
        .map_or(MIN_VISIBLE_RADIUS, |r| r.max(MIN_VISIBLE_RADIUS))
}

#[derive(Resource)]
pub struct BodyAssets {
    pub sphere: Handle<Mesh>,
}

impl FromWorld for BodyAssets {
    fn from_world(world: &mut World) -> Self {
        let sphere = world
            .resource_mut::<Assets<Mesh>>()
            .add(Sphere::new(1.0).mesh().uv(32, 18));
        Self { sphere }
    }
}

/// Spawns a unit sphere scaled to `radius`. Children inherit the scale, so
/// auxiliary shells are sized relative to the body.
#[allow(clippy::too_many_arguments)]
pub fn spawn<'a>(
    commands: &'a mut Commands,
    kind: BodyKind,
    name: impl Into<Cow<'static, str>>,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    translation: Vec3,
    radius: f32,
    rotation_speed: RotationSpeed,
) -> EntityCommands<'a> {
    commands.spawn((
        kind,
        Name::new(name),
        BodyRadius(radius),
        rotation_speed,
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(translation).with_scale(Vec3::splat(radius)),
    ))
}

pub fn spin_bodies(mut q: Query<(&mut Transform, &RotationSpeed)>) {
    for (mut transform, speed) in &mut q {
        transform.rotate_local_y(speed.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn missing_or_invalid_radius_clamps_to_minimum() {
        assert_eq!(visible_radius(None), MIN_VISIBLE_RADIUS);
        assert_eq!(visible_radius(Some(f32::NAN)), MIN_VISIBLE_RADIUS);
        assert_eq!(visible_radius(Some(-3.0)), MIN_VISIBLE_RADIUS);
        assert_eq!(visible_radius(Some(0.05)), MIN_VISIBLE_RADIUS);
        assert_eq!(visible_radius(Some(1.7)), 1.7);
    }

    #[test]
    fn labels_match_selection_vocabulary() {
        let labels = BodyKind::ALL.map(|kind| kind.label());
        assert_eq!(labels, ["star", "planet", "host_star", "exoplanet"]);
    }

    #[test]
    fn spin_rotates_without_moving() {
        let mut app = App::new();
        app.add_systems(Update, spin_bodies);
        let entity = app
            .world_mut()
            .spawn((Transform::from_xyz(4.0, 0.0, 0.0), RotationSpeed(0.25)))
            .id();

        for _ in 0..4 {
            app.update();
        }

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(4.0, 0.0, 0.0));
        let (axis, angle) = transform.rotation.to_axis_angle();
        assert_abs_diff_eq!(angle, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(axis.y, 1.0, epsilon = 1e-5);
    }
}
