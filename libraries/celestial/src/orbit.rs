use crate::registry::EntityRegistry;
use crate::CelestialSet;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

/// Angle added to every hosted orbit each frame.
pub const EXOPLANET_ANGULAR_STEP: f32 = 0.005;
pub const EXOPLANET_ORBIT_RADIUS: RangeInclusive<f32> = 3.0..=7.5;
/// Maximum vertical offset of a hosted orbit from its host's plane.
pub const EXOPLANET_ORBIT_JITTER: f32 = 1.0;
const ORBIT_LINE_SEGMENTS: u32 = 64;
const ORBIT_LINE_COLOR: Srgba = Srgba::new(0.267, 0.267, 0.267, 0.3);

pub struct OrbitPlugin {
    pub draw_orbits: bool,
}

impl Default for OrbitPlugin {
    fn default() -> Self {
        Self { draw_orbits: true }
    }
}

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CircularOrbit>()
            .register_type::<HostedOrbit>()
            .register_type::<DrawOrbits>()
            .insert_resource(DrawOrbits(self.draw_orbits))
            .add_systems(
                Update,
                (advance_planet_orbits, advance_hosted_orbits).in_set(CelestialSet::Animate),
            )
            .add_systems(
                PostUpdate,
                draw_orbits
                    .after(TransformSystem::TransformPropagate)
                    .run_if(should_draw_orbits),
            );
    }
}

#[derive(Debug, Resource, Deref, DerefMut, Reflect)]
#[reflect(Resource)]
pub struct DrawOrbits(pub bool);

/// Circular orbit around the origin in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Component, Reflect)]
#[reflect(Component)]
pub struct CircularOrbit {
    pub distance: f32,
    /// Radians per frame.
    pub angular_speed: f32,
    pub angle: f32,
}

impl CircularOrbit {
    pub fn new(distance: f32, angular_speed: f32, angle: f32) -> Self {
        Self {
            distance,
            angular_speed,
            angle: angle.rem_euclid(TAU),
        }
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + self.angular_speed).rem_euclid(TAU);
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.distance,
            0.0,
            self.angle.sin() * self.distance,
        )
    }
}

/// Stylized orbit around a host star, resolved through the registry every frame.
#[derive(Debug, Clone, PartialEq, Component, Reflect)]
#[reflect(Component)]
pub struct HostedOrbit {
    pub host_id: String,
    pub radius: f32,
    pub height: f32,
    pub angle: f32,
}

impl HostedOrbit {
    pub fn random(host_id: impl Into<String>, rng: &mut impl Rng) -> Self {
        Self {
            host_id: host_id.into(),
            radius: rng.gen_range(EXOPLANET_ORBIT_RADIUS),
            height: rng.gen_range(-EXOPLANET_ORBIT_JITTER..=EXOPLANET_ORBIT_JITTER),
            angle: rng.gen_range(0.0..TAU),
        }
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + EXOPLANET_ANGULAR_STEP).rem_euclid(TAU);
    }

    pub fn position(&self, host: Vec3) -> Vec3 {
        host + Vec3::new(
            self.angle.cos() * self.radius,
            self.height,
            self.angle.sin() * self.radius,
        )
    }
}

pub fn advance_planet_orbits(mut q: Query<(&mut Transform, &mut CircularOrbit)>) {
    for (mut transform, mut orbit) in &mut q {
        orbit.advance();
        transform.translation = orbit.position();
    }
}

/// Moves hosted exoplanets around their host. An exoplanet whose host is gone
/// keeps its last position until a host with the same id shows up again.
pub fn advance_hosted_orbits(
    registry: Res<EntityRegistry>,
    mut q: Query<(&mut Transform, &mut HostedOrbit)>,
) {
    for (mut transform, mut orbit) in &mut q {
        let Some(host) = registry.host_star_position(&orbit.host_id) else {
            continue;
        };
        orbit.advance();
        transform.translation = orbit.position(host);
    }
}

fn should_draw_orbits(draw_orbits: Res<DrawOrbits>) -> bool {
    **draw_orbits
}

fn draw_orbits(mut gizmos: Gizmos, q: Query<&CircularOrbit>) {
    let flat = Isometry3d::from_rotation(Quat::from_rotation_x(FRAC_PI_2));
    for orbit in &q {
        gizmos
            .circle(flat, orbit.distance, ORBIT_LINE_COLOR)
            .resolution(ORBIT_LINE_SEGMENTS);
    }
}
