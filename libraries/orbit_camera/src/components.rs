use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// The configuration of the orbit camera controller
#[derive(Debug, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct OrbitCamera {
    /// Radians per pixel of pointer drag
    pub drag_sensitivity: f32,
    /// World units per pixel of scroll, free orbit
    pub zoom_sensitivity: f32,
    /// World units per pixel of scroll, while following
    pub follow_zoom_sensitivity: f32,
    /// For devices with a notched scroll wheel, like desktop mice
    pub scroll_line_pixels: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_follow_distance: f32,
    pub max_follow_distance: f32,
    /// Fraction of the remaining distance covered each frame
    pub smoothing: f32,
    /// Distance under which a transition counts as arrived
    pub arrival_threshold: f32,
    /// Distance of the synthetic look-at point when a transition starts
    pub look_ahead: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        OrbitCamera {
            drag_sensitivity: 0.005,
            zoom_sensitivity: 0.05,
            follow_zoom_sensitivity: 0.02,
            scroll_line_pixels: 100.0,
            min_radius: 20.0,
            max_radius: 300.0,
            min_follow_distance: 5.0,
            max_follow_distance: 30.0,
            smoothing: 0.05,
            arrival_threshold: 0.5,
            look_ahead: 100.0,
        }
    }
}

/// Spherical coordinates of the camera around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct OrbitAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl OrbitAngles {
    /// Angles that reproduce `position`, with the radius clamped to the settings' limits.
    /// A non-finite position is treated as the origin.
    pub fn from_position(position: Vec3, settings: &OrbitCamera) -> Self {
        let position = if position.is_finite() {
            position
        } else {
            Vec3::ZERO
        };
        let length = position.length();
        let (yaw, pitch) = if length > f32::EPSILON {
            (
                position.x.atan2(position.z),
                (position.y / length).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            yaw,
            pitch,
            radius: length.clamp(settings.min_radius, settings.max_radius),
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            self.radius * sin_yaw * cos_pitch,
            self.radius * sin_pitch,
            self.radius * cos_yaw * cos_pitch,
        )
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x;
        self.pitch = (self.pitch + delta.y).clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Follow {
    pub target: Entity,
    pub offset: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Transition {
    pub target_position: Vec3,
    pub target_look_at: Vec3,
    /// Synthetic look-at point, moved toward `target_look_at` every frame.
    pub look_at: Vec3,
    /// Follow to go back to once arrived. Free orbit otherwise.
    pub resume: Option<Follow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum CameraMode {
    #[default]
    FreeOrbit,
    Following(Follow),
    Transitioning(Transition),
}

impl CameraMode {
    pub fn label(&self) -> &'static str {
        match self {
            CameraMode::FreeOrbit => "free orbit",
            CameraMode::Following(_) => "following",
            CameraMode::Transitioning(_) => "transitioning",
        }
    }
}

// The internal state of the orbit camera controller
#[derive(Debug, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct OrbitCameraState {
    pub mode: CameraMode,
    pub angles: OrbitAngles,
}

impl OrbitCameraState {
    /// Free orbit state matching the camera's current placement.
    pub fn new(transform: &Transform, settings: &OrbitCamera) -> Self {
        Self {
            mode: CameraMode::FreeOrbit,
            angles: OrbitAngles::from_position(transform.translation, settings),
        }
    }

    pub fn followed(&self) -> Option<Entity> {
        match self.mode {
            CameraMode::Following(follow) => Some(follow.target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn angles_round_trip_through_position() {
        let settings = OrbitCamera::default();
        let position = Vec3::new(0.0, 30.0, 50.0);
        let angles = OrbitAngles::from_position(position, &settings);
        assert_abs_diff_eq!(angles.yaw, 0.0);
        assert_abs_diff_eq!(angles.radius, position.length(), epsilon = 1e-4);
        let back = angles.position();
        assert_abs_diff_eq!(back.x, position.x, epsilon = 1e-3);
        assert_abs_diff_eq!(back.y, position.y, epsilon = 1e-3);
        assert_abs_diff_eq!(back.z, position.z, epsilon = 1e-3);
    }

    #[test]
    fn pitch_is_clamped_to_the_poles() {
        let mut angles = OrbitAngles {
            yaw: 0.0,
            pitch: 0.0,
            radius: 50.0,
        };
        angles.rotate(Vec2::new(0.3, 10.0));
        assert_eq!(angles.pitch, FRAC_PI_2);
        assert_abs_diff_eq!(angles.yaw, 0.3);
        angles.rotate(Vec2::new(0.0, -20.0));
        assert_eq!(angles.pitch, -FRAC_PI_2);
    }

    #[test]
    fn non_finite_positions_give_usable_angles() {
        let settings = OrbitCamera::default();
        for position in [Vec3::NAN, Vec3::new(f32::INFINITY, 0.0, 1.0)] {
            let angles = OrbitAngles::from_position(position, &settings);
            assert_eq!(angles.radius, settings.min_radius);
            assert!(angles.position().is_finite());
        }
    }

    #[test]
    fn close_positions_clamp_the_radius() {
        let settings = OrbitCamera::default();
        let angles = OrbitAngles::from_position(Vec3::new(1.0, 0.0, 0.0), &settings);
        assert_eq!(angles.radius, settings.min_radius);
        assert_abs_diff_eq!(angles.yaw, FRAC_PI_2);
    }
}
