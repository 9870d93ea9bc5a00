//! Camera state machine. Every method takes the camera's current transform, so leaving a
//! transition or a follow picks up from wherever the camera actually is.

use crate::components::{
    CameraMode, Follow, OrbitAngles, OrbitCamera, OrbitCameraState, Transition,
};
use crate::DEFAULT_FOCUS_DISTANCE;
use bevy::prelude::*;

impl OrbitCameraState {
    /// Pointer drag in pixels. Cancels a transition into free orbit.
    pub fn drag(&mut self, settings: &OrbitCamera, transform: &Transform, delta: Vec2) {
        if matches!(self.mode, CameraMode::Transitioning(_)) {
            self.free_orbit_from(settings, transform.translation);
        }
        self.angles.rotate(delta * settings.drag_sensitivity);
    }

    /// Scroll in pixels, positive toward the user (zooming out).
    pub fn zoom(&mut self, settings: &OrbitCamera, transform: &Transform, delta_y: f32) {
        if let CameraMode::Transitioning(transition) = self.mode {
            self.leave_transition(settings, transform.translation, transition.resume);
        }
        match &mut self.mode {
            CameraMode::Following(follow) => {
                let distance = follow.offset.length() + delta_y * settings.follow_zoom_sensitivity;
                let distance =
                    distance.clamp(settings.min_follow_distance, settings.max_follow_distance);
                follow.offset = follow.offset.normalize_or(Vec3::Z) * distance;
            }
            _ => {
                self.angles.radius = (self.angles.radius + delta_y * settings.zoom_sensitivity)
                    .clamp(settings.min_radius, settings.max_radius);
            }
        }
    }

    /// Starts a transition that frames `point` from `distance` away. A follow in
    /// progress resumes once the camera has arrived. Non-finite points are ignored, and
    /// a distance that is not finite and positive falls back to the default.
    pub fn focus(
        &mut self,
        settings: &OrbitCamera,
        transform: &Transform,
        point: Vec3,
        distance: f32,
    ) {
        if !point.is_finite() {
            debug!("Ignoring focus on non-finite point {point}");
            return;
        }
        let distance = if distance.is_finite() && distance > 0.0 {
            distance
        } else {
            DEFAULT_FOCUS_DISTANCE
        };
        let (look_at, resume) = match self.mode {
            CameraMode::Transitioning(transition) => (transition.look_at, transition.resume),
            CameraMode::Following(follow) => (look_ahead(settings, transform), Some(follow)),
            CameraMode::FreeOrbit => (look_ahead(settings, transform), None),
        };
        self.mode = CameraMode::Transitioning(Transition {
            target_position: point + Vec3::new(0.0, 0.3 * distance, distance),
            target_look_at: point,
            look_at,
            resume,
        });
        debug!("Camera focusing on {point} from {distance}");
    }

    /// Follows `target`, framing it from an offset proportional to its radius.
    pub fn follow(&mut self, target: Entity, radius: f32) {
        self.mode = CameraMode::Following(Follow {
            target,
            offset: Vec3::new(0.0, 2.0 * radius, 5.0 * radius),
        });
        debug!("Camera following {target}");
    }

    pub fn release(&mut self, settings: &OrbitCamera, transform: &Transform) {
        if !matches!(self.mode, CameraMode::FreeOrbit) {
            self.free_orbit_from(settings, transform.translation);
        }
    }

    /// Advances the camera by one frame. `locate` resolves the followed entity's
    /// position; a target that cannot be found ends the follow.
    pub fn step(
        &mut self,
        settings: &OrbitCamera,
        transform: &mut Transform,
        locate: impl Fn(Entity) -> Option<Vec3>,
    ) {
        match self.mode {
            CameraMode::FreeOrbit => {
                transform.translation = self.angles.position();
                transform.look_at(Vec3::ZERO, Vec3::Y);
            }
            CameraMode::Following(follow) => {
                let Some(target) = locate(follow.target) else {
                    debug!("Followed entity {} is gone", follow.target);
                    self.free_orbit_from(settings, transform.translation);
                    return;
                };
                transform.translation = transform
                    .translation
                    .lerp(target + follow.offset, settings.smoothing);
                transform.look_at(target, Vec3::Y);
            }
            CameraMode::Transitioning(mut transition) => {
                transform.translation = transform
                    .translation
                    .lerp(transition.target_position, settings.smoothing);
                transition.look_at = transition
                    .look_at
                    .lerp(transition.target_look_at, settings.smoothing);
                let arrived = transform.translation.distance(transition.target_position)
                    < settings.arrival_threshold;
                if arrived {
                    transition.look_at = transition.target_look_at;
                }
                transform.look_at(transition.look_at, Vec3::Y);
                if arrived {
                    self.leave_transition(settings, transform.translation, transition.resume);
                } else {
                    self.mode = CameraMode::Transitioning(transition);
                }
            }
        }
    }

    fn leave_transition(
        &mut self,
        settings: &OrbitCamera,
        position: Vec3,
        resume: Option<Follow>,
    ) {
        match resume {
            Some(follow) => self.mode = CameraMode::Following(follow),
            None => self.free_orbit_from(settings, position),
        }
    }

    fn free_orbit_from(&mut self, settings: &OrbitCamera, position: Vec3) {
        if !matches!(self.mode, CameraMode::FreeOrbit) {
            debug!("Camera back to free orbit from {}", self.mode.label());
        }
        self.mode = CameraMode::FreeOrbit;
        self.angles = OrbitAngles::from_position(position, settings);
    }
}

fn look_ahead(settings: &OrbitCamera, transform: &Transform) -> Vec3 {
    transform.translation + transform.forward() * settings.look_ahead
}
