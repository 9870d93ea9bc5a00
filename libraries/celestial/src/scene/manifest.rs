use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LightConfig {
    pub intensity: f32,
    pub range: f32,
}

/// Translucent shell around the sun. Radius is absolute, not relative to the sun.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GlowConfig {
    pub radius: f32,
    pub color: String,
    pub opacity: f32,
    #[serde(default)]
    pub spin: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SunConfig {
    pub name: String,
    pub radius: f32,
    pub color: String,
    #[serde(default)]
    pub spin: f32,
    pub light: LightConfig,
    #[serde(default)]
    pub ambient_brightness: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glows: Vec<GlowConfig>,
}

/// Ring around a planet. Radii are multiples of the planet radius.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RingConfig {
    pub inner: f32,
    pub outer: f32,
    pub color: String,
    pub opacity: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanetConfig {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    /// Radians per frame.
    pub orbit_speed: f32,
    /// Radians per frame.
    pub spin: f32,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<RingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CameraConfig {
    /// Initial camera position. The camera starts out looking at the origin.
    pub position: [f32; 3],
}

impl CameraConfig {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.position))
            .looking_at(Vec3::ZERO, Vec3::Y)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BackdropConfig {
    pub count: usize,
    /// Edge length of the cube the points are scattered in.
    pub extent: f32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            extent: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Resource)]
#[serde(rename_all = "kebab-case")]
pub struct SolarSystem {
    pub sun: SunConfig,
    pub planets: Vec<PlanetConfig>,
    pub camera: CameraConfig,
    #[serde(default)]
    pub backdrop: BackdropConfig,
}
