//! Records delivered by the entity feed. Field names follow the feed's wire format.

use crate::body::visible_radius;
use crate::color;
use bevy::color::Srgba;
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

const SOLAR_TEMPERATURE: f32 = 5772.0;
const LUMINOSITY_RATIO_RANGE: (f32, f32) = (0.1, 10.0);
/// Host star meshes are drawn larger than their stellar radius.
const HOST_STAR_RADIUS_SCALE: f32 = 1.5;

/// Feeds send `null` for values they do not have; treat it like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position_x: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position_y: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position_z: f32,
}

impl Coordinates {
    pub fn new(position: Vec3) -> Self {
        Self {
            position_x: position.x,
            position_y: position.y,
            position_z: position.z,
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        let position = Vec3::new(self.position_x, self.position_y, self.position_z);
        if position.is_finite() {
            position
        } else {
            Vec3::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Component)]
pub struct HostStarRecord {
    pub id: String,
    #[serde(rename = "hostname")]
    pub name: String,
    /// Effective temperature in kelvin.
    #[serde(rename = "st_teff", default)]
    pub effective_temperature: Option<f32>,
    /// Stellar radius in solar radii.
    #[serde(rename = "st_rad", default)]
    pub stellar_radius: Option<f32>,
    #[serde(rename = "st_dist_ly", default)]
    pub distance_ly: Option<f32>,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HostStarRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effective_temperature: None,
            stellar_radius: None,
            distance_ly: None,
            coordinates: Coordinates::new(position),
            color: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.coordinates.to_vec3()
    }

    pub fn visual_radius(&self) -> f32 {
        visible_radius(self.stellar_radius.map(|r| r * HOST_STAR_RADIUS_SCALE))
    }

    /// Blackbody tint, if the record carries a usable temperature.
    pub fn tint(&self) -> Option<Srgba> {
        self.effective_temperature
            .filter(|t| t.is_finite() && *t > 0.0)
            .map(color::blackbody)
    }

    /// Mesh color: the record's own color, else its tint, else gray.
    pub fn surface_color(&self) -> Srgba {
        color::parse_hex(&self.color)
            .or_else(|| self.tint())
            .unwrap_or(color::FALLBACK_TINT)
    }

    /// Luminosity relative to the Sun, `(R/R☉)²·(T/T☉)⁴`, clamped to a range that keeps
    /// every star visible without washing out the scene.
    pub fn luminosity_ratio(&self) -> f32 {
        let radius = self
            .stellar_radius
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(1.0);
        let temperature = self
            .effective_temperature
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(SOLAR_TEMPERATURE);
        let (min, max) = LUMINOSITY_RATIO_RANGE;
        (radius.powi(2) * (temperature / SOLAR_TEMPERATURE).powi(4)).clamp(min, max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Component)]
pub struct ExoplanetRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub host_star_id: Option<String>,
    /// Host name as shown in the catalog, independent of whether the host is loaded.
    #[serde(default)]
    pub host_star: Option<String>,
    #[serde(default)]
    pub distance_from_sun: Option<String>,
    #[serde(default)]
    pub discovery_date: Option<String>,
    #[serde(default)]
    pub mass: Option<String>,
    #[serde(default)]
    pub radius: Option<String>,
    #[serde(default)]
    pub orbital_period: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub discovery_method: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExoplanetRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            host_star_id: None,
            host_star: None,
            distance_from_sun: None,
            discovery_date: None,
            mass: None,
            radius: None,
            orbital_period: None,
            temperature: None,
            discovery_method: None,
            observations: None,
            color: String::new(),
            coordinates: Coordinates::new(position),
            size: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_host(mut self, host_star_id: impl Into<String>) -> Self {
        self.host_star_id = Some(host_star_id.into());
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Stored coordinates, used whenever the host cannot be resolved.
    pub fn position(&self) -> Vec3 {
        self.coordinates.to_vec3()
    }

    pub fn visual_radius(&self) -> f32 {
        visible_radius(self.size)
    }

    pub fn surface_color(&self) -> Srgba {
        color::parse_or_fallback(&self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn deserialize_host_star_from_feed_json() {
        let json = r##"{
            "id": "hs-1",
            "hostname": "Kepler-22",
            "st_teff": 5518,
            "st_rad": 0.98,
            "st_dist_ly": 635.0,
            "position_x": 10.0,
            "position_y": -2.5,
            "position_z": 4.0,
            "color": "#ffd27f",
            "created_at": "2024-03-01T12:00:00Z"
        }"##;
        let record: HostStarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Kepler-22");
        assert_eq!(record.position(), Vec3::new(10.0, -2.5, 4.0));
        assert_abs_diff_eq!(record.visual_radius(), 1.47, epsilon = 1e-5);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn exoplanet_with_missing_fields_still_loads() {
        let json = r#"{ "id": "ex-1", "name": "Nameless b" }"#;
        let record: ExoplanetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.host_star_id, None);
        assert_eq!(record.position(), Vec3::ZERO);
        assert_eq!(record.visual_radius(), crate::body::MIN_VISIBLE_RADIUS);
        assert_eq!(record.surface_color(), color::FALLBACK_TINT);
    }

    #[test]
    fn null_color_and_coordinates_degrade_to_defaults() {
        let json = r#"{
            "id": "hs-2",
            "hostname": "Partial",
            "st_teff": null,
            "position_x": null,
            "position_y": 3.0,
            "position_z": null,
            "color": null
        }"#;
        let star: HostStarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(star.position(), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(star.color, "");
        assert_eq!(star.surface_color(), color::FALLBACK_TINT);

        let json = r#"{ "id": "ex-2", "name": "Partial b", "color": null, "position_x": null }"#;
        let planet: ExoplanetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(planet.position(), Vec3::ZERO);
        assert_eq!(planet.surface_color(), color::FALLBACK_TINT);
    }

    #[test]
    fn star_surface_color_falls_back_to_temperature_tint() {
        let mut record = HostStarRecord::new("hs", "Hot", Vec3::ZERO);
        record.effective_temperature = Some(12_000.0);
        record.color = "not a color".to_string();
        assert_eq!(record.surface_color(), color::blackbody(12_000.0));

        record.effective_temperature = None;
        assert_eq!(record.surface_color(), color::FALLBACK_TINT);
    }

    #[test]
    fn luminosity_ratio_is_solar_by_default_and_clamped() {
        let mut record = HostStarRecord::new("hs", "Sol-like", Vec3::ZERO);
        assert_abs_diff_eq!(record.luminosity_ratio(), 1.0, epsilon = 1e-6);

        record.stellar_radius = Some(50.0);
        record.effective_temperature = Some(20_000.0);
        assert_eq!(record.luminosity_ratio(), 10.0);

        record.stellar_radius = Some(0.1);
        record.effective_temperature = Some(2500.0);
        assert_eq!(record.luminosity_ratio(), 0.1);
    }
}
