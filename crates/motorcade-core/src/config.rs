//! Showroom configuration.
//!
//! The fleet, road, camera, and driving tuning are static configuration:
//! compiled-in defaults reproduce the stock showroom, and a RON file can
//! replace them wholesale.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Placement parameters for one car model.
///
/// `counter` is the horizontal offset that positions the primary instance
/// and derives the three mirrored clone positions (see [`crate::placement`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarPlacement {
    /// Display name used in logs
    pub name: String,
    /// Asset path, relative to the asset root
    pub asset: String,
    /// Uniform scale applied on all three axes
    pub scale: f32,
    /// Vertical offset lifting the model onto the road surface
    pub vertical_offset: f32,
    /// Horizontal offset along the lane
    pub counter: f32,
}

/// Placement parameters for the road model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadPlacement {
    /// Asset path, relative to the asset root
    pub asset: String,
    /// Uniform scale applied on all three axes
    pub scale: f32,
}

impl Default for RoadPlacement {
    fn default() -> Self {
        Self {
            asset: "models/usa_road.obj".to_string(),
            scale: 5.0,
        }
    }
}

/// Orbit camera tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraTuning {
    /// Initial eye position
    pub eye: Vec3,
    /// Orbit target
    pub target: Vec3,
    /// Per-frame decay factor for damped rotation, in `0..1`
    pub damping: f32,
    /// Closest allowed orbit radius
    pub min_radius: f32,
    /// Farthest allowed orbit radius
    pub max_radius: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            eye: Vec3::new(15.0, 25.0, 150.0),
            target: Vec3::ZERO,
            damping: 0.1,
            min_radius: 10.0,
            max_radius: 1000.0,
        }
    }
}

/// Car interaction tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveTuning {
    /// World units a car moves per keypress
    pub movement_speed: f32,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            movement_speed: 1.0,
        }
    }
}

/// Complete showroom configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowroomConfig {
    /// Cars placed along the lanes; digit keys select the first five
    #[serde(default = "default_fleet")]
    pub cars: Vec<CarPlacement>,
    #[serde(default)]
    pub road: RoadPlacement,
    #[serde(default)]
    pub camera: CameraTuning,
    #[serde(default)]
    pub drive: DriveTuning,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            cars: default_fleet(),
            road: RoadPlacement::default(),
            camera: CameraTuning::default(),
            drive: DriveTuning::default(),
        }
    }
}

fn car(name: &str, asset: &str, scale: f32, vertical_offset: f32, counter: f32) -> CarPlacement {
    CarPlacement {
        name: name.to_string(),
        asset: asset.to_string(),
        scale,
        vertical_offset,
        counter,
    }
}

/// The stock five-car fleet.
fn default_fleet() -> Vec<CarPlacement> {
    vec![
        car("shelby", "models/shelby/scene.gltf", 450.0, 0.0, 0.0),
        car("porsche", "models/porsche/scene.gltf", 5.0, 0.55, 15.0),
        car("boxster", "models/boxster/scene.gltf", 1.35, 3.9, 30.0),
        car("civic", "models/civic/scene.gltf", 500.0, 0.0, 45.0),
        car("focus", "models/focus/scene.gltf", 500.0, 0.0, 60.0),
    ]
}

impl ShowroomConfig {
    /// Parse a configuration from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.cars.is_empty() {
            return Err(Error::Invalid("fleet must contain at least one car".into()));
        }
        if let Some(bad) = self.cars.iter().find(|c| c.scale <= 0.0) {
            return Err(Error::Invalid(format!(
                "car '{}' has non-positive scale {}",
                bad.name, bad.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fleet() {
        let config = ShowroomConfig::default();
        assert_eq!(config.cars.len(), 5);
        assert_eq!(config.cars[0].name, "shelby");
        assert_eq!(config.cars[0].scale, 450.0);
        assert_eq!(config.cars[1].vertical_offset, 0.55);
        assert_eq!(config.cars[4].counter, 60.0);
        assert_eq!(config.road.scale, 5.0);
        assert_eq!(config.drive.movement_speed, 1.0);
    }

    #[test]
    fn test_parse_ron() {
        let text = r#"(
            cars: [
                (
                    name: "kombi",
                    asset: "models/kombi/scene.gltf",
                    scale: 2.5,
                    vertical_offset: 0.0,
                    counter: 10.0,
                ),
            ],
        )"#;
        let config = ShowroomConfig::from_ron(text).unwrap();
        assert_eq!(config.cars.len(), 1);
        assert_eq!(config.cars[0].name, "kombi");
        // Omitted sections fall back to defaults
        assert_eq!(config.camera.damping, 0.1);
        assert_eq!(config.road.asset, "models/usa_road.obj");
    }

    #[test]
    fn test_reject_empty_fleet() {
        let err = ShowroomConfig::from_ron("(cars: [])").unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }

    #[test]
    fn test_reject_bad_scale() {
        let text = r#"(
            cars: [
                (name: "x", asset: "x.gltf", scale: 0.0, vertical_offset: 0.0, counter: 0.0),
            ],
        )"#;
        let err = ShowroomConfig::from_ron(text).unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }

    #[test]
    fn test_reject_malformed_ron() {
        let err = ShowroomConfig::from_ron("not ron at all").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
