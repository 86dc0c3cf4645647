//! Rifle/ammunition profiles.
//!
//! A profile is built by the caller (presets, a JSON file, CLI flags) and is
//! read-only to the solver. Validation lives here, at the boundary, because
//! the integrator does not check its inputs.

use crate::cli_api::BallisticsError;
use crate::DragModel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwistDirection {
    Right,
    Left,
}

/// Rifle and load description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RifleProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub caliber: String,
    pub ballistic_coefficient: f64,
    pub drag_model: DragModel,
    pub muzzle_velocity_fps: f64,
    pub bullet_mass_grains: f64,
    pub zero_distance_yards: f64,
    /// Inches per turn; display only, spin drift is not modelled
    #[serde(default)]
    pub barrel_twist_inches: Option<f64>,
    #[serde(default)]
    pub twist_direction: Option<TwistDirection>,
}

impl RifleProfile {
    pub fn new(
        ballistic_coefficient: f64,
        drag_model: DragModel,
        muzzle_velocity_fps: f64,
        bullet_mass_grains: f64,
        zero_distance_yards: f64,
    ) -> Self {
        Self {
            name: String::new(),
            caliber: String::new(),
            ballistic_coefficient,
            drag_model,
            muzzle_velocity_fps,
            bullet_mass_grains,
            zero_distance_yards,
            barrel_twist_inches: None,
            twist_direction: None,
        }
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        let checks = [
            ("Ballistic coefficient", self.ballistic_coefficient),
            ("Muzzle velocity", self.muzzle_velocity_fps),
            ("Bullet mass", self.bullet_mass_grains),
            ("Zero distance", self.zero_distance_yards),
        ];

        for (label, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{label} must be positive, got {value}").into());
            }
        }

        if let Some(twist) = self.barrel_twist_inches {
            if !twist.is_finite() || twist <= 0.0 {
                return Err(format!("Barrel twist must be positive, got {twist}").into());
            }
        }

        Ok(())
    }

    /// Load a profile from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, BallisticsError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(json: &str) -> Result<Self, BallisticsError> {
        let profile: RifleProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    fn preset(
        name: &str,
        caliber: &str,
        bullet_mass_grains: f64,
        ballistic_coefficient: f64,
        muzzle_velocity_fps: f64,
        barrel_twist_inches: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            caliber: caliber.to_string(),
            ballistic_coefficient,
            drag_model: DragModel::G7,
            muzzle_velocity_fps,
            bullet_mass_grains,
            zero_distance_yards: 100.0,
            barrel_twist_inches: Some(barrel_twist_inches),
            twist_direction: Some(TwistDirection::Right),
        }
    }
}

/// Built-in profiles, all G7 with a 100 yd zero
pub fn default_rifles() -> Vec<RifleProfile> {
    vec![
        RifleProfile::preset("6.5 Creedmoor (140gr)", "6.5 Creedmoor", 140.0, 0.610, 2750.0, 8.0),
        RifleProfile::preset(".308 Win (175gr)", ".308 Winchester", 175.0, 0.505, 2600.0, 10.0),
        RifleProfile::preset("6mm Creedmoor (105gr)", "6mm Creedmoor", 105.0, 0.540, 3000.0, 7.5),
        RifleProfile::preset(".300 Win Mag (190gr)", ".300 Win Mag", 190.0, 0.640, 2900.0, 10.0),
    ]
}

/// Find a built-in profile by name, ignoring case.
pub fn rifle_by_name(name: &str) -> Option<RifleProfile> {
    let wanted = name.trim().to_lowercase();
    default_rifles()
        .into_iter()
        .find(|r| r.name.to_lowercase() == wanted)
}
