//! Air density correction for drag.
//!
//! The trainer scales retardation by a single density ratio relative to the
//! standard atmosphere (59°F, 29.92 inHg). Only temperature and station
//! pressure enter the ratio; altitude and humidity are carried for display
//! and for callers that want them, but do not change the result.

use crate::constants::{
    RANKINE_OFFSET, STANDARD_PRESSURE_INHG, STANDARD_TEMPERATURE_F, STANDARD_TEMPERATURE_R,
};
use serde::{Deserialize, Serialize};

/// Shooting environment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub temperature_f: f64,
    /// Station pressure (inHg)
    pub pressure_inhg: f64,
    /// Not used by the density ratio
    pub altitude_ft: f64,
    /// Not used by the density ratio
    pub humidity_percent: f64,
}

impl Environment {
    /// Standard atmosphere; density ratio is exactly 1.0
    pub fn standard() -> Self {
        Self {
            temperature_f: STANDARD_TEMPERATURE_F,
            pressure_inhg: STANDARD_PRESSURE_INHG,
            altitude_ft: 0.0,
            humidity_percent: 0.0,
        }
    }

    /// Typical range day used by scenarios and drills
    pub fn range_day() -> Self {
        Self {
            temperature_f: 70.0,
            pressure_inhg: 29.92,
            altitude_ft: 1000.0,
            humidity_percent: 50.0,
        }
    }

    pub fn air_density_ratio(&self) -> f64 {
        air_density_ratio(self)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::range_day()
    }
}

/// Air density relative to standard: pressure ratio times inverse
/// absolute-temperature ratio.
pub fn air_density_ratio(environment: &Environment) -> f64 {
    let pressure_ratio = environment.pressure_inhg / STANDARD_PRESSURE_INHG;
    let temperature_ratio = STANDARD_TEMPERATURE_R / (environment.temperature_f + RANKINE_OFFSET);
    pressure_ratio * temperature_ratio
}
