use crate::constants::{INCHES_PER_YARD, MOA_INCHES_PER_100_YARDS, MOA_PER_MIL};
use serde::{Deserialize, Serialize};

/// Angular unit a scope adjusts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Angular mil (1/1000 of distance)
    Mil,
    /// Shooter's minute of angle (1.047" per 100 yd)
    Moa,
}

impl AngleUnit {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mil" | "mils" | "mrad" => Some(AngleUnit::Mil),
            "moa" => Some(AngleUnit::Moa),
            _ => None,
        }
    }
}

impl std::fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngleUnit::Mil => write!(f, "mil"),
            AngleUnit::Moa => write!(f, "MOA"),
        }
    }
}

/// Linear subtension in inches of an angular value at a distance.
pub fn angle_to_inches(value: f64, unit: AngleUnit, distance_yards: f64) -> f64 {
    match unit {
        AngleUnit::Mil => value * distance_yards * INCHES_PER_YARD / 1000.0,
        AngleUnit::Moa => value * MOA_INCHES_PER_100_YARDS * distance_yards / 100.0,
    }
}

/// Angular value subtended by a linear size at a distance.
///
/// Inverse of [`angle_to_inches`]. A non-positive distance subtends nothing
/// and yields 0.
pub fn inches_to_angle(inches: f64, unit: AngleUnit, distance_yards: f64) -> f64 {
    if distance_yards <= 0.0 {
        return 0.0;
    }
    match unit {
        AngleUnit::Mil => inches * 1000.0 / (distance_yards * INCHES_PER_YARD),
        AngleUnit::Moa => inches / (MOA_INCHES_PER_100_YARDS * distance_yards / 100.0),
    }
}

pub fn mils_to_moa(mils: f64) -> f64 {
    mils * MOA_PER_MIL
}

pub fn moa_to_mils(moa: f64) -> f64 {
    moa / MOA_PER_MIL
}

/// Horizontal component of a line-of-sight distance fired at an angle.
///
/// Uphill and downhill shorten the range the same way; the sign of the
/// angle does not matter.
pub fn true_ballistic_range(line_of_sight_yards: f64, angle_degrees: f64) -> f64 {
    line_of_sight_yards * angle_degrees.abs().to_radians().cos()
}
