/// Physical and empirical constants used by the trainer's ballistics core.
///
/// Everything here is in imperial units: feet, yards, inches, grains, ft/s.

/// Gravitational acceleration in ft/s²
pub const GRAVITY_FPS2: f64 = 32.174;

/// Grains per avoirdupois pound
pub const GRAINS_PER_POUND: f64 = 7000.0;

pub const FEET_PER_YARD: f64 = 3.0;
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const INCHES_PER_YARD: f64 = 36.0;

/// Spatial integration step in yards
pub const INTEGRATION_STEP_YARDS: f64 = 0.5;

/// Horizontal velocity below which integration stops (ft/s)
///
/// Drag can otherwise stall progress near zero velocity and the loop
/// would never reach the requested range.
pub const MIN_HORIZONTAL_VELOCITY_FPS: f64 = 100.0;

/// Empirical retardation scale
///
/// Retardation = (Cd / BC) * density_ratio * v² / RETARDATION_SCALE
///
/// This is not a unit-exact derivation. It is kept fixed so drop tables
/// stay comparable with earlier numbers produced by the trainer.
pub const RETARDATION_SCALE: f64 = 100_000.0;

// Standard atmosphere reference (59°F, 29.92 inHg)
pub const STANDARD_TEMPERATURE_F: f64 = 59.0;
pub const STANDARD_PRESSURE_INHG: f64 = 29.92;

/// Offset from Fahrenheit to Rankine
pub const RANKINE_OFFSET: f64 = 459.67;

/// 518.67°R. Derived from the Fahrenheit value with the same addition the
/// density ratio performs, so standard conditions give exactly 1.0.
pub const STANDARD_TEMPERATURE_R: f64 = STANDARD_TEMPERATURE_F + RANKINE_OFFSET;

/// Inches subtended by one MOA at 100 yards
pub const MOA_INCHES_PER_100_YARDS: f64 = 1.047;

/// MOA per angular mil
pub const MOA_PER_MIL: f64 = 3.438;

/// Empirical wind lag factor standing in for a bullet-specific value
pub const WIND_DRIFT_FACTOR: f64 = 0.5;

/// How much a wind sample at the target counts less than one at the muzzle
pub const WIND_WEIGHT_FALLOFF: f64 = 0.5;

/// Degrees per hour on a clock face
pub const DEGREES_PER_CLOCK_HOUR: f64 = 30.0;
