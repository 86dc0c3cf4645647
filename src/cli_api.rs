// CLI API module - the solver entry points the CLI, scenarios and drills call
use crate::angle_calculations::{inches_to_angle, true_ballistic_range, AngleUnit};
use crate::atmosphere::{air_density_ratio, Environment};
use crate::constants::INCHES_PER_YARD;
use crate::profiles::RifleProfile;
use crate::trajectory_solver::integrate;
use crate::wind::{aggregate_crosswind, wind_drift_inches, WindVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Largest dope table `dope_table` will build
pub const MAX_TABLE_ROWS: usize = 10_000;

// Error type for validation and I/O at the solver boundary
#[derive(Debug)]
pub struct BallisticsError {
    message: String,
}

impl fmt::Display for BallisticsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for BallisticsError {}

impl From<String> for BallisticsError {
    fn from(msg: String) -> Self {
        BallisticsError { message: msg }
    }
}

impl From<&str> for BallisticsError {
    fn from(msg: &str) -> Self {
        BallisticsError { message: msg.to_string() }
    }
}

impl From<std::io::Error> for BallisticsError {
    fn from(err: std::io::Error) -> Self {
        BallisticsError { message: format!("I/O error: {err}") }
    }
}

impl From<serde_json::Error> for BallisticsError {
    fn from(err: serde_json::Error) -> Self {
        BallisticsError { message: format!("Invalid JSON: {err}") }
    }
}

// Solution at one distance, in every unit the UI layers display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticSolution {
    pub distance_yards: f64,
    pub drop_inches: f64,
    pub drop_mils: f64,
    pub drop_moa: f64,
    pub time_of_flight_s: f64,
    pub wind_drift_inches: f64,
    pub wind_drift_mils: f64,
    pub wind_drift_moa: f64,
    pub velocity_fps: f64,
    pub energy_ftlbs: f64,
}

/// Full solution for a shot.
///
/// The rifle is zeroed by integrating a second trajectory to the zero
/// distance; the line from the muzzle to that zero impact is the sight line
/// and drop is measured against it. Angle of fire only shortens the
/// horizontal range (`cos(|angle|)`); gravity is not re-resolved along the
/// slant path.
///
/// Never fails. Inputs are expected to have passed [`RifleProfile::validate`];
/// see [`solve_checked`].
pub fn solve(
    rifle: &RifleProfile,
    distance_yards: f64,
    angle_of_fire_degrees: f64,
    winds: &[WindVector],
    environment: &Environment,
) -> BallisticSolution {
    let true_range = true_ballistic_range(distance_yards, angle_of_fire_degrees);
    let density_ratio = air_density_ratio(environment);

    let trajectory = integrate(
        rifle.muzzle_velocity_fps,
        rifle.ballistic_coefficient,
        rifle.drag_model,
        rifle.bullet_mass_grains,
        true_range,
        density_ratio,
    );

    let zero = integrate(
        rifle.muzzle_velocity_fps,
        rifle.ballistic_coefficient,
        rifle.drag_model,
        rifle.bullet_mass_grains,
        rifle.zero_distance_yards,
        density_ratio,
    );

    let sight_angle = zero
        .drop_inches
        .atan2(rifle.zero_distance_yards * INCHES_PER_YARD);
    let drop_inches = trajectory.drop_inches - sight_angle.tan() * true_range * INCHES_PER_YARD;

    let crosswind = aggregate_crosswind(winds, true_range);
    let drift_inches = wind_drift_inches(crosswind, trajectory.time_of_flight_s);

    BallisticSolution {
        distance_yards,
        drop_inches,
        drop_mils: inches_to_angle(drop_inches, AngleUnit::Mil, distance_yards),
        drop_moa: inches_to_angle(drop_inches, AngleUnit::Moa, distance_yards),
        time_of_flight_s: trajectory.time_of_flight_s,
        wind_drift_inches: drift_inches,
        wind_drift_mils: inches_to_angle(drift_inches, AngleUnit::Mil, distance_yards),
        wind_drift_moa: inches_to_angle(drift_inches, AngleUnit::Moa, distance_yards),
        velocity_fps: trajectory.velocity_fps,
        energy_ftlbs: trajectory.energy_ftlbs,
    }
}

/// Validate every input, then [`solve`].
pub fn solve_checked(
    rifle: &RifleProfile,
    distance_yards: f64,
    angle_of_fire_degrees: f64,
    winds: &[WindVector],
    environment: &Environment,
) -> Result<BallisticSolution, BallisticsError> {
    rifle.validate()?;

    if !distance_yards.is_finite() || distance_yards < 0.0 {
        return Err(format!("Distance must be non-negative, got {distance_yards}").into());
    }
    if !angle_of_fire_degrees.is_finite() || angle_of_fire_degrees.abs() >= 90.0 {
        return Err(format!(
            "Angle of fire must be between -90 and 90 degrees, got {angle_of_fire_degrees}"
        )
        .into());
    }
    if !environment.temperature_f.is_finite() || !environment.pressure_inhg.is_finite() {
        return Err("Temperature and pressure must be finite".into());
    }
    if environment.pressure_inhg <= 0.0 {
        return Err(format!("Pressure must be positive, got {}", environment.pressure_inhg).into());
    }
    if environment.temperature_f <= -459.67 {
        return Err(format!(
            "Temperature must be above absolute zero, got {}",
            environment.temperature_f
        )
        .into());
    }

    for wind in winds {
        wind.validate(distance_yards)?;
    }

    Ok(solve(rifle, distance_yards, angle_of_fire_degrees, winds, environment))
}

/// Flat-fire, no-wind solutions from `start_yards` to `end_yards` inclusive.
///
/// Rows are independent, so they are solved in parallel; the result is in
/// ascending distance order.
pub fn dope_table(
    rifle: &RifleProfile,
    start_yards: f64,
    end_yards: f64,
    step_yards: f64,
    environment: &Environment,
) -> Result<Vec<BallisticSolution>, BallisticsError> {
    rifle.validate()?;

    if !step_yards.is_finite() || step_yards <= 0.0 {
        return Err(format!("Table step must be positive, got {step_yards}").into());
    }
    if !start_yards.is_finite() || !end_yards.is_finite() || start_yards < 0.0 {
        return Err("Table range must be finite and non-negative".into());
    }
    if start_yards > end_yards {
        return Err(format!("Table start {start_yards} is beyond end {end_yards}").into());
    }

    let intervals = ((end_yards - start_yards) / step_yards).floor();
    if intervals >= MAX_TABLE_ROWS as f64 {
        return Err(format!(
            "Table of {start_yards}-{end_yards} yd every {step_yards} yd exceeds {MAX_TABLE_ROWS} rows"
        )
        .into());
    }
    let rows = (intervals as usize)
        .checked_add(1)
        .ok_or("Table row count overflowed")?;

    Ok((0..rows)
        .into_par_iter()
        .map(|i| {
            let distance = start_yards + i as f64 * step_yards;
            solve(rifle, distance, 0.0, &[], environment)
        })
        .collect())
}
