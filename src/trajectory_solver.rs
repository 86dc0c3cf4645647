use crate::constants::{
    FEET_PER_YARD, GRAINS_PER_POUND, GRAVITY_FPS2, INCHES_PER_FOOT, INTEGRATION_STEP_YARDS,
    MIN_HORIZONTAL_VELOCITY_FPS, RETARDATION_SCALE,
};
use crate::drag::drag_coefficient;
use crate::DragModel;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Terminal state of one flat-fire integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Vertical position relative to the line of departure (inches, negative = below)
    pub drop_inches: f64,
    pub time_of_flight_s: f64,
    pub velocity_fps: f64,
    pub energy_ftlbs: f64,
    /// Horizontal distance actually reached (yards). Short of the requested
    /// range only when the velocity floor stopped the integration.
    pub downrange_yards: f64,
}

/// Kinetic energy in ft·lbs for a bullet mass in grains
pub fn kinetic_energy_ftlbs(bullet_mass_grains: f64, velocity_fps: f64) -> f64 {
    let mass_lbs = bullet_mass_grains / GRAINS_PER_POUND;
    mass_lbs * velocity_fps * velocity_fps / (2.0 * GRAVITY_FPS2)
}

/// Integrate a point-mass trajectory out to `range_yards`.
///
/// Explicit Euler over a fixed spatial step of 0.5 yd; each iteration turns
/// the step into a time step using the current horizontal velocity. The line
/// of departure is horizontal, so vertical velocity starts at zero and the
/// caller handles the zero and angle of fire.
///
/// `ballistic_coefficient` must be positive. It is not checked here; a
/// non-positive value gives meaningless output rather than an error.
pub fn integrate(
    muzzle_velocity_fps: f64,
    ballistic_coefficient: f64,
    drag_model: DragModel,
    bullet_mass_grains: f64,
    range_yards: f64,
    air_density_ratio: f64,
) -> TrajectoryPoint {
    let range_ft = range_yards * FEET_PER_YARD;
    let step_ft = INTEGRATION_STEP_YARDS * FEET_PER_YARD;

    // x = downrange, y = vertical (ft)
    let mut position = Vector2::new(0.0_f64, 0.0_f64);
    let mut velocity = Vector2::new(muzzle_velocity_fps, 0.0_f64);
    let mut time = 0.0;

    while position.x < range_ft {
        let speed = velocity.norm();
        let cd = drag_coefficient(speed, drag_model);
        let retardation =
            (cd / ballistic_coefficient) * air_density_ratio * speed * speed / RETARDATION_SCALE;

        let dt = step_ft / velocity.x;
        let drag = velocity * (retardation / speed);

        velocity.x -= drag.x * dt;
        // Vertical drag only applies once the bullet already has vertical
        // velocity, so the first step is gravity alone. Drop tables depend
        // on this; do not make it symmetric.
        velocity.y -= GRAVITY_FPS2 * dt + if velocity.y != 0.0 { drag.y * dt } else { 0.0 };

        position += velocity * dt;
        time += dt;

        if velocity.x < MIN_HORIZONTAL_VELOCITY_FPS {
            break;
        }
    }

    let velocity_fps = velocity.norm();

    TrajectoryPoint {
        drop_inches: position.y * INCHES_PER_FOOT,
        time_of_flight_s: time,
        velocity_fps,
        energy_ftlbs: kinetic_energy_ftlbs(bullet_mass_grains, velocity_fps),
        downrange_yards: position.x / FEET_PER_YARD,
    }
}
