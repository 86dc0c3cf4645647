use crate::cli_api::BallisticsError;
use crate::constants::{
    DEGREES_PER_CLOCK_HOUR, INCHES_PER_FOOT, WIND_DRIFT_FACTOR, WIND_WEIGHT_FALLOFF,
};
use serde::{Deserialize, Serialize};

/// Wind sample taken at a point along the bullet's path
///
/// Direction is a clock face seen from the shooter: 12 = headwind,
/// 3 = full value from the right, 6 = tailwind, 9 = full value from the left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    pub distance_yards: f64,
    pub speed_mph: f64,
    pub direction_clock: u8,
}

impl WindVector {
    pub fn new(distance_yards: f64, speed_mph: f64, direction_clock: u8) -> Self {
        Self {
            distance_yards,
            speed_mph,
            direction_clock,
        }
    }

    /// Crosswind value (mph, positive = from the right)
    pub fn crosswind_mph(&self) -> f64 {
        self.speed_mph * crosswind_component(self.direction_clock)
    }

    /// Check the sample against the distance of the shot it belongs to.
    pub fn validate(&self, target_distance_yards: f64) -> Result<(), BallisticsError> {
        if !(1..=12).contains(&self.direction_clock) {
            return Err(format!(
                "Wind direction must be a clock position 1-12, got {}",
                self.direction_clock
            )
            .into());
        }
        if !self.speed_mph.is_finite() || self.speed_mph < 0.0 {
            return Err(format!("Wind speed must be non-negative, got {}", self.speed_mph).into());
        }
        if !self.distance_yards.is_finite()
            || self.distance_yards < 0.0
            || self.distance_yards > target_distance_yards
        {
            return Err(format!(
                "Wind sample at {} yd lies outside the shot (0-{} yd)",
                self.distance_yards, target_distance_yards
            )
            .into());
        }
        Ok(())
    }
}

/// Fraction of wind speed acting across the bullet path for a clock direction.
///
/// 12 and 6 give 0, 3 gives +1, 9 gives -1.
pub fn crosswind_component(direction_clock: u8) -> f64 {
    let degrees = (f64::from(direction_clock) - 12.0) * DEGREES_PER_CLOCK_HOUR;
    degrees.to_radians().sin()
}

/// Weight of a sample by position: 1 at the muzzle, falling to 0.5 at
/// `range_yards`. A non-positive range weights everything equally.
pub fn wind_weight(sample_distance_yards: f64, range_yards: f64) -> f64 {
    if range_yards <= 0.0 {
        return 1.0;
    }
    1.0 - (sample_distance_yards / range_yards) * WIND_WEIGHT_FALLOFF
}

/// Effective crosswind over all samples (mph).
///
/// The weighted sum is divided by the number of samples, not by the sum of
/// the weights, so it is not a normalized average. Drift figures depend on
/// this; keep it.
pub fn aggregate_crosswind(winds: &[WindVector], range_yards: f64) -> f64 {
    if winds.is_empty() {
        return 0.0;
    }

    let total: f64 = winds
        .iter()
        .map(|w| w.crosswind_mph() * wind_weight(w.distance_yards, range_yards))
        .sum();

    total / winds.len() as f64
}

/// Lateral drift in inches for an effective crosswind and time of flight.
pub fn wind_drift_inches(average_crosswind_mph: f64, time_of_flight_s: f64) -> f64 {
    average_crosswind_mph * time_of_flight_s * INCHES_PER_FOOT * WIND_DRIFT_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crosswind_cardinal_clock_positions() {
        assert!((crosswind_component(3) - 1.0).abs() < 1e-12);
        assert!((crosswind_component(9) + 1.0).abs() < 1e-12);
        assert!(crosswind_component(12).abs() < 1e-12);
        assert!(crosswind_component(6).abs() < 1e-12);
    }

    #[test]
    fn test_crosswind_scaled_by_speed() {
        let right = WindVector::new(0.0, 10.0, 3);
        let left = WindVector::new(0.0, 10.0, 9);
        assert!((right.crosswind_mph() - 10.0).abs() < 1e-12);
        assert!((left.crosswind_mph() + 10.0).abs() < 1e-12);
        // Half value at 1 and 5 o'clock
        assert!((WindVector::new(0.0, 10.0, 1).crosswind_mph() - 5.0).abs() < 1e-9);
        assert!((WindVector::new(0.0, 10.0, 5).crosswind_mph() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_samples_no_wind() {
        assert_eq!(aggregate_crosswind(&[], 500.0), 0.0);
        assert_eq!(wind_drift_inches(0.0, 1.2), 0.0);
    }

    #[test]
    fn test_weighting_divides_by_count() {
        let winds = [WindVector::new(0.0, 10.0, 3), WindVector::new(500.0, 10.0, 3)];
        // (10 * 1.0 + 10 * 0.5) / 2, not / 1.5
        assert!((aggregate_crosswind(&winds, 500.0) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_opposing_winds_cancel() {
        let winds = [WindVector::new(200.0, 8.0, 3), WindVector::new(200.0, 8.0, 9)];
        assert!(aggregate_crosswind(&winds, 400.0).abs() < 1e-12);
    }

    #[test]
    fn test_wind_weight_degenerate_range() {
        assert_eq!(wind_weight(50.0, 0.0), 1.0);
        assert_eq!(wind_weight(0.0, 300.0), 1.0);
        assert!((wind_weight(300.0, 300.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(WindVector::new(100.0, 5.0, 3).validate(500.0).is_ok());
        assert!(WindVector::new(500.0, 0.0, 12).validate(500.0).is_ok());
        assert!(WindVector::new(100.0, 5.0, 0).validate(500.0).is_err());
        assert!(WindVector::new(100.0, 5.0, 13).validate(500.0).is_err());
        assert!(WindVector::new(100.0, -1.0, 3).validate(500.0).is_err());
        assert!(WindVector::new(600.0, 5.0, 3).validate(500.0).is_err());
        assert!(WindVector::new(-1.0, 5.0, 3).validate(500.0).is_err());
    }
}
