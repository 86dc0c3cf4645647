//! Random shooting scenarios for practice.
//!
//! Generation takes any [`rand::Rng`], so a seeded generator replays the
//! same scenario sequence.

use crate::atmosphere::Environment;
use crate::cli_api::{solve, BallisticSolution, BallisticsError};
use crate::profiles::RifleProfile;
use crate::wind::WindVector;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Distances are rounded to this many yards
const DISTANCE_ROUNDING_YARDS: f64 = 25.0;

/// Wind speed may vary this much (fraction of base speed) between samples
const WIND_VARIANCE_FRACTION: f64 = 0.3;

/// Wind samples at these fractions of the target distance
const WIND_SAMPLE_FRACTIONS: [f64; 3] = [0.0, 0.5, 0.8];

const ANGLED_SHOT_PROBABILITY: f64 = 0.4;
const MAX_ANGLE_DEGREES: f64 = 25.0;

/// Target shape with its size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetType {
    pub id: &'static str,
    pub name: &'static str,
    pub width_inches: f64,
    pub height_inches: f64,
}

pub const TARGET_TYPES: &[TargetType] = &[
    TargetType { id: "ipsc-full", name: "IPSC Full", width_inches: 18.0, height_inches: 30.0 },
    TargetType { id: "ipsc-half", name: "IPSC Half", width_inches: 9.0, height_inches: 15.0 },
    TargetType { id: "ipsc-head", name: "IPSC Head", width_inches: 6.0, height_inches: 8.0 },
    TargetType { id: "human-silhouette", name: "Human Silhouette", width_inches: 18.0, height_inches: 40.0 },
    TargetType { id: "deer", name: "Deer (Vitals)", width_inches: 16.0, height_inches: 16.0 },
    TargetType { id: "bear", name: "Bear (Vitals)", width_inches: 20.0, height_inches: 24.0 },
    TargetType { id: "vehicle-tire", name: "Vehicle Tire", width_inches: 26.0, height_inches: 26.0 },
    TargetType { id: "steel-8inch", name: "8\" Steel", width_inches: 8.0, height_inches: 8.0 },
    TargetType { id: "steel-12inch", name: "12\" Steel", width_inches: 12.0, height_inches: 12.0 },
];

pub fn target_type_by_id(id: &str) -> Option<&'static TargetType> {
    TARGET_TYPES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

/// Target placed at a distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub width_inches: f64,
    pub height_inches: f64,
    pub distance_yards: f64,
}

impl Target {
    pub fn new(target_type: &TargetType, distance_yards: f64) -> Self {
        Self {
            name: target_type.name.to_string(),
            width_inches: target_type.width_inches,
            height_inches: target_type.height_inches,
            distance_yards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub target: Target,
    /// Positive = uphill
    pub angle_of_fire_degrees: f64,
    pub winds: Vec<WindVector>,
    pub environment: Environment,
    pub distance_known: bool,
}

impl Scenario {
    pub fn solve(&self, rifle: &RifleProfile) -> BallisticSolution {
        solve(
            rifle,
            self.target.distance_yards,
            self.angle_of_fire_degrees,
            &self.winds,
            &self.environment,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOptions {
    pub min_distance_yards: f64,
    pub max_distance_yards: f64,
    pub distance_known: bool,
    pub max_wind_speed_mph: f64,
    pub allow_angles: bool,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            min_distance_yards: 200.0,
            max_distance_yards: 1000.0,
            distance_known: false,
            max_wind_speed_mph: 15.0,
            allow_angles: true,
        }
    }
}

impl ScenarioOptions {
    /// Range estimation practice: distance hidden, light wind, flat shots
    pub fn ranging() -> Self {
        Self {
            min_distance_yards: 300.0,
            max_distance_yards: 800.0,
            distance_known: false,
            max_wind_speed_mph: 5.0,
            allow_angles: false,
        }
    }

    /// Wind calling practice: distance given, strong wind, flat shots
    pub fn wind_calling() -> Self {
        Self {
            min_distance_yards: 400.0,
            max_distance_yards: 600.0,
            distance_known: true,
            max_wind_speed_mph: 20.0,
            allow_angles: false,
        }
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        if !self.min_distance_yards.is_finite()
            || !self.max_distance_yards.is_finite()
            || self.min_distance_yards <= 0.0
        {
            return Err("Scenario distances must be finite and positive".into());
        }
        if self.min_distance_yards > self.max_distance_yards {
            return Err(format!(
                "Minimum distance {} exceeds maximum {}",
                self.min_distance_yards, self.max_distance_yards
            )
            .into());
        }
        if !self.max_wind_speed_mph.is_finite() || self.max_wind_speed_mph < 0.0 {
            return Err(format!(
                "Maximum wind speed must be non-negative, got {}",
                self.max_wind_speed_mph
            )
            .into());
        }
        Ok(())
    }
}

/// Uniform draw in `[min, max]` rounded to the nearest 25 yd.
pub(crate) fn random_distance<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    let raw = rng.gen_range(min..=max);
    (raw / DISTANCE_ROUNDING_YARDS).round() * DISTANCE_ROUNDING_YARDS
}

pub(crate) fn random_clock<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=12)
}

fn generate_wind<R: Rng + ?Sized>(
    rng: &mut R,
    distance_yards: f64,
    base_speed_mph: f64,
    variance_mph: f64,
) -> WindVector {
    let speed = base_speed_mph + rng.gen_range(-variance_mph..=variance_mph);
    WindVector::new(distance_yards, speed.max(0.0), random_clock(rng))
}

pub fn generate_scenario<R: Rng + ?Sized>(
    rng: &mut R,
    options: &ScenarioOptions,
) -> Result<Scenario, BallisticsError> {
    options.validate()?;

    let target_type = &TARGET_TYPES[rng.gen_range(0..TARGET_TYPES.len())];
    let distance = random_distance(rng, options.min_distance_yards, options.max_distance_yards);

    let base_speed = rng.gen_range(0.0..=options.max_wind_speed_mph);
    let variance = base_speed * WIND_VARIANCE_FRACTION;
    let winds = WIND_SAMPLE_FRACTIONS
        .iter()
        .map(|fraction| generate_wind(rng, distance * fraction, base_speed, variance))
        .collect();

    let angle = if options.allow_angles && rng.gen_bool(ANGLED_SHOT_PROBABILITY) {
        rng.gen_range(-MAX_ANGLE_DEGREES..=MAX_ANGLE_DEGREES).round()
    } else {
        0.0
    };

    Ok(Scenario {
        target: Target::new(target_type, distance),
        angle_of_fire_degrees: angle,
        winds,
        environment: Environment::range_day(),
        distance_known: options.distance_known,
    })
}

pub fn format_wind(wind: &WindVector) -> String {
    format!("{:.0} mph @ {} o'clock", wind.speed_mph, wind.direction_clock)
}

pub fn format_distance(distance_yards: f64, known: bool) -> String {
    if known {
        format!("{distance_yards} yards")
    } else {
        "Unknown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::default_rifles;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_scenarios_respect_options() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = ScenarioOptions::default();
        for _ in 0..200 {
            let scenario = generate_scenario(&mut rng, &options).unwrap();
            let d = scenario.target.distance_yards;
            assert!((200.0..=1000.0).contains(&d));
            assert_eq!(d % 25.0, 0.0);
            assert!(scenario.angle_of_fire_degrees.abs() <= 25.0);
            assert_eq!(scenario.angle_of_fire_degrees.fract(), 0.0);
            assert_eq!(scenario.winds.len(), 3);
            for wind in &scenario.winds {
                assert!(wind.validate(d).is_ok());
                // base at most 15 plus 30% variance
                assert!(wind.speed_mph <= 15.0 * 1.3 + 1e-9);
            }
            assert_eq!(scenario.winds[0].distance_yards, 0.0);
            assert_eq!(scenario.winds[1].distance_yards, d * 0.5);
            assert_eq!(scenario.winds[2].distance_yards, d * 0.8);
        }
    }

    #[test]
    fn test_presets_disable_angles() {
        let mut rng = StdRng::seed_from_u64(11);
        for options in [ScenarioOptions::ranging(), ScenarioOptions::wind_calling()] {
            for _ in 0..100 {
                let scenario = generate_scenario(&mut rng, &options).unwrap();
                assert_eq!(scenario.angle_of_fire_degrees, 0.0);
                assert_eq!(scenario.distance_known, options.distance_known);
                assert!(scenario.target.distance_yards >= options.min_distance_yards);
                assert!(scenario.target.distance_yards <= options.max_distance_yards);
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let options = ScenarioOptions::default();
        let a = generate_scenario(&mut StdRng::seed_from_u64(42), &options).unwrap();
        let b = generate_scenario(&mut StdRng::seed_from_u64(42), &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_calm_day_has_no_wind() {
        let options = ScenarioOptions { max_wind_speed_mph: 0.0, ..ScenarioOptions::default() };
        let mut rng = StdRng::seed_from_u64(3);
        let scenario = generate_scenario(&mut rng, &options).unwrap();
        assert!(scenario.winds.iter().all(|w| w.speed_mph == 0.0));
        let solution = scenario.solve(&default_rifles()[0]);
        assert_eq!(solution.wind_drift_inches, 0.0);
    }

    #[test]
    fn test_invalid_options() {
        let mut rng = StdRng::seed_from_u64(1);
        let inverted = ScenarioOptions {
            min_distance_yards: 900.0,
            max_distance_yards: 300.0,
            ..ScenarioOptions::default()
        };
        assert!(generate_scenario(&mut rng, &inverted).is_err());

        let negative_wind = ScenarioOptions { max_wind_speed_mph: -1.0, ..ScenarioOptions::default() };
        assert!(generate_scenario(&mut rng, &negative_wind).is_err());
    }

    #[test]
    fn test_target_lookup() {
        let steel = target_type_by_id("STEEL-12INCH").unwrap();
        assert_eq!(steel.width_inches, 12.0);
        assert!(target_type_by_id("barn-door").is_none());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_wind(&WindVector::new(0.0, 7.6, 3)), "8 mph @ 3 o'clock");
        assert_eq!(format_wind(&WindVector::new(0.0, 0.0, 12)), "0 mph @ 12 o'clock");
        assert_eq!(format_distance(475.0, true), "475 yards");
        assert_eq!(format_distance(475.0, false), "Unknown");
    }
}
