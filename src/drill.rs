//! Hold evaluation and timed hold-calling drills.
//!
//! Everything here is plain data owned by the caller. Clocks, timers and
//! input handling belong to whatever front end drives a session; it reports
//! elapsed times back in milliseconds.

use crate::angle_calculations::{angle_to_inches, inches_to_angle, AngleUnit};
use crate::atmosphere::Environment;
use crate::cli_api::{solve, BallisticSolution, BallisticsError};
use crate::constants::INCHES_PER_YARD;
use crate::profiles::RifleProfile;
use crate::scenario::{random_clock, random_distance, Target, TARGET_TYPES};
use crate::wind::WindVector;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Angular size in mils of a linear size at a distance
pub fn subtension_mils(size_inches: f64, distance_yards: f64) -> f64 {
    if distance_yards <= 0.0 {
        return 0.0;
    }
    size_inches / (distance_yards * INCHES_PER_YARD) * 1000.0
}

/// Scope hold entered by the shooter
///
/// Positive elevation aims higher, positive windage aims right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldInput {
    pub elevation_value: f64,
    pub elevation_unit: AngleUnit,
    pub windage_value: f64,
    pub windage_unit: AngleUnit,
}

impl HoldInput {
    pub fn mils(elevation: f64, windage: f64) -> Self {
        Self {
            elevation_value: elevation,
            elevation_unit: AngleUnit::Mil,
            windage_value: windage,
            windage_unit: AngleUnit::Mil,
        }
    }
}

/// Where a shot landed relative to the point of aim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub hold: HoldInput,
    pub solution: BallisticSolution,
    /// Positive = right
    pub impact_offset_x_inches: f64,
    /// Positive = high
    pub impact_offset_y_inches: f64,
    pub impact_offset_x_mils: f64,
    pub impact_offset_y_mils: f64,
    pub is_hit: bool,
    pub range_actual_yards: f64,
}

impl ShotResult {
    /// Hold the shooter should have used, in mils (elevation, windage)
    pub fn correct_hold_mils(&self) -> (f64, f64) {
        (-self.solution.drop_mils, self.solution.wind_drift_mils)
    }
}

/// Evaluate a hold against the true solution for a target.
///
/// Elevation hold raises the impact by its subtension; windage hold moves it
/// against the drift. A hit is strictly inside half the target's width and
/// height.
pub fn evaluate_shot(solution: &BallisticSolution, hold: &HoldInput, target: &Target) -> ShotResult {
    let distance = target.distance_yards;

    let hold_elevation_inches = angle_to_inches(hold.elevation_value, hold.elevation_unit, distance);
    let hold_windage_inches = angle_to_inches(hold.windage_value, hold.windage_unit, distance);

    let impact_y = solution.drop_inches + hold_elevation_inches;
    let impact_x = solution.wind_drift_inches - hold_windage_inches;

    let impact_x_mils = inches_to_angle(impact_x, AngleUnit::Mil, distance);
    let impact_y_mils = inches_to_angle(impact_y, AngleUnit::Mil, distance);

    let half_width = subtension_mils(target.width_inches, distance) / 2.0;
    let half_height = subtension_mils(target.height_inches, distance) / 2.0;

    ShotResult {
        hold: *hold,
        solution: *solution,
        impact_offset_x_inches: impact_x,
        impact_offset_y_inches: impact_y,
        impact_offset_x_mils: impact_x_mils,
        impact_offset_y_mils: impact_y_mils,
        is_hit: impact_x_mils.abs() < half_width && impact_y_mils.abs() < half_height,
        range_actual_yards: distance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    pub total_rounds: usize,
    /// Time the target is shown before answers open
    pub hop_time_ms: u64,
    pub answer_time_ms: u64,
    pub min_distance_yards: f64,
    pub max_distance_yards: f64,
    pub max_wind_speed_mph: f64,
    pub wind_enabled: bool,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            total_rounds: 10,
            hop_time_ms: 3000,
            answer_time_ms: 7000,
            min_distance_yards: 200.0,
            max_distance_yards: 1500.0,
            max_wind_speed_mph: 15.0,
            wind_enabled: true,
        }
    }
}

impl DrillConfig {
    pub fn validate(&self) -> Result<(), BallisticsError> {
        if self.total_rounds == 0 {
            return Err("A drill needs at least one round".into());
        }
        if !(self.min_distance_yards > 0.0 && self.min_distance_yards <= self.max_distance_yards)
            || !self.max_distance_yards.is_finite()
        {
            return Err(format!(
                "Invalid drill distance range {}-{} yd",
                self.min_distance_yards, self.max_distance_yards
            )
            .into());
        }
        if !self.max_wind_speed_mph.is_finite() || self.max_wind_speed_mph < 0.0 {
            return Err("Drill wind speed must be non-negative".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillRound {
    pub target: Target,
    pub wind: WindVector,
    /// Mils up
    pub correct_elevation: f64,
    /// Mils right
    pub correct_windage: f64,
    pub tolerance_elevation: f64,
    pub tolerance_windage: f64,
    pub user_elevation: Option<f64>,
    pub user_windage: Option<f64>,
    pub response_time_ms: Option<u64>,
    pub elevation_hit: Option<bool>,
    pub windage_hit: Option<bool>,
    pub is_hit: Option<bool>,
    pub timed_out: bool,
}

impl DrillRound {
    pub fn is_answered(&self) -> bool {
        self.is_hit.is_some()
    }
}

/// Build one round: random target and distance, one mid-range wind sample,
/// flat fire on a range day.
pub fn generate_round<R: Rng + ?Sized>(
    rng: &mut R,
    rifle: &RifleProfile,
    config: &DrillConfig,
) -> Result<DrillRound, BallisticsError> {
    config.validate()?;

    let target_type = &TARGET_TYPES[rng.gen_range(0..TARGET_TYPES.len())];
    let distance = random_distance(rng, config.min_distance_yards, config.max_distance_yards);

    let wind = if config.wind_enabled {
        let speed = rng.gen_range(0.0..=config.max_wind_speed_mph);
        WindVector::new(distance / 2.0, speed, random_clock(rng))
    } else {
        WindVector::new(distance / 2.0, 0.0, 12)
    };

    let solution = solve(rifle, distance, 0.0, &[wind], &Environment::range_day());
    let target = Target::new(target_type, distance);

    Ok(DrillRound {
        correct_elevation: -solution.drop_mils,
        correct_windage: if config.wind_enabled { solution.wind_drift_mils } else { 0.0 },
        tolerance_elevation: subtension_mils(target.height_inches, distance) / 2.0,
        tolerance_windage: subtension_mils(target.width_inches, distance) / 2.0,
        target,
        wind,
        user_elevation: None,
        user_windage: None,
        response_time_ms: None,
        elevation_hit: None,
        windage_hit: None,
        is_hit: None,
        timed_out: false,
    })
}

/// End-of-session statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrillSummary {
    pub hits: usize,
    pub total_rounds: usize,
    /// Mean over answered rounds that did not time out
    pub average_time_ms: Option<f64>,
    /// Fastest hit
    pub best_time_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillSession {
    pub rifle: RifleProfile,
    pub config: DrillConfig,
    pub rounds: Vec<DrillRound>,
    pub current_round: usize,
}

impl DrillSession {
    /// Generate every round up front.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        rifle: RifleProfile,
        config: DrillConfig,
    ) -> Result<Self, BallisticsError> {
        rifle.validate()?;
        config.validate()?;

        let rounds = (0..config.total_rounds)
            .map(|_| generate_round(rng, &rifle, &config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rifle,
            config,
            rounds,
            current_round: 0,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.current_round >= self.rounds.len()
    }

    pub fn current(&self) -> Option<&DrillRound> {
        self.rounds.get(self.current_round)
    }

    fn current_mut(&mut self) -> Result<&mut DrillRound, BallisticsError> {
        let index = self.current_round;
        let round = self
            .rounds
            .get_mut(index)
            .ok_or_else(|| BallisticsError::from("Drill is already complete"))?;
        if round.is_answered() {
            return Err(format!("Round {} was already answered", index + 1).into());
        }
        Ok(round)
    }

    /// Score an answer for the current round.
    ///
    /// Windage is combined right-minus-left by the caller. When wind is off
    /// the windage axis always passes.
    pub fn submit_answer(
        &mut self,
        elevation_mils: f64,
        windage_mils: f64,
        response_time_ms: u64,
    ) -> Result<&DrillRound, BallisticsError> {
        if !elevation_mils.is_finite() || !windage_mils.is_finite() {
            return Err("Answer must be a number".into());
        }
        let wind_enabled = self.config.wind_enabled;
        let round = self.current_mut()?;

        let elevation_hit = (elevation_mils - round.correct_elevation).abs() <= round.tolerance_elevation;
        let windage_hit = if wind_enabled {
            (windage_mils - round.correct_windage).abs() <= round.tolerance_windage
        } else {
            true
        };

        round.user_elevation = Some(elevation_mils);
        round.user_windage = Some(if wind_enabled { windage_mils } else { 0.0 });
        round.response_time_ms = Some(response_time_ms);
        round.elevation_hit = Some(elevation_hit);
        round.windage_hit = Some(windage_hit);
        round.is_hit = Some(elevation_hit && windage_hit);
        Ok(&*round)
    }

    /// Mark the current round missed because the answer window closed.
    pub fn time_out(&mut self) -> Result<&DrillRound, BallisticsError> {
        let answer_time = self.config.answer_time_ms;
        let round = self.current_mut()?;
        round.timed_out = true;
        round.elevation_hit = Some(false);
        round.windage_hit = Some(false);
        round.is_hit = Some(false);
        round.response_time_ms = Some(answer_time);
        Ok(&*round)
    }

    /// Move to the next round once the current one is scored.
    pub fn advance(&mut self) -> Result<(), BallisticsError> {
        match self.current() {
            Some(round) if round.is_answered() => {
                self.current_round += 1;
                Ok(())
            }
            Some(_) => Err("Current round has not been answered".into()),
            None => Err("Drill is already complete".into()),
        }
    }

    pub fn hit_count(&self) -> usize {
        self.rounds.iter().filter(|r| r.is_hit == Some(true)).count()
    }

    pub fn summary(&self) -> DrillSummary {
        let answered: Vec<&DrillRound> = self
            .rounds
            .iter()
            .filter(|r| r.response_time_ms.is_some() && !r.timed_out)
            .collect();

        let average_time_ms = if answered.is_empty() {
            None
        } else {
            let total: u64 = answered.iter().filter_map(|r| r.response_time_ms).sum();
            Some(total as f64 / answered.len() as f64)
        };

        let best_time_ms = answered
            .iter()
            .filter(|r| r.is_hit == Some(true))
            .filter_map(|r| r.response_time_ms)
            .min();

        DrillSummary {
            hits: self.hit_count(),
            total_rounds: self.rounds.len(),
            average_time_ms,
            best_time_ms,
        }
    }
}
