//! # Ballistics Trainer
//!
//! Point-mass exterior ballistics for long-range hold-calling practice: drop,
//! time of flight, retained velocity/energy and wind drift for a rifle
//! profile, a distance, an angle of fire, an environment and a set of wind
//! samples along the path.
//!
//! Every solver entry point is a pure function of its inputs. There is no
//! shared mutable state, so solutions can be computed from any thread.

// Re-export the main types and functions
pub use drag_model::DragModel;
pub use drag::{drag_coefficient, DragTable};
pub use trajectory_solver::{integrate, TrajectoryPoint};
pub use atmosphere::{air_density_ratio, Environment};
pub use angle_calculations::{
    angle_to_inches, inches_to_angle, mils_to_moa, moa_to_mils, true_ballistic_range, AngleUnit,
};
pub use wind::{crosswind_component, WindVector};
pub use profiles::{default_rifles, rifle_by_name, RifleProfile, TwistDirection};
pub use cli_api::{dope_table, solve, solve_checked, BallisticSolution, BallisticsError};
pub use scenario::{generate_scenario, Scenario, ScenarioOptions, Target};
pub use drill::{evaluate_shot, DrillConfig, DrillSession, HoldInput, ShotResult};

// Module declarations
mod drag_model;
pub mod cli_api;
pub mod constants;
pub mod drag;
pub mod trajectory_solver;
pub mod atmosphere;
pub mod angle_calculations;
pub mod wind;
pub mod profiles;
pub mod scenario;
pub mod drill;
