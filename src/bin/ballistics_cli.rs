use ballistics_trainer::drill::evaluate_shot;
use ballistics_trainer::scenario::{format_distance, format_wind, target_type_by_id, TARGET_TYPES};
use ballistics_trainer::{
    default_rifles, dope_table, generate_scenario, rifle_by_name, solve_checked, AngleUnit,
    BallisticSolution, DragModel, Environment, HoldInput, RifleProfile, ScenarioOptions, Target,
    WindVector,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

const DEFAULT_RIFLE: &str = "6.5 Creedmoor (140gr)";

#[derive(Parser)]
#[command(name = "ballistics-cli")]
#[command(version = "0.1.0")]
#[command(about = "Point-mass ballistics solver for hold-calling practice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single shot
    Solve {
        #[command(flatten)]
        rifle: RifleArgs,

        /// Line-of-sight distance (yards)
        #[arg(short = 'd', long)]
        distance: f64,

        /// Angle of fire (degrees, positive = uphill)
        #[arg(short = 'a', long, default_value = "0.0", allow_hyphen_values = true)]
        angle: f64,

        /// Wind sample as DISTANCE:SPEED:CLOCK (yards, mph, 1-12); repeatable
        #[arg(short = 'w', long = "wind", value_parser = parse_wind)]
        winds: Vec<WindVector>,

        #[command(flatten)]
        environment: EnvironmentArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print a flat-fire, no-wind drop table
    Table {
        #[command(flatten)]
        rifle: RifleArgs,

        /// First distance (yards)
        #[arg(long, default_value = "100")]
        start: f64,

        /// Last distance (yards)
        #[arg(long, default_value = "1000")]
        end: f64,

        /// Distance step (yards)
        #[arg(long, default_value = "100")]
        step: f64,

        #[command(flatten)]
        environment: EnvironmentArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Generate a random practice scenario and its solution
    Scenario {
        #[command(flatten)]
        rifle: RifleArgs,

        /// Scenario style
        #[arg(short = 'm', long, default_value = "standard")]
        mode: ScenarioMode,

        /// Seed for a reproducible scenario
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Evaluate a hold against a target
    Shot {
        #[command(flatten)]
        rifle: RifleArgs,

        /// Line-of-sight distance (yards)
        #[arg(short = 'd', long)]
        distance: f64,

        /// Target type id (see `rifles --targets`)
        #[arg(short = 't', long, default_value = "ipsc-full")]
        target: String,

        /// Elevation hold (positive = up)
        #[arg(short = 'e', long, allow_hyphen_values = true)]
        elevation: f64,

        /// Windage hold (positive = right)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        windage: f64,

        /// Unit of the holds
        #[arg(short = 'u', long, default_value = "mil")]
        unit: UnitArg,

        /// Angle of fire (degrees, positive = uphill)
        #[arg(short = 'a', long, default_value = "0.0", allow_hyphen_values = true)]
        angle: f64,

        /// Wind sample as DISTANCE:SPEED:CLOCK (yards, mph, 1-12); repeatable
        #[arg(short = 'w', long = "wind", value_parser = parse_wind)]
        winds: Vec<WindVector>,

        #[command(flatten)]
        environment: EnvironmentArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// List built-in rifle profiles
    Rifles {
        /// List target types instead
        #[arg(long)]
        targets: bool,
    },

    /// Display solver information
    Info,
}

#[derive(Args, Debug)]
struct RifleArgs {
    /// Built-in rifle profile name
    #[arg(short = 'r', long)]
    rifle: Option<String>,

    /// Load the rifle profile from a JSON file
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Override ballistic coefficient
    #[arg(short = 'b', long)]
    bc: Option<f64>,

    /// Override drag model (g1, g7)
    #[arg(long)]
    drag_model: Option<String>,

    /// Override muzzle velocity (ft/s)
    #[arg(short = 'v', long)]
    velocity: Option<f64>,

    /// Override bullet mass (grains)
    #[arg(long)]
    mass: Option<f64>,

    /// Override zero distance (yards)
    #[arg(short = 'z', long)]
    zero: Option<f64>,
}

#[derive(Args, Debug)]
struct EnvironmentArgs {
    /// Temperature (°F)
    #[arg(long, default_value = "70.0", allow_hyphen_values = true)]
    temperature: f64,

    /// Station pressure (inHg)
    #[arg(long, default_value = "29.92")]
    pressure: f64,

    /// Altitude (ft)
    #[arg(long, default_value = "1000.0")]
    altitude: f64,

    /// Relative humidity (percentage 0-100)
    #[arg(long, default_value = "50.0")]
    humidity: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioMode {
    Standard,
    Ranging,
    Wind,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Mil,
    Moa,
}

impl From<UnitArg> for AngleUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Mil => AngleUnit::Mil,
            UnitArg::Moa => AngleUnit::Moa,
        }
    }
}

impl EnvironmentArgs {
    fn to_environment(&self) -> Environment {
        Environment {
            temperature_f: self.temperature,
            pressure_inhg: self.pressure,
            altitude_ft: self.altitude,
            humidity_percent: self.humidity,
        }
    }
}

impl RifleArgs {
    fn resolve(&self) -> Result<RifleProfile, Box<dyn Error>> {
        let mut rifle = if let Some(path) = &self.profile {
            RifleProfile::from_json_file(path)?
        } else {
            let name = self.rifle.as_deref().unwrap_or(DEFAULT_RIFLE);
            match rifle_by_name(name) {
                Some(rifle) => rifle,
                None => {
                    eprintln!("Unknown rifle profile: {}. Using {}.", name, DEFAULT_RIFLE);
                    rifle_by_name(DEFAULT_RIFLE).ok_or("Built-in rifle profiles are missing")?
                }
            }
        };

        if let Some(bc) = self.bc {
            rifle.ballistic_coefficient = bc;
        }
        if let Some(model) = &self.drag_model {
            rifle.drag_model = DragModel::from_str(model).unwrap_or_else(|| {
                eprintln!("Invalid drag model: {}. Using G1.", model);
                DragModel::G1
            });
        }
        if let Some(velocity) = self.velocity {
            rifle.muzzle_velocity_fps = velocity;
        }
        if let Some(mass) = self.mass {
            rifle.bullet_mass_grains = mass;
        }
        if let Some(zero) = self.zero {
            rifle.zero_distance_yards = zero;
        }

        rifle.validate()?;
        Ok(rifle)
    }
}

fn parse_wind(s: &str) -> Result<WindVector, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("expected DISTANCE:SPEED:CLOCK, got '{s}'"));
    }
    let distance = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid wind distance '{}': {e}", parts[0]))?;
    let speed = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid wind speed '{}': {e}", parts[1]))?;
    let clock = parts[2]
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid clock position '{}': {e}", parts[2]))?;
    Ok(WindVector::new(distance, speed, clock))
}

#[derive(Serialize)]
struct ScenarioOutput<'a> {
    rifle: &'a RifleProfile,
    scenario: &'a ballistics_trainer::Scenario,
    solution: &'a BallisticSolution,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { rifle, distance, angle, winds, environment, output } => {
            let rifle = rifle.resolve()?;
            let solution = solve_checked(&rifle, distance, angle, &winds, &environment.to_environment())?;
            display_solution(&rifle, &solution, output)?;
        },

        Commands::Table { rifle, start, end, step, environment, output } => {
            let rifle = rifle.resolve()?;
            let rows = dope_table(&rifle, start, end, step, &environment.to_environment())?;
            display_table(&rifle, &rows, output)?;
        },

        Commands::Scenario { rifle, mode, seed, output } => {
            let rifle = rifle.resolve()?;
            let options = match mode {
                ScenarioMode::Standard => ScenarioOptions::default(),
                ScenarioMode::Ranging => ScenarioOptions::ranging(),
                ScenarioMode::Wind => ScenarioOptions::wind_calling(),
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let scenario = generate_scenario(&mut rng, &options)?;
            let solution = scenario.solve(&rifle);

            match output {
                OutputFormat::Json => {
                    let out = ScenarioOutput { rifle: &rifle, scenario: &scenario, solution: &solution };
                    println!("{}", serde_json::to_string_pretty(&out)?);
                },
                OutputFormat::Csv => display_solution(&rifle, &solution, output)?,
                OutputFormat::Table => {
                    println!("Target:   {} ({}\" x {}\")", scenario.target.name,
                        scenario.target.width_inches, scenario.target.height_inches);
                    println!("Distance: {}", format_distance(scenario.target.distance_yards, scenario.distance_known));
                    println!("Angle:    {:+.0}°", scenario.angle_of_fire_degrees);
                    for wind in &scenario.winds {
                        println!("Wind:     {} at {:.0} yd", format_wind(wind), wind.distance_yards);
                    }
                    println!();
                    display_solution(&rifle, &solution, output)?;
                },
            }
        },

        Commands::Shot {
            rifle, distance, target, elevation, windage, unit, angle, winds, environment, output
        } => {
            let rifle = rifle.resolve()?;
            let target_type = target_type_by_id(&target)
                .ok_or_else(|| format!("Unknown target type: {target}"))?;
            let target = Target::new(target_type, distance);
            let solution = solve_checked(&rifle, distance, angle, &winds, &environment.to_environment())?;
            let hold = HoldInput {
                elevation_value: elevation,
                elevation_unit: unit.into(),
                windage_value: windage,
                windage_unit: unit.into(),
            };
            let shot = evaluate_shot(&solution, &hold, &target);

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shot)?),
                OutputFormat::Csv => {
                    println!("hit,impact_x_in,impact_y_in,impact_x_mil,impact_y_mil,correct_elevation_mil,correct_windage_mil");
                    let (e, w) = shot.correct_hold_mils();
                    println!("{},{:.2},{:.2},{:.3},{:.3},{:.3},{:.3}", shot.is_hit,
                        shot.impact_offset_x_inches, shot.impact_offset_y_inches,
                        shot.impact_offset_x_mils, shot.impact_offset_y_mils, e, w);
                },
                OutputFormat::Table => {
                    let (e, w) = shot.correct_hold_mils();
                    let vertical = if shot.impact_offset_y_inches > 0.0 { "high" } else { "low" };
                    let horizontal = if shot.impact_offset_x_inches > 0.0 { "right" } else { "left" };
                    println!("{}", if shot.is_hit { "HIT" } else { "MISS" });
                    println!("Impact:  {:.1}\" {}, {:.1}\" {}",
                        shot.impact_offset_y_inches.abs(), vertical,
                        shot.impact_offset_x_inches.abs(), horizontal);
                    println!("Correct: E {:.1} / W {:.1} mil", e, w);
                },
            }
        },

        Commands::Rifles { targets } => {
            if targets {
                println!("{:<18} {:<18} {:>6} {:>6}", "ID", "NAME", "W(in)", "H(in)");
                for t in TARGET_TYPES {
                    println!("{:<18} {:<18} {:>6.0} {:>6.0}", t.id, t.name, t.width_inches, t.height_inches);
                }
            } else {
                println!("{:<24} {:>5} {:>6} {:>9} {:>7} {:>8}", "NAME", "MODEL", "BC", "MV(fps)", "MASS", "ZERO(yd)");
                for r in default_rifles() {
                    println!("{:<24} {:>5} {:>6.3} {:>9.0} {:>7.0} {:>8.0}", r.name, r.drag_model.to_string(),
                        r.ballistic_coefficient, r.muzzle_velocity_fps, r.bullet_mass_grains, r.zero_distance_yards);
                }
            }
        },

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      BALLISTICS TRAINER v0.1.0         ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Point-mass exterior ballistics for     ║");
            println!("║ hold-calling practice.                 ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • G1/G7 drag tables                    ║");
            println!("║ • Scope zero compensation              ║");
            println!("║ • Multi-point wind drift               ║");
            println!("║ • Scenarios and hold scoring           ║");
            println!("╚════════════════════════════════════════╝");
        },
    }

    Ok(())
}

fn display_solution(rifle: &RifleProfile, s: &BallisticSolution, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(s)?);
        },

        OutputFormat::Csv => {
            print_csv_header();
            print_csv_row(s);
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         BALLISTIC SOLUTION             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Rifle: {:<31} ║", truncate(&rifle.name, 31));
            println!("║ Distance:          {:>8.0} yd         ║", s.distance_yards);
            println!("║ Drop:              {:>8.2} in         ║", s.drop_inches);
            println!("║                    {:>8.2} mil        ║", s.drop_mils);
            println!("║                    {:>8.2} MOA        ║", s.drop_moa);
            println!("║ Wind Drift:        {:>8.2} in         ║", s.wind_drift_inches);
            println!("║                    {:>8.2} mil        ║", s.wind_drift_mils);
            println!("║                    {:>8.2} MOA        ║", s.wind_drift_moa);
            println!("║ Time of Flight:    {:>8.3} s          ║", s.time_of_flight_s);
            println!("║ Velocity:          {:>8.0} ft/s       ║", s.velocity_fps);
            println!("║ Energy:            {:>8.0} ft·lbs     ║", s.energy_ftlbs);
            println!("╚════════════════════════════════════════╝");
        },
    }

    Ok(())
}

fn display_table(rifle: &RifleProfile, rows: &[BallisticSolution], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        },

        OutputFormat::Csv => {
            print_csv_header();
            for row in rows {
                print_csv_row(row);
            }
        },

        OutputFormat::Table => {
            let name = if rifle.name.is_empty() { "Custom profile" } else { rifle.name.as_str() };
            println!("{} ({} {:.3}, {:.0} fps, {:.0} yd zero)", name, rifle.drag_model,
                rifle.ballistic_coefficient, rifle.muzzle_velocity_fps, rifle.zero_distance_yards);
            println!("┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐");
            println!("│ Range yd │ Drop in  │ Drop mil │ Drop MOA │ TOF (s)  │ Vel fps  │");
            println!("├──────────┼──────────┼──────────┼──────────┼──────────┼──────────┤");
            for r in rows {
                println!("│ {:>8.0} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.3} │ {:>8.0} │",
                    r.distance_yards, r.drop_inches, r.drop_mils, r.drop_moa,
                    r.time_of_flight_s, r.velocity_fps);
            }
            println!("└──────────┴──────────┴──────────┴──────────┴──────────┴──────────┘");
        },
    }

    Ok(())
}

fn print_csv_header() {
    println!("distance_yd,drop_in,drop_mil,drop_moa,drift_in,drift_mil,drift_moa,tof_s,velocity_fps,energy_ftlbs");
}

fn print_csv_row(s: &BallisticSolution) {
    println!("{:.1},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{:.4},{:.1},{:.1}",
        s.distance_yards, s.drop_inches, s.drop_mils, s.drop_moa,
        s.wind_drift_inches, s.wind_drift_mils, s.wind_drift_moa,
        s.time_of_flight_s, s.velocity_fps, s.energy_ftlbs);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
