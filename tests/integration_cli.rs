use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn get_cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ballistics-cli"))
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(get_cli_binary())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_cli_solve_basic() {
    let output = run(&["solve", "--distance", "500"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BALLISTIC SOLUTION"), "Should contain solution table");
    assert!(stdout.contains("6.5 Creedmoor"), "Should default to the 6.5 Creedmoor profile");
}

#[test]
fn test_cli_solve_json_matches_reference() {
    let output = run(&["solve", "--distance", "500", "--output", "json"]);

    assert!(output.status.success(), "Command should succeed");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Should be JSON");
    let drop_mils = value["drop_mils"].as_f64().unwrap();
    assert!((drop_mils - (-2.5587)).abs() < 1e-3, "unexpected drop: {drop_mils}");
    assert_eq!(value["wind_drift_inches"].as_f64(), Some(0.0));
}

#[test]
fn test_cli_solve_with_wind() {
    let output = run(&[
        "solve", "-d", "500",
        "--wind", "0:10:3",
        "--wind", "250:10:3",
        "--wind", "400:10:3",
        "-o", "json",
    ]);

    assert!(output.status.success(), "Command should succeed");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let drift = value["wind_drift_inches"].as_f64().unwrap();
    assert!((drift - 25.70).abs() < 1e-2, "unexpected drift: {drift}");
}

#[test]
fn test_cli_solve_negative_angle() {
    let up = run(&["solve", "-d", "500", "--angle", "20", "-o", "json"]);
    let down = run(&["solve", "-d", "500", "--angle", "-20", "-o", "json"]);
    assert!(up.status.success() && down.status.success());
    assert_eq!(up.stdout, down.stdout);
}

#[test]
fn test_cli_rejects_bad_wind() {
    let malformed = run(&["solve", "-d", "500", "--wind", "250:10"]);
    assert!(!malformed.status.success(), "Malformed wind should fail");

    let beyond_target = run(&["solve", "-d", "500", "--wind", "600:10:3"]);
    assert!(!beyond_target.status.success(), "Wind beyond the target should fail");

    let bad_clock = run(&["solve", "-d", "500", "--wind", "100:10:13"]);
    assert!(!bad_clock.status.success(), "Clock 13 should fail");
}

#[test]
fn test_cli_rejects_invalid_bc() {
    let output = run(&["solve", "-d", "500", "--bc", "0"]);
    assert!(!output.status.success(), "Zero BC should be rejected at the boundary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ballistic coefficient"), "stderr: {stderr}");
}

#[test]
fn test_cli_table_csv() {
    let output = run(&["table", "--start", "100", "--end", "500", "--step", "100", "-o", "csv"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "header plus five rows");
    assert!(lines[0].starts_with("distance_yd,"));
    assert!(lines[1].starts_with("100.0,"));
    assert!(lines[5].starts_with("500.0,"));
}

#[test]
fn test_cli_scenario_seeded_is_reproducible() {
    let a = run(&["scenario", "--seed", "1234", "-o", "json"]);
    let b = run(&["scenario", "--seed", "1234", "-o", "json"]);

    assert!(a.status.success(), "Command should succeed");
    assert_eq!(a.stdout, b.stdout);
    let value: serde_json::Value = serde_json::from_slice(&a.stdout).unwrap();
    assert_eq!(value["scenario"]["winds"].as_array().map(|w| w.len()), Some(3));
}

#[test]
fn test_cli_scenario_csv_is_plain_csv() {
    let output = run(&["scenario", "--seed", "7", "-o", "csv"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "header plus one row: {stdout}");
    assert!(lines[0].starts_with("distance_yd,"));
    assert_eq!(lines[1].split(',').count(), lines[0].split(',').count());
}

#[test]
fn test_cli_info_banner_is_aligned() {
    let output = run(&["info"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let widths: Vec<usize> = stdout.lines().map(|l| l.chars().count()).collect();
    assert!(!widths.is_empty());
    assert!(widths.iter().all(|&w| w == widths[0]), "ragged banner: {widths:?}");
}

#[test]
fn test_cli_table_rejects_oversized_range() {
    let output = run(&["table", "--start", "0", "--end", "1000000000", "--step", "0.0001", "-o", "csv"]);
    assert!(!output.status.success(), "Oversized table should be rejected");
    assert!(String::from_utf8_lossy(&output.stderr).contains("rows"));
}

#[test]
fn test_cli_shot_hit_and_miss() {
    let solved = run(&["solve", "-d", "600", "-o", "json"]);
    let value: serde_json::Value = serde_json::from_slice(&solved.stdout).unwrap();
    let hold = -value["drop_mils"].as_f64().unwrap();
    let hold_arg = format!("{hold:.4}");

    let hit = run(&["shot", "-d", "600", "-e", &hold_arg, "-t", "ipsc-full"]);
    assert!(hit.status.success());
    assert!(String::from_utf8_lossy(&hit.stdout).starts_with("HIT"));

    let miss = run(&["shot", "-d", "600", "-e", "0", "-t", "steel-8inch"]);
    assert!(miss.status.success());
    assert!(String::from_utf8_lossy(&miss.stdout).starts_with("MISS"));
}

#[test]
fn test_cli_profile_from_json_file() {
    let mut path = std::env::temp_dir();
    path.push(format!("ballistics-trainer-profile-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"name": "Test 308", "ballistic_coefficient": 0.505, "drag_model": "G7",
                "muzzle_velocity_fps": 2600, "bullet_mass_grains": 175, "zero_distance_yards": 100}}"#
        )
        .unwrap();
    }

    let output = run(&["solve", "-d", "300", "--profile", path.to_str().unwrap()]);
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success(), "Command should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Test 308"));
}

#[test]
fn test_cli_unknown_rifle_falls_back() {
    let output = run(&["solve", "-d", "300", "--rifle", "Blunderbuss"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown rifle profile"));
}

#[test]
fn test_cli_rifles_listing() {
    let output = run(&["rifles"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".308 Win (175gr)"));
    assert!(stdout.contains(".300 Win Mag (190gr)"));

    let targets = run(&["rifles", "--targets"]);
    assert!(String::from_utf8_lossy(&targets.stdout).contains("steel-12inch"));
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("solve"), "Should list solve command");
    assert!(stdout.contains("table"), "Should list table command");
    assert!(stdout.contains("scenario"), "Should list scenario command");
    assert!(stdout.contains("info"), "Should list info command");
}

#[test]
fn test_cli_invalid_command() {
    let output = run(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn test_cli_missing_required_args() {
    let output = run(&["solve"]);
    assert!(!output.status.success(), "Should fail without a distance");
}
