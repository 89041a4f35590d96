use std::fs;
use std::path::Path;

use clap::Parser;
use searoute_cli::{run, Cli};
use serde_json::{json, Value};

/// 12x12 grid at 0.05 deg from (35.0, 11.0); columns 0-2 are land.
fn write_dataset(dir: &Path) -> String {
    let lats: Vec<f64> = (0..12).map(|i| 35.0 + i as f64 * 0.05).collect();
    let lons: Vec<f64> = (0..12).map(|j| 11.0 + j as f64 * 0.05).collect();
    let elevation: Vec<Vec<f64>> = (0..12)
        .map(|_| (0..12).map(|j| if j < 3 { 15.0 } else { -40.0 }).collect())
        .collect();
    let path = dir.join("grid.json");
    fs::write(
        &path,
        json!({ "lat": lats, "lon": lons, "elevation": elevation }).to_string(),
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn plan_prints_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(dir.path());

    let out = run_args(&[
        "searoute",
        "--dataset",
        &dataset,
        "--json",
        "plan",
        "--from",
        "35.05,11.25",
        "--to",
        "35.5,11.5",
    ])
    .unwrap();

    let summary: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(summary["status"], "clean");
    assert_eq!(summary["waypoints"][0], json!({"lat": 35.05, "lon": 11.25}));
    let last = summary["waypoints"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last, json!({"lat": 35.5, "lon": 11.5}));
}

#[test]
fn plan_text_reports_moved_start() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(dir.path());

    let out = run_args(&[
        "searoute",
        "--dataset",
        &dataset,
        "plan",
        "--from",
        "35.2,11.05",
        "--to",
        "35.3,11.45",
    ])
    .unwrap();

    assert!(out.starts_with("Status: substituted_endpoint\n"));
    assert!(out.contains("(moved from 35.20000,11.05000)"));
}

#[test]
fn missing_dataset_falls_back_to_straight_line() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    let out = run_args(&[
        "searoute",
        "--dataset",
        missing.to_str().unwrap(),
        "plan",
        "--from",
        "35.0,11.0",
        "--to",
        "35.3,11.0",
    ])
    .unwrap();

    assert!(out.starts_with("Status: degraded_straight_line\n"));
    assert!(out.contains("11 waypoints"));
}

#[test]
fn depth_reports_land_and_water() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(dir.path());

    let water = run_args(&["searoute", "--dataset", &dataset, "depth", "--at", "35.2,11.4"]).unwrap();
    assert_eq!(water.trim(), "Depth: 40.0 m, navigable");

    let land = run_args(&[
        "searoute", "--dataset", &dataset, "--json", "depth", "--at", "35.2,11.0",
    ])
    .unwrap();
    let body: Value = serde_json::from_str(&land).unwrap();
    assert_eq!(body["navigable"], false);
    assert_eq!(body["degraded"], false);
}

#[test]
fn nearest_port_by_region() {
    let out = run_args(&[
        "searoute",
        "nearest-port",
        "--at",
        "34.74,10.78",
        "--region",
        "sfax",
    ])
    .unwrap();
    assert!(out.starts_with("Port de Sfax (Sfax)"));

    let err = run_args(&["searoute", "nearest-port", "--at", "34.74,10.78", "--region", "Atlantis"])
        .unwrap_err();
    assert!(err.to_string().contains("no port found"));
}

#[test]
fn port_fallback_moves_endpoints_without_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let args = [
        "searoute",
        "--dataset",
        missing.to_str().unwrap(),
        "plan",
        "--from",
        "35.83,10.64",
        "--to",
        "35.3,12.0",
    ];

    let plain = run_args(&args).unwrap();
    assert!(plain.starts_with("Status: degraded_straight_line\n"));
    assert!(plain.contains("Start: 35.83000,10.64000\n"));

    let mut with_ports = args.to_vec();
    with_ports.push("--port-fallback");
    let snapped = run_args(&with_ports).unwrap();
    assert!(snapped.contains("(moved from 35.83000,10.64000)"));
    assert!(snapped.contains("End: 35.30000,12.00000\n"));
}

#[test]
fn protected_areas_around_zembra() {
    let out = run_args(&["searoute", "protected-areas", "--at", "37.1,10.8"]).unwrap();
    assert!(out.starts_with("Iles Zembra et Zembretta ("));
    assert!(out.contains("Zembra et Zembretta (Proposed AMCP): inside, 0.00 km"));

    let open_sea = run_args(&["searoute", "--json", "protected-areas", "--at", "36.0,12.5"]).unwrap();
    let body: Value = serde_json::from_str(&open_sea).unwrap();
    assert_eq!(body, json!([]));

    let err = run_args(&[
        "searoute",
        "protected-areas",
        "--at",
        "37.1,10.8",
        "--inside-km",
        "20",
        "--near-km",
        "5",
    ])
    .unwrap_err();
    assert!(err.to_string().contains("invalid proximity radii"));
}
