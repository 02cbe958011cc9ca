//! Runs the `scaling` binary on small CSV tables
//!
//! Only the ignored tests render charts, since they need a system font.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const STRONG_CSV: &str = "\
ImageName,ImageDimension,KernelName,KernelDimension,TimePerRep_s,NumThreads,SpeedUp,Efficiency
4K,3840x2160,gauss,7,12.0,1,1.0,1.0
4K,3840x2160,gauss,7,6.666,2,1.8,0.9
4K,3840x2160,gauss,7,4.0,4,3.0,0.75
4K,3840x2160,gauss,7,3.0,8,4.0,0.5
";

const WEAK_CSV: &str = "\
ImageName,ImageDimension,KernelName,KernelDimension,TimePerRep_s,NumThreads,UnitOfWork,WeakEfficiency,ScaledSpeedUp,Throughput_Mpix_s
4K,3840x2160,gauss,7,1.0,1,3840x2160,1.0,1.0,8.3
4K,3840x4320,gauss,7,1.25,2,3840x2160,0.8,1.6,13.3
HD,1920x2160,gauss,7,1.1,2,1920x1080,0.9,1.8,3.8
HD,1920x4320,gauss,7,1.3,4,1920x1080,0.77,3.1,6.4
";

fn scaling(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scaling"))
        .args(args)
        .output()
        .unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_strong_prints_tables_and_writes_report() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "strong.csv", STRONG_CSV);
    let report = dir.path().join("report.json");

    let output = scaling(&[
        "strong",
        &csv,
        "4",
        "--no-plots",
        "--report",
        report.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Couple (3840x2160, kernel=7) with thread > 1:"));
    assert!(stdout.contains("Couple (3840x2160, kernel=7) with 1 < thread <= 4:"));
    assert!(stdout.contains("f_p table (per p):"));

    let json = read_json(&report);
    assert_eq!(json["mode"], "strong");
    assert_eq!(json["config"]["physical_cores"], 4);
    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    assert!(json["failures"].as_array().unwrap().is_empty());

    // --no-plots leaves the output directory alone
    let pngs = std::fs::read_dir(dir.path())
        .unwrap()
        .filter(|entry| {
            entry
                .as_ref()
                .is_ok_and(|e| e.path().extension().is_some_and(|ext| ext == "png"))
        })
        .count();
    assert_eq!(pngs, 0);
}

#[test]
fn test_weak_group_without_baseline_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "weak.csv", WEAK_CSV);
    let report = dir.path().join("report.json");

    let output = scaling(&["weak", &csv, "--no-plots", "--report", report.to_str().unwrap()]);
    assert!(!output.status.success());

    // The group with a baseline is still analysed
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Couple (3840x2160, kernel=7)"));

    let json = read_json(&report);
    assert_eq!(json["mode"], "weak");
    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    let failures = json["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["group"], "(1920x1080, kernel=7)");
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");
    let output = scaling(&["overview", missing.to_str().unwrap(), "--no-plots"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load"));
}

#[test]
fn test_overview_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "strong.csv", STRONG_CSV);
    let out = dir.path().join("charts");
    // A directory where the chart should go makes the group fail
    std::fs::create_dir_all(out.join("Strong_scaling_3840x2160_7.png")).unwrap();
    let report = dir.path().join("report.json");

    let output = scaling(&[
        "overview",
        &csv,
        "-o",
        out.to_str().unwrap(),
        "--report",
        report.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Couple (3840x2160, kernel=7):"));

    let json = read_json(&report);
    assert_eq!(json["mode"], "overview");
    assert!(json["groups"].as_array().unwrap().is_empty());
    let failures = json["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["group"], "(3840x2160, kernel=7)");
}

#[test]
#[ignore = "needs a sans-serif system font"]
fn test_charts_are_written_to_output_dir() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "strong.csv", STRONG_CSV);
    let out = dir.path().join("nested").join("charts");

    let output = scaling(&["strong", &csv, "4", "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    let output = scaling(&["overview", &csv, "-o", out.to_str().unwrap()]);
    assert!(output.status.success());

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Strong_scaling_3840x2160_7.png",
            "amdahl_estimate_3840x2160_7.png",
            "amdahl_evaluation_3840x2160_7.png",
            "strong_scaling_3840x2160_7.png",
        ]
    );
}
