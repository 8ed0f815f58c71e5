//! CLI integration tests for the sessionize command-line interface.
//!
//! These tests verify:
//! - Help text is displayed correctly
//! - A log is sessionized into the expected output file
//! - Invalid inputs are rejected with appropriate messages and no output

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the sessionize binary.
fn sessionize() -> Command {
    let mut cmd = Command::cargo_bin("sessionize").unwrap();
    cmd.env_remove("SESSIONIZE_INACTIVITY")
        .env_remove("SESSIONIZE_LOG_DIR");
    cmd
}

const HEADER: &str =
    "ip,date,time,zone,cik,accession,extention,code,size,idx,norefer,noagent,find,crawler,browser";

/// Build an EDGAR-style log from `(ip, time)` pairs on 2017-06-30.
fn edgar_log(rows: &[(&str, &str)]) -> String {
    let mut log = format!("{HEADER}\n");
    for (ip, time) in rows {
        log.push_str(&format!(
            "{ip},2017-06-30,{time},0.0,1140361.0,0001193125-17-056240,-index.htm,200.0,2825.0,1.0,0.0,0.0,10.0,0.0,\n"
        ));
    }
    log
}

fn sample_rows() -> Vec<(&'static str, &'static str)> {
    vec![
        ("101.81.133.jja", "00:00:00"),
        ("107.23.85.jfd", "00:00:00"),
        ("107.23.85.jfd", "00:00:00"),
        ("106.120.173.jie", "00:00:01"),
        ("107.178.195.aag", "00:00:01"),
        ("108.91.91.hbc", "00:00:01"),
        ("107.23.85.jfd", "00:00:02"),
        ("106.120.173.jie", "00:00:02"),
        ("107.178.195.aag", "00:00:02"),
        ("107.23.85.jfd", "00:00:02"),
        ("107.23.85.jfd", "00:00:03"),
        ("108.91.91.hbc", "00:00:04"),
    ]
}

const SAMPLE_OUTPUT: &str = "\
101.81.133.jja,2017-06-30 00:00:00,2017-06-30 00:00:00,0,1
108.91.91.hbc,2017-06-30 00:00:01,2017-06-30 00:00:01,0,1
106.120.173.jie,2017-06-30 00:00:01,2017-06-30 00:00:02,1,2
107.178.195.aag,2017-06-30 00:00:01,2017-06-30 00:00:02,1,2
107.23.85.jfd,2017-06-30 00:00:00,2017-06-30 00:00:03,3,5
108.91.91.hbc,2017-06-30 00:00:04,2017-06-30 00:00:04,0,1
";

/// A temp directory holding `log.csv` and `inactivity_period.txt`.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(log: &str, inactivity: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("log.csv"), log).unwrap();
        fs::write(dir.path().join("inactivity_period.txt"), inactivity).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run_args(&self) -> [PathBuf; 4] {
        [
            PathBuf::from("run"),
            self.path("log.csv"),
            self.path("inactivity_period.txt"),
            self.path("sessionization.txt"),
        ]
    }

    fn output(&self) -> String {
        fs::read_to_string(self.path("sessionization.txt")).unwrap()
    }

    fn has_output(&self) -> bool {
        self.path("sessionization.txt").exists()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    sessionize()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessionize"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_displays() {
    sessionize()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sessionize"));
}

#[test]
fn test_run_requires_arguments() {
    sessionize()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<LOG>"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Run Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_run_writes_sessions() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "2\n");

    sessionize()
        .args(fx.run_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions:"));

    assert_eq!(fx.output(), SAMPLE_OUTPUT);
}

#[test]
fn test_run_json_reports_stats() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "2\n");

    sessionize()
        .arg("--json")
        .args(fx.run_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inactivity_secs\": 2"))
        .stdout(predicate::str::contains("\"sessions\": 6"))
        .stdout(predicate::str::contains("\"order_policy\": \"strict\""));
}

#[test]
fn test_inactivity_override() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "2\n");

    sessionize()
        .args(fx.run_args())
        .args(["--inactivity", "60"])
        .assert()
        .success();

    // With a long threshold every visitor has exactly one session.
    assert_eq!(fx.output().lines().count(), 5);
    assert!(fx
        .output()
        .contains("108.91.91.hbc,2017-06-30 00:00:01,2017-06-30 00:00:04,3,2"));
}

#[test]
fn test_empty_log_produces_empty_output() {
    let fx = Fixture::new(&format!("{HEADER}\n"), "2\n");

    sessionize().args(fx.run_args()).assert().success();
    assert_eq!(fx.output(), "");
}

#[test]
fn test_non_positive_threshold_rejected() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "0\n");

    sessionize()
        .args(fx.run_args())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
    assert!(!fx.has_output());
}

#[test]
fn test_non_integer_threshold_rejected() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "two seconds\n");

    sessionize()
        .args(fx.run_args())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an integer"));
    assert!(!fx.has_output());
}

#[test]
fn test_negative_override_rejected() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "2\n");

    sessionize()
        .args(fx.run_args())
        .args(["--inactivity", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn test_malformed_row_rejected_before_output() {
    let log = format!("{HEADER}\n101.81.133.jja,2017-06-30,z0:00:00,0.0,1.0,x,-index.htm,200.0,1.0,1.0,0.0,0.0,10.0,0.0,\n");
    let fx = Fixture::new(&log, "2\n");

    sessionize()
        .args(fx.run_args())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid timestamp"));
    assert!(!fx.has_output());
}

#[test]
fn test_out_of_order_fails_by_default() {
    let fx = Fixture::new(
        &edgar_log(&[("a", "00:00:05"), ("b", "00:00:03")]),
        "2\n",
    );

    sessionize()
        .args(fx.run_args())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Out-of-order"));
}

#[test]
fn test_out_of_order_clamped() {
    let fx = Fixture::new(
        &edgar_log(&[("a", "00:00:05"), ("b", "00:00:03")]),
        "2\n",
    );

    sessionize()
        .args(fx.run_args())
        .arg("--clamp-out-of-order")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clamped:"));

    assert_eq!(
        fx.output(),
        "a,2017-06-30 00:00:05,2017-06-30 00:00:05,0,1\n\
         b,2017-06-30 00:00:05,2017-06-30 00:00:05,0,1\n"
    );
}

#[test]
fn test_log_dir_receives_json_logs() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "2\n");
    let logs = fx.path("logs");

    sessionize()
        .arg("--log-dir")
        .arg(&logs)
        .args(fx.run_args())
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(&logs).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Validate Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_validate_reports_profile() {
    let fx = Fixture::new(&edgar_log(&sample_rows()), "2\n");

    sessionize()
        .args(["--json", "validate"])
        .arg(fx.path("log.csv"))
        .arg(fx.path("inactivity_period.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records\": 12"))
        .stdout(predicate::str::contains("\"visitors\": 5"))
        .stdout(predicate::str::contains("\"span_secs\": 4"))
        .stdout(predicate::str::contains("\"inactivity_secs\": 2"));
    assert!(!fx.has_output());
}

#[test]
fn test_validate_flags_out_of_order() {
    let fx = Fixture::new(
        &edgar_log(&[("a", "00:00:05"), ("b", "00:00:03")]),
        "2\n",
    );

    sessionize()
        .arg("validate")
        .arg(fx.path("log.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("out-of-order"));

    sessionize()
        .arg("validate")
        .arg(fx.path("log.csv"))
        .arg("--clamp-out-of-order")
        .assert()
        .success();
}

#[test]
fn test_validate_missing_column() {
    let fx = Fixture::new("ip,date\na,2017-06-30\n", "2\n");

    sessionize()
        .arg("validate")
        .arg(fx.path("log.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no 'time' column"));
}
