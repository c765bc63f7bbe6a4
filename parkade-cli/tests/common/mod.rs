//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - A catalog fixture with fixed lot, account and car ids

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads. Removed from every child so the host
/// environment cannot leak into a test.
const PARKADE_VARS: [&str; 9] = [
    "PARKADE_DATA_DIR",
    "PARKADE_BUSY_TIMEOUT",
    "PARKADE_ACCOUNT",
    "PARKADE_LOG_MODE",
    "PARKADE_MAXIMUM_LOCK_WAIT_SECONDS",
    "PARKADE_DEFAULT_WINDOW_MINUTES",
    "PARKADE_MAX_WINDOW_MINUTES",
    "PARKADE_ENFORCE_OPERATING_HOURS",
    "PARKADE_OUTPUT_FORMAT",
];

/// Lot 7 has two floors of three spots; spot 3 on the upper floor costs
/// 35.50. Account 11 (balance 50, car 21) and account 12 (balance 0, car 22).
pub const CATALOG: &str = r#"
lots:
  - id: 7
    name: Harbor
    open_time: "06:00"
    close_time: "23:00"
    node1: "40.1800"
    node2: "44.5100"
    price: 20
    floors:
      - number: 1
        spot_count: 3
      - number: 2
        spot_count: 3
        spots:
          - number: 3
            price: "35.50"
accounts:
  - id: 11
    full_name: Sam Driver
    phone_number: "+15550100"
    balance: 50
    cars:
      - id: 21
        model: Corolla
        plate: 12A345
        color: white
  - id: 12
    full_name: Jo Empty
    phone_number: "+15550102"
    cars:
      - id: 22
        model: Leaf
        plate: EV0001
        color: green
"#;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the parkade data directory
    pub data_dir: PathBuf,
}

/// Floor ids of the imported catalog.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct Floors {
    pub ground: i64,
    pub upper: i64,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("parkade-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Create an environment with [`CATALOG`] imported.
    pub fn seeded() -> (Self, Floors) {
        let env = Self::new();
        let catalog = env.write_file("catalog.yaml", CATALOG);
        env.command().arg("import").arg(&catalog).assert().success();
        let floors = env.floors();
        (env, floors)
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("parkade").expect("Failed to find parkade binary");
        for var in PARKADE_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Path of the store file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("parkade.db")
    }

    /// Run a command that must succeed and return its stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run parkade");

        assert!(
            output.status.success(),
            "parkade {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Read the floor ids of lot 7 from `parkade lot 7 --format json`.
    pub fn floors(&self) -> Floors {
        let value: serde_json::Value =
            serde_json::from_str(&self.run(&["lot", "7", "--format", "json"]))
                .expect("lot output is not JSON");
        let floors = value["floors"].as_array().expect("floors array");
        Floors {
            ground: floors[0]["id"].as_i64().expect("floor id"),
            upper: floors[1]["id"].as_i64().expect("floor id"),
        }
    }

    /// Arguments for Sam reserving a ground floor spot on 2024-05-01.
    pub fn reserve_args(floor: i64, spot: u32, start: &str, end: &str) -> Vec<String> {
        [
            "reserve", "--account", "11", "--car", "21", "--lot", "7", "--floor",
        ]
        .iter()
        .map(ToString::to_string)
        .chain([
            floor.to_string(),
            "--spot".into(),
            spot.to_string(),
            "--date".into(),
            "2024-05-01".into(),
            "--start".into(),
            start.into(),
            "--end".into(),
            end.into(),
        ])
        .collect()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
