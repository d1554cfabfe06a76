//! Common test utilities for headless tests.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A scratch environment that keeps runs away from the user's config.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn export_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("exports")
    }

    /// Runs schema-pilot in headless mode with a short generation latency.
    /// Returns (exit code, stdout, stderr).
    pub fn run_headless(&self, args: &[&str]) -> (i32, String, String) {
        let config_path = self.dir.path().join("config.toml");
        let output = Command::new(env!("CARGO_BIN_EXE_schema-pilot"))
            .arg("--config")
            .arg(&config_path)
            .args(["--headless", "--latency-ms", "50"])
            .args(args)
            .env("SCHEMA_PILOT_EXPORT_DIR", self.export_dir())
            .env_remove("SCHEMA_PILOT_LATENCY_MS")
            .env("RUST_LOG", "warn")
            .output()
            .expect("Failed to execute command");

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        (exit_code, stdout, stderr)
    }

    /// Runs with JSON output and parses it.
    pub fn run_json(&self, events: &str) -> (i32, serde_json::Value) {
        let (code, stdout, stderr) =
            self.run_headless(&["--events", events, "--size", "140x40", "--output", "json"]);
        let json = serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}\nstderr: {stderr}"));
        (code, json)
    }
}
