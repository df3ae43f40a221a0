use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub fn taskboard_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taskboard").expect("binary");
    cmd.env_remove("TASKBOARD_DATA_DIR").env_remove("RUST_LOG");
    cmd
}

/// A throwaway data directory for one test.
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join("taskboard.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = taskboard_cmd();
        cmd.arg("--data-dir").arg(self.dir.path());
        cmd
    }

    /// Run with `--json` and return the parsed envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("run taskboard");
        serde_json::from_slice(&output.stdout).expect("json output")
    }

    pub fn column_ids(&self, column: &str) -> Vec<String> {
        let board = self.json(&["board"]);
        board["data"]["columns"]
            .as_array()
            .expect("columns")
            .iter()
            .find(|entry| entry["id"] == column)
            .expect("column present")["taskIds"]
            .as_array()
            .expect("taskIds")
            .iter()
            .map(|id| id.as_str().expect("id").to_string())
            .collect()
    }
}
