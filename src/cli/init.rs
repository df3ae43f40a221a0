//! taskboard init command implementation
//!
//! Writes the example board and a default config into the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::resolve_data_dir;
use crate::config::{Config, CONFIG_FILE};
use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::model::Snapshot;
use crate::output::{Output, Report};
use crate::seed::default_snapshot;
use crate::storage::FileStorage;

pub struct InitOptions {
    pub force: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct InitReport {
    data_dir: PathBuf,
    snapshot: PathBuf,
    created: InitCreated,
    tasks: usize,
}

#[derive(serde::Serialize)]
struct InitCreated {
    config: bool,
    snapshot: bool,
}

pub fn run(options: InitOptions) -> Result<()> {
    let data_dir = resolve_data_dir(options.data_dir)?;
    fs::create_dir_all(&data_dir)?;

    let created_config = ensure_config(&data_dir)?;
    let config = Config::load_from_dir(&data_dir);
    let storage = FileStorage::from_config(&data_dir, &config.storage);
    let snapshot_path = storage.snapshot_path();
    let existed = storage.exists();
    if existed && !options.force {
        return Err(Error::InvalidArgument(format!(
            "{} already exists; pass --force to overwrite it",
            snapshot_path.display()
        )));
    }

    let mut dashboard = Dashboard::open(storage, Snapshot::default());
    dashboard.reset(default_snapshot())?;
    let tasks = dashboard.store().tasks().len();

    let data = InitReport {
        data_dir: data_dir.clone(),
        snapshot: snapshot_path.clone(),
        created: InitCreated {
            config: created_config,
            snapshot: !existed,
        },
        tasks,
    };

    let header = if existed {
        "taskboard init: board reset"
    } else {
        "taskboard init: board created"
    };
    let mut report = Report::new(header);
    report.field("data dir", data_dir.display().to_string());
    report.field("snapshot", snapshot_path.display().to_string());
    report.field("tasks", tasks.to_string());
    if created_config {
        report.field("config", CONFIG_FILE);
    }
    report.hint("taskboard board");

    Output::new(options.json, options.quiet).success("init", &data, &report)
}

fn ensure_config(data_dir: &Path) -> Result<bool> {
    let path = data_dir.join(CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }
    Config::default().save(&path)?;
    Ok(true)
}
