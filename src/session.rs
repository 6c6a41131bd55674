//! Per-group session directory and output file naming
//!
//! Each laboratory group gets its own directory under `log/`; every `stop`
//! produces one CSV and every `plot` one PNG, both named with the time they
//! were written so repeated runs within a session never collide.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;

/// Time format embedded in output file names, e.g. `14h-05min-33s`
const FILE_TIME_FORMAT: &str = "%Hh-%Mmin-%Ss";

/// One group's output directory
#[derive(Debug, Clone)]
pub struct Session {
    dir: PathBuf,
}

impl Session {
    /// Create `root/log/<group_id>/`, including parents, and return the session
    pub fn create<P: AsRef<Path>>(root: P, group_id: &str) -> Result<Self> {
        let dir = root.as_ref().join("log").join(group_id);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// CSV log path stamped with `at`
    pub fn log_path(&self, at: DateTime<Local>) -> PathBuf {
        self.dir
            .join(format!("temperature_log_{}.csv", at.format(FILE_TIME_FORMAT)))
    }

    /// PNG plot path stamped with `at`
    pub fn plot_path(&self, at: DateTime<Local>) -> PathBuf {
        self.dir
            .join(format!("temperature_log_{}.png", at.format(FILE_TIME_FORMAT)))
    }
}
