//! Run artefacts: the consulted-pages log and the resume checkpoint.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Markdown log of every page a fill run consulted, one bullet per fetch.
pub struct ReferenceLog {
    path: PathBuf,
    file: File,
}

impl ReferenceLog {
    /// Creates (or truncates) the log and writes its heading.
    pub fn create(path: &Path) -> Result<Self> {
        let mut file = File::create(path)?;
        writeln!(file, "# Pages consulted while filling the workbook\n")?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Appends one consulted page. Log failures are reported but never abort
    /// the run.
    pub fn record(&mut self, institution: &str, purpose: &str, url: &str) {
        if let Err(error) = writeln!(self.file, "- **{institution}** — {purpose}: {url}") {
            warn!(path = %self.path.display(), %error, "could not append to reference log");
        }
    }
}

/// Position of an interrupted fill run, written before each institution is
/// processed and removed once the output workbook is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub institution_index: usize,
    pub institution: String,
}

pub fn save_checkpoint(path: &Path, checkpoint: &Checkpoint) -> Result<()> {
    let json = serde_json::to_string_pretty(checkpoint)?;
    fs::write(path, json)?;
    Ok(())
}

/// Loads a previously saved checkpoint. A missing or unreadable file means a
/// fresh start, not an error.
pub fn load_checkpoint(path: &Path) -> Option<Checkpoint> {
    let source = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&source) {
        Ok(checkpoint) => Some(checkpoint),
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable checkpoint");
            None
        }
    }
}

pub fn clear_checkpoint(path: &Path) {
    if path.exists() {
        if let Err(error) = fs::remove_file(path) {
            warn!(path = %path.display(), %error, "could not remove checkpoint");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn checkpoint_round_trips() {
        let dir = tempdir().expect("temporary directory");
        let path = dir.path().join("checkpoint.json");
        let checkpoint = Checkpoint {
            institution_index: 7,
            institution: "ETH Zurich".into(),
        };

        save_checkpoint(&path, &checkpoint).expect("checkpoint saved");
        assert_eq!(load_checkpoint(&path), Some(checkpoint));

        clear_checkpoint(&path);
        assert_eq!(load_checkpoint(&path), None);
    }

    #[test]
    fn reference_log_collects_entries() {
        let dir = tempdir().expect("temporary directory");
        let path = dir.path().join("references.md");

        let mut log = ReferenceLog::create(&path).expect("log created");
        log.record("MIT", "homepage", "https://www.mit.edu");
        drop(log);

        let written = fs::read_to_string(&path).expect("log read");
        assert!(written.contains("**MIT** — homepage: https://www.mit.edu"));
    }
}
