//! Race result persistence. Lives on the driver's side of the event
//! boundary; write failures are swallowed so they can never reach the
//! engine.

use crate::app_dirs::AppDirs;
use crate::events::{RaceEvent, RaceListener};
use chrono::Local;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Appends one csv row per finished race.
pub struct ResultLog {
    path: Option<PathBuf>,
}

impl ResultLog {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::results_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: Some(p.as_ref().to_path_buf()),
        }
    }

    fn append(&self, rank: u32, wpm: u32, language: &str) -> Result<(), Box<dyn Error>> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !path.exists();

        let file = OpenOptions::new().append(true).create(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(["date", "language", "rank", "wpm"])?;
        }
        writer.write_record([
            Local::now().format("%c").to_string(),
            language.to_string(),
            rank.to_string(),
            wpm.to_string(),
        ])?;
        writer.flush()?;

        Ok(())
    }
}

impl RaceListener for ResultLog {
    fn on_event(&mut self, event: &RaceEvent) {
        if let RaceEvent::RaceFinished {
            rank,
            wpm,
            language,
        } = event
        {
            let _ = self.append(*rank, *wpm, language);
        }
    }
}
