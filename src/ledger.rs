use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use log::warn;

use crate::error::PersistenceError;
use crate::parser::SlotTarget;

/// Persisted set of already-booked slot targets.
///
/// Backed by a plain append log: one `<day>_<time>` line per confirmed
/// booking (e.g. `Sun_8:30am`). Without a path the ledger lives purely in
/// memory for the duration of the run.
pub struct BookingLedger {
    path: Option<PathBuf>,
    booked: HashSet<SlotTarget>,
}

impl BookingLedger {
    /// Loads the ledger from the given file, if any.
    ///
    /// A missing file (or no path at all) is an empty ledger, not an error.
    /// Blank or unparseable lines are skipped with a warning so a hand-edited
    /// file never blocks a run. Duplicate lines collapse into one entry.
    pub fn load(path: Option<PathBuf>) -> Result<Self, PersistenceError> {
        let mut booked = HashSet::new();
        if let Some(ref path) = path {
            if path.exists() {
                let text = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
                    path: path.clone(),
                    source,
                })?;
                for line in text.lines() {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match line.parse::<SlotTarget>() {
                        Ok(target) => {
                            booked.insert(target);
                        }
                        Err(err) => {
                            warn!("Skipping unreadable ledger line '{}': {}", line, err);
                        }
                    }
                }
            }
        }
        Ok(BookingLedger { path, booked })
    }

    /// Empty in-memory ledger, mainly for tests.
    pub fn in_memory() -> Self {
        BookingLedger {
            path: None,
            booked: HashSet::new(),
        }
    }

    pub fn contains(&self, target: &SlotTarget) -> bool {
        self.booked.contains(target)
    }

    pub fn len(&self) -> usize {
        self.booked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.booked.is_empty()
    }

    /// Records a confirmed booking, appending one line to the backing file.
    ///
    /// Idempotent: recording a target that is already present changes nothing
    /// on disk or in memory.
    pub fn record(&mut self, target: SlotTarget) -> Result<(), PersistenceError> {
        if !self.booked.insert(target) {
            return Ok(());
        }
        if let Some(ref path) = self.path {
            let write = |path: &PathBuf| -> std::io::Result<()> {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}", target)
            };
            write(path).map_err(|source| PersistenceError::Write {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
