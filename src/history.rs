//! Flat-file store of every identifier ever minted.
//!
//! One identifier per line, in either canonical or native-literal form. New
//! entries are appended as native literals. The file is created empty on first
//! use and never rewritten or pruned.

use crate::error::Result;
use crate::identifier::Identifier;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default store location, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "history.txt";

#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store into a set of canonical identifier strings, creating an
    /// empty file if none exists.
    ///
    /// Lines that parse in neither form are kept verbatim so they still take part
    /// in exclusion checks.
    pub fn load(&self) -> Result<HashSet<String>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "creating empty identifier history");
            File::create(&self.path)?;
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut used = HashSet::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            match Identifier::parse_any(entry) {
                Ok(id) => {
                    used.insert(id.canonical());
                }
                Err(_) => {
                    warn!(line = line_no + 1, entry, "unrecognised history entry");
                    used.insert(entry.to_string());
                }
            }
        }

        debug!(path = %self.path.display(), count = used.len(), "loaded identifier history");
        Ok(used)
    }

    /// Appends `ids` as native literals, one per line.
    pub fn append(&self, ids: &[Identifier]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        for id in ids {
            writeln!(file, "{}", id.native_literal())?;
        }
        file.flush()?;
        debug!(path = %self.path.display(), appended = ids.len(), "recorded identifiers");
        Ok(())
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}
