//! CSV file ledger.

use financas_core::ExpenseRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::Ledger;
use crate::error::PersistenceError;
use crate::row::LedgerRow;

/// Ledger stored as a single CSV file.
///
/// Appends rewrite the whole table into a staging file next to the ledger and
/// rename it into place, so a failed write never leaves a half-written ledger.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next append is staged in (`<ledger>.<ext>.tmp`).
    pub fn staging_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        let ext = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(existing) => format!("{existing}.tmp"),
            None => String::from("tmp"),
        };
        tmp.set_extension(ext);
        tmp
    }

    fn write_all(&self, records: &[ExpenseRecord]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.staging_path();
        let staged = (|| -> Result<(), PersistenceError> {
            let mut wtr = csv::Writer::from_path(&tmp)?;
            for record in records {
                wtr.serialize(LedgerRow::from(record))?;
            }
            wtr.flush()?;
            Ok(())
        })();

        if let Err(e) = staged {
            warn!(path = %tmp.display(), error = %e, "staging ledger write failed");
            // leftover may be a directory or absent; nothing else to undo
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Ledger for CsvLedger {
    fn append(&mut self, records: &[ExpenseRecord]) -> Result<(), PersistenceError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut all = self.read_all()?;
        let existing = all.len();
        all.extend_from_slice(records);
        self.write_all(&all)?;

        debug!(
            path = %self.path.display(),
            existing,
            appended = records.len(),
            "ledger written"
        );
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<ExpenseRecord>, PersistenceError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "ledger file missing, treating as empty");
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let headers = rdr.headers()?.clone();

        let mut records = Vec::new();
        for result in rdr.records() {
            let raw = result?;
            let line = raw.position().map(|p| p.line()).unwrap_or(0);
            let row: LedgerRow = raw.deserialize(Some(&headers))?;
            records.push(row.into_record(line)?);
        }

        debug!(path = %self.path.display(), rows = records.len(), "ledger read");
        Ok(records)
    }
}
