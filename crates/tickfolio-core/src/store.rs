//! Flat-file record store for holdings.
//!
//! The on-disk schema is a CSV table with the fixed header
//! `market,symbol,currency,shares,avgCost`, one row per holding. Saves are
//! atomic: rows are written to a temp file in the same directory and renamed
//! over the target, so callers never observe a half-written store.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Holding, PortfolioError};

const HEADER: [&str; 5] = ["market", "symbol", "currency", "shares", "avgCost"];

/// CSV-backed holdings table.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all holdings from the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::StoreNotFound`] if the file is absent, and
    /// a format error if any row fails to deserialize; a row with an empty
    /// symbol fails the whole load rather than being skipped.
    pub fn load(&self) -> Result<Vec<Holding>, PortfolioError> {
        if !self.path.exists() {
            return Err(PortfolioError::StoreNotFound {
                path: self.path.clone(),
            });
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let holdings = reader
            .deserialize()
            .collect::<Result<Vec<Holding>, csv::Error>>()?;

        debug!(path = %self.path.display(), rows = holdings.len(), "loaded store");
        Ok(holdings)
    }

    /// Overwrite the backing file with the given holdings, atomically.
    ///
    /// The write either succeeds completely or leaves the store unchanged.
    pub fn save(&self, holdings: &[Holding]) -> Result<(), PortfolioError> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut temp = match dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new_in(".")?,
        };

        {
            // The header row is written unconditionally so an empty table
            // still carries the schema.
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut temp);
            writer.write_record(HEADER)?;
            for holding in holdings {
                writer.serialize(holding)?;
            }
            writer.flush()?;
        }

        temp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), rows = holdings.len(), "saved store");
        Ok(())
    }
}
