//! The single active dataset of a running application.
//!
//! A [`Workspace`] owns the "currently loaded file". Loading parses the new
//! file completely before touching the slot, then swaps the `Arc` in one
//! step. Analyses work on an [`Arc<Dataset>`] snapshot taken at call time, so
//! a reload never changes data under an analysis that is already running.
//! A failed load leaves the previous dataset in place.

use super::logic::{self, ChartResult, ChartSpec, ColumnProfile, Dataset, RegressionResult, SummaryReport};
use crate::config::AnalysisConfig;
use crate::error::{AutovizError, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// A dataset together with where and when it was loaded.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Arc<Dataset>,
    pub source: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Workspace {
    config: AnalysisConfig,
    current: RwLock<Option<LoadedDataset>>,
}

impl Workspace {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            current: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parses `bytes` and makes the result the active dataset.
    ///
    /// # Errors
    ///
    /// Any loader error; the previously active dataset is kept.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Arc<Dataset>> {
        let parsed = logic::load_with_config(bytes, &self.config);
        self.install(parsed, None)
    }

    /// Reads and parses a file and makes the result the active dataset.
    ///
    /// # Errors
    ///
    /// Any I/O or loader error; the previously active dataset is kept.
    pub fn load_path(&self, path: &Path) -> Result<Arc<Dataset>> {
        let parsed = logic::load_path(path, &self.config);
        self.install(parsed, Some(path.to_path_buf()))
    }

    /// Re-reads the file the active dataset came from.
    ///
    /// The new contents replace the active dataset only if they load
    /// successfully.
    ///
    /// # Errors
    ///
    /// - [`AutovizError::NoDataset`] if nothing has been loaded
    /// - [`AutovizError::NoSource`] if the active dataset came from bytes
    /// - any I/O or loader error, with the previous dataset kept
    pub fn reload(&self) -> Result<Arc<Dataset>> {
        let loaded = self.current().ok_or(AutovizError::NoDataset)?;
        let path = loaded.source.ok_or(AutovizError::NoSource)?;
        log::info!("Reloading {}", path.display());
        self.load_path(&path)
    }

    fn install(&self, parsed: Result<Dataset>, source: Option<PathBuf>) -> Result<Arc<Dataset>> {
        let dataset = match parsed {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                if self.current().is_some() {
                    log::warn!("Load failed, keeping previous dataset: {e}");
                } else {
                    log::warn!("Load failed: {e}");
                }
                return Err(e);
            }
        };

        let loaded = LoadedDataset {
            dataset: Arc::clone(&dataset),
            source,
            loaded_at: Utc::now(),
        };
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded);
        log::debug!("Active dataset replaced");
        Ok(dataset)
    }

    /// Drops the active dataset.
    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        log::info!("Data cleared");
    }

    pub fn current(&self) -> Option<LoadedDataset> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of the active dataset.
    ///
    /// # Errors
    ///
    /// [`AutovizError::NoDataset`] if nothing has been loaded.
    pub fn snapshot(&self) -> Result<Arc<Dataset>> {
        self.current()
            .map(|loaded| loaded.dataset)
            .ok_or(AutovizError::NoDataset)
    }

    /// # Errors
    ///
    /// [`AutovizError::NoDataset`] if nothing has been loaded.
    pub fn inspect(&self) -> Result<Vec<ColumnProfile>> {
        let dataset = self.snapshot()?;
        Ok(logic::inspect(&dataset))
    }

    /// # Errors
    ///
    /// [`AutovizError::NoDataset`] or any error of [`logic::aggregate`].
    pub fn aggregate(&self, spec: &ChartSpec) -> Result<ChartResult> {
        let dataset = self.snapshot()?;
        logic::aggregate(&dataset, spec)
    }

    /// # Errors
    ///
    /// [`AutovizError::NoDataset`] or any error of [`logic::fit_ols`].
    pub fn fit_ols(&self, x_column: &str, y_column: &str) -> Result<RegressionResult> {
        let dataset = self.snapshot()?;
        logic::fit_ols(&dataset, x_column, y_column)
    }

    /// # Errors
    ///
    /// [`AutovizError::NoDataset`] if nothing has been loaded.
    pub fn summarize(&self) -> Result<SummaryReport> {
        let dataset = self.snapshot()?;
        Ok(logic::summarize(&dataset))
    }
}
