// src/race/mod.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod columnar;
pub mod rows;

/// One named finisher.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct RaceResult {
    pub name: String,
    pub finish_time: f64,
}

/// How a race file gets read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Record-by-record scan with the `csv` reader.
    #[default]
    Rows,
    /// Arrow record batches reduced with compute kernels.
    Columnar,
}

impl Backend {
    pub fn as_str(&self) -> &str {
        match self {
            Backend::Rows => "rows",
            Backend::Columnar => "columnar",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rows" => Some(Backend::Rows),
            "columnar" => Some(Backend::Columnar),
            _ => None,
        }
    }
}

/// Column names and backend for race queries.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceQuery {
    name_column: String,
    time_column: String,
    backend: Backend,
}

impl Default for RaceQuery {
    fn default() -> Self {
        Self {
            name_column: "name".to_string(),
            time_column: "finish_time".to_string(),
            backend: Backend::default(),
        }
    }
}

impl RaceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }

    pub fn with_time_column(mut self, column: impl Into<String>) -> Self {
        self.time_column = column.into();
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn name_column(&self) -> &str {
        &self.name_column
    }

    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Name of the runner with the lowest finish time. Ties go to the earliest row.
    #[tracing::instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display(), backend = self.backend.as_str()))]
    pub fn fastest_runner<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        match self.backend {
            Backend::Rows => rows::fastest_runner(path.as_ref(), self),
            Backend::Columnar => columnar::fastest_runner(path.as_ref(), self),
        }
    }

    /// Arithmetic mean of the finish-time column.
    #[tracing::instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display(), backend = self.backend.as_str()))]
    pub fn mean_finish_time<P: AsRef<Path>>(&self, path: P) -> Result<f64> {
        match self.backend {
            Backend::Rows => rows::mean_finish_time(path.as_ref(), self),
            Backend::Columnar => columnar::mean_finish_time(path.as_ref(), self),
        }
    }
}

/// Fastest runner in a `name,finish_time` CSV, read row by row.
pub fn find_fastest_runner<P: AsRef<Path>>(path: P) -> Result<String> {
    RaceQuery::default().fastest_runner(path)
}

pub fn find_fastest_runner_with<P: AsRef<Path>>(path: P, backend: Backend) -> Result<String> {
    RaceQuery::default().with_backend(backend).fastest_runner(path)
}

/// Mean finish time in a `name,finish_time` CSV, read row by row.
pub fn find_mean_finish_time<P: AsRef<Path>>(path: P) -> Result<f64> {
    RaceQuery::default().mean_finish_time(path)
}

pub fn find_mean_finish_time_with<P: AsRef<Path>>(path: P, backend: Backend) -> Result<f64> {
    RaceQuery::default()
        .with_backend(backend)
        .mean_finish_time(path)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::RaceResult;
    use anyhow::Result;
    use csv::{Terminator, WriterBuilder};
    use std::path::Path;

    /// Write a headed race file with `\r\n` row endings.
    pub fn write_race_file(path: &Path, results: &[(&str, f64)]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_path(path)?;
        if results.is_empty() {
            writer.write_record(["name", "finish_time"])?;
        }
        for (name, finish_time) in results {
            writer.serialize(RaceResult {
                name: name.to_string(),
                finish_time: *finish_time,
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn assert_close(actual: f64, expected: f64) {
        let tol = 1e-9 * actual.abs().max(expected.abs());
        assert!(
            (actual - expected).abs() <= tol,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    pub fn single() -> Vec<(&'static str, f64)> {
        vec![("Alice", 11.56)]
    }

    pub fn trio() -> Vec<(&'static str, f64)> {
        vec![("Alice", 11.56), ("Bob", 10.99), ("Charlie", 17.02)]
    }

    pub fn close_finish() -> Vec<(&'static str, f64)> {
        vec![("David", 14.2), ("Eve", 13.7), ("Frank", 14.4)]
    }
}
