//! Per-file extraction outcomes and batch aggregates.
//!
//! The backend reports each file as `{filename, success, data, error}`. The
//! wire shape allows contradictory combinations; [`FileOutcome`] decodes it into
//! an [`ExtractionOutcome`] where exactly one of payload or error exists.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Message used when the backend marks a file as failed without saying why.
pub const UNSPECIFIED_FAILURE: &str = "extraction failed without an error message";

/// Result of extracting a single document.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome<T> {
    Success(T),
    Failure(String),
}

impl<T> ExtractionOutcome<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }
}

/// Outcome for one named input file of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome<T> {
    pub filename: String,
    pub outcome: ExtractionOutcome<T>,
    /// Whether the backend also appended the record to its spreadsheet log.
    pub excel_written: bool,
}

impl<T> FileOutcome<T> {
    pub fn success(filename: impl Into<String>, data: T) -> Self {
        Self {
            filename: filename.into(),
            outcome: ExtractionOutcome::Success(data),
            excel_written: false,
        }
    }

    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            filename: filename.into(),
            outcome: ExtractionOutcome::Failure(if error.trim().is_empty() {
                UNSPECIFIED_FAILURE.to_string()
            } else {
                error
            }),
            excel_written: false,
        }
    }
}

#[derive(Deserialize)]
struct RawFileOutcome<T> {
    filename: String,
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    excel_written: bool,
}

#[derive(Serialize)]
struct WireFileOutcome<'a, T> {
    filename: &'a str,
    success: bool,
    data: Option<&'a T>,
    error: Option<&'a str>,
    excel_written: bool,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FileOutcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawFileOutcome::<T>::deserialize(deserializer)?;
        let outcome = match (raw.success, raw.data) {
            (true, Some(data)) => ExtractionOutcome::Success(data),
            (true, None) => {
                return Err(serde::de::Error::custom(format!(
                    "file '{}' marked successful but carries no data",
                    raw.filename
                )));
            }
            (false, _) => ExtractionOutcome::Failure(
                raw.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| UNSPECIFIED_FAILURE.to_string()),
            ),
        };
        Ok(Self {
            filename: raw.filename,
            outcome,
            excel_written: raw.excel_written,
        })
    }
}

impl<T: Serialize> Serialize for FileOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireFileOutcome {
            filename: &self.filename,
            success: self.outcome.is_success(),
            data: self.outcome.data(),
            error: self.outcome.error(),
            excel_written: self.excel_written,
        }
        .serialize(serializer)
    }
}

/// Check that batch counters agree with the per-file outcomes.
///
/// # Errors
///
/// Returns [`CoreError::InconsistentBatch`] when `successful + failed != total`,
/// when the result list length differs from `total`, or when the number of
/// successful outcomes differs from `successful`.
pub fn check_counters<T>(
    total: usize,
    successful: usize,
    failed: usize,
    results: &[FileOutcome<T>],
) -> Result<(), CoreError> {
    let observed = results.iter().filter(|r| r.outcome.is_success()).count();
    if successful + failed != total || results.len() != total || observed != successful {
        return Err(CoreError::InconsistentBatch {
            total,
            successful,
            failed,
            results: results.len(),
        });
    }
    Ok(())
}

/// A client-side aggregate of per-file outcomes with derived counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport<T> {
    pub total_files: usize,
    pub successful_extractions: usize,
    pub failed_extractions: usize,
    pub results: Vec<FileOutcome<T>>,
}

impl<T> BatchReport<T> {
    #[must_use]
    pub fn from_results(results: Vec<FileOutcome<T>>) -> Self {
        let successful = results.iter().filter(|r| r.outcome.is_success()).count();
        Self {
            total_files: results.len(),
            successful_extractions: successful,
            failed_extractions: results.len() - successful,
            results,
        }
    }
}
