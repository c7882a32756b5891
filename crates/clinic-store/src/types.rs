//! Store-level error and configuration types.

use std::path::{Path, PathBuf};

use clinic_types::ScheduleKey;
use thiserror::Error;

/// Errors that can occur in clinic store operations.
#[derive(Error, Debug)]
pub enum ClinicError {
    /// I/O error touching a state file.
    #[error("IO error on state file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the state document.
    #[error("state document error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading or writing the CSV mirror.
    #[error("CSV mirror error: {0}")]
    Csv(#[from] csv::Error),

    /// A patient id was registered twice.
    #[error("patient already exists: {patient_id}")]
    DuplicatePatient {
        /// The id that was already taken.
        patient_id: String,
    },

    /// Lookup failed for a patient id.
    #[error("patient not found: {patient_id}")]
    PatientNotFound {
        /// The id that was looked up.
        patient_id: String,
    },

    /// An appointment code did not resolve to a scheduled appointment.
    #[error("no appointment for code: {code}")]
    AppointmentNotFound {
        /// The code that was presented.
        code: String,
    },

    /// Emergency severity outside 1..=10.
    #[error("severity out of range: {severity} (expected 1..=10)")]
    SeverityOutOfRange {
        /// The rejected severity value.
        severity: i64,
    },

    /// A date-time string did not match `YYYY-MM-DD HH:MM`.
    #[error("invalid date-time: {value} (expected YYYY-MM-DD HH:MM)")]
    InvalidDateTime {
        /// The rejected input.
        value: String,
    },

    /// A required input field was empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A schedule key derived from the sequence counter was already in
    /// the tree. Keys are derived from a monotonic counter, so this
    /// indicates a corrupted counter in the loaded state.
    #[error("schedule key already present: {key}")]
    DuplicateScheduleKey {
        /// The colliding key.
        key: ScheduleKey,
    },

    /// Every base-36 appointment code is attached to an active
    /// appointment.
    #[error("appointment code space exhausted")]
    CodeSpaceExhausted,
}

/// Result type for clinic store operations.
pub type ClinicResult<T> = Result<T, ClinicError>;

/// Locations of the persisted state files.
#[derive(Debug, Clone)]
pub struct StateFiles {
    /// The JSON state document.
    pub state_file: PathBuf,
    /// The flat CSV mirror of patient identity fields.
    pub csv_file: PathBuf,
}

/// Default name of the JSON state document.
pub const STATE_FILE_NAME: &str = "records.json";

/// Default name of the CSV mirror.
pub const CSV_FILE_NAME: &str = "records.csv";

impl StateFiles {
    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            state_file: dir.join(STATE_FILE_NAME),
            csv_file: dir.join(CSV_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_files_in_dir() {
        let files = StateFiles::in_dir("/tmp/clinic");
        assert!(files.state_file.ends_with("records.json"));
        assert!(files.csv_file.ends_with("records.csv"));
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = ClinicError::PatientNotFound {
            patient_id: "P9".to_string(),
        };
        assert_eq!(err.to_string(), "patient not found: P9");

        let err = ClinicError::SeverityOutOfRange { severity: 11 };
        assert!(err.to_string().contains("11"));
    }
}
