//! # clinic-types
//!
//! Entity definitions for the clinic record keeper.
//!
//! This crate provides the plain data records stored by the core
//! structures: patients with their append-only visit histories,
//! scheduled appointments, and the composite schedule key they are
//! ordered by.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via
//!   serde. Disable this feature for dependency-light usage.
//!
//! ## Usage
//!
//! ```rust
//! use clinic_types::{Appointment, Gender, Patient};
//!
//! let mut patient = Patient::new("P1", "Jane Doe", 34, Gender::Female, "555-0100", None);
//! patient.add_visit("checkup");
//!
//! let when = Appointment::parse_datetime("2024-01-01 09:00").unwrap();
//! let appt = Appointment::new(&patient.patient_id, when, "00001");
//! assert_eq!(appt.minute_timestamp() % 60, 0);
//! ```

#![warn(missing_docs)]

mod appointment;
mod enums;
mod history;
mod key;
mod patient;

// Re-export all public types at crate root
pub use appointment::{Appointment, DATETIME_FORMAT};
pub use enums::Gender;
pub use history::{Entries, VisitHistory};
pub use key::{ScheduleKey, KEY_MINUTE_SPAN};
pub use patient::Patient;

// The timestamp type used throughout is chrono's; re-export the crate so
// downstream code names the same version.
pub use chrono;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _gender = Gender::Other;
        let _history = VisitHistory::new();
        let _key: ScheduleKey = 42;
        assert_eq!(KEY_MINUTE_SPAN, 1000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_patient_serde_shape() {
        let patient = Patient::new("P1", "Jane Doe", 34, Gender::Female, "555-0100", None);
        let value = serde_json::to_value(&patient).unwrap();
        assert_eq!(value["gender"], "F");
        assert_eq!(value["visit_history"], serde_json::json!([]));
    }
}
