//! Patient registry record.

use std::fmt;

use crate::{Gender, VisitHistory};

/// A registered patient.
///
/// `patient_id` is globally unique and immutable once created. After
/// registration the record is only ever mutated by appending visit
/// entries; there is no delete-patient operation.
///
/// # Examples
///
/// ```
/// use clinic_types::{Gender, Patient};
///
/// let mut patient = Patient::new("P1", "Jane Doe", 34, Gender::Female, "555-0100", None);
/// patient.add_visit("checkup");
///
/// assert_eq!(patient.visit_history.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    /// Unique identifier chosen at registration.
    pub patient_id: String,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Gender marker.
    pub gender: Gender,
    /// Contact phone number.
    pub phone: String,
    /// Free-text medical notes, if any were given.
    #[cfg_attr(feature = "serde", serde(default))]
    pub medical_notes: Option<String>,
    /// Append-only visit log, oldest first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visit_history: VisitHistory,
}

impl Patient {
    /// Creates a patient with an empty visit history.
    pub fn new(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        phone: impl Into<String>,
        medical_notes: Option<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            age,
            gender,
            phone: phone.into(),
            medical_notes,
            visit_history: VisitHistory::new(),
        }
    }

    /// Appends one entry to the visit history.
    pub fn add_visit(&mut self, entry: impl Into<String>) {
        self.visit_history.append(entry);
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] age {} {} phone {}",
            self.name, self.patient_id, self.age, self.gender, self.phone
        )
    }
}
