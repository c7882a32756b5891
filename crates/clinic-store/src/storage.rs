//! Best-effort persistence for session state.
//!
//! The whole session is written to one JSON document after every
//! mutation, alongside a flat CSV mirror of patient identity fields
//! used for bulk import. Loading is deliberately forgiving: a missing,
//! unreadable, or corrupt state file falls back to an empty session
//! (with a warning) instead of failing hard, and a failed write is
//! logged while the in-memory state stays authoritative for the rest
//! of the session. There is no atomic-rename or locking protection —
//! one interactive process per data directory is assumed.

use std::fs;
use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use clinic_types::{Appointment, Gender, Patient, ScheduleKey};

use crate::record_table::RecordTable;
use crate::schedule_tree::ScheduleTree;
use crate::session::ClinicSession;
use crate::triage::TriageQueue;
use crate::types::{ClinicResult, StateFiles};

/// Column order of the CSV mirror.
const CSV_HEADERS: [&str; 6] = [
    "patient_id",
    "name",
    "age",
    "gender",
    "phone",
    "medical_notes",
];

/// Serialized shape of the whole session.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    patients: Vec<Patient>,
    #[serde(default)]
    triage: Vec<TriageRecord>,
    #[serde(default)]
    appointments: Vec<AppointmentRecord>,
    #[serde(default)]
    appt_seq: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct TriageRecord {
    priority: u8,
    payload: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AppointmentRecord {
    key: ScheduleKey,
    code: String,
    patient_id: String,
    datetime: String,
}

/// One CSV mirror row; every field arrives as text and is validated
/// before it becomes a patient.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    patient_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    medical_notes: String,
}

/// Loads persisted state and rebuilds the in-memory session.
///
/// Returns the session together with the number of patients imported
/// from the CSV mirror (present there but absent from the state
/// document). Never fails: damaged inputs degrade to an empty session.
pub fn load_state(files: &StateFiles) -> (ClinicSession, usize) {
    let document = read_state_document(files);

    let mut registry = RecordTable::new();
    for patient in document.patients {
        registry.put(patient.patient_id.clone(), patient);
    }

    let mut triage = TriageQueue::new();
    for record in document.triage {
        if let Err(err) = triage.enqueue(record.priority, record.payload) {
            warn!("skipping persisted triage entry: {err}");
        }
    }

    let mut schedule = ScheduleTree::new();
    for record in document.appointments {
        let Some(scheduled_at) = Appointment::parse_datetime(&record.datetime) else {
            warn!(
                "skipping appointment {}: bad datetime {:?}",
                record.code, record.datetime
            );
            continue;
        };
        let appt = Appointment::new(record.patient_id, scheduled_at, record.code);
        if !schedule.insert(record.key, appt) {
            warn!("skipping appointment with duplicate key {}", record.key);
        }
    }

    let mut imported = 0;
    for patient in read_csv_patients(files) {
        if !registry.contains(&patient.patient_id) {
            registry.put(patient.patient_id.clone(), patient);
            imported += 1;
        }
    }

    let session = ClinicSession::from_parts(registry, triage, schedule, document.appt_seq);
    (session, imported)
}

/// Writes the whole session to disk, best effort.
///
/// A failure leaves the previous files as they were (or partially
/// written), is reported via `tracing`, and is otherwise swallowed:
/// the in-memory session stays authoritative.
pub fn save_state(session: &ClinicSession, files: &StateFiles) {
    if let Err(err) = write_state_document(session, files) {
        warn!("failed to persist state document: {err}");
    }
    if let Err(err) = write_csv_mirror(session, files) {
        warn!("failed to persist CSV mirror: {err}");
    }
}

fn read_state_document(files: &StateFiles) -> StateDocument {
    let raw = match fs::read_to_string(&files.state_file) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "no state document at {}, starting fresh",
                files.state_file.display()
            );
            return StateDocument::default();
        }
        Err(err) => {
            warn!("unreadable state document, starting fresh: {err}");
            return StateDocument::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(err) => {
            warn!("corrupt state document, starting fresh: {err}");
            StateDocument::default()
        }
    }
}

fn write_state_document(session: &ClinicSession, files: &StateFiles) -> ClinicResult<()> {
    let document = StateDocument {
        patients: sorted_patients(session),
        triage: session
            .triage()
            .entries()
            .into_iter()
            .map(|(priority, payload)| TriageRecord { priority, payload })
            .collect(),
        appointments: session
            .schedule()
            .iter()
            .map(|(key, appt)| AppointmentRecord {
                key,
                code: appt.code.clone(),
                patient_id: appt.patient_id.clone(),
                datetime: appt.datetime_text(),
            })
            .collect(),
        appt_seq: session.appt_seq(),
    };

    let raw = serde_json::to_string_pretty(&document)?;
    fs::write(&files.state_file, raw)?;
    Ok(())
}

/// Patients sorted by id for deterministic output.
fn sorted_patients(session: &ClinicSession) -> Vec<Patient> {
    let mut patients: Vec<Patient> = session
        .registry()
        .iter()
        .map(|(_, patient)| patient.clone())
        .collect();
    patients.sort_by(|a, b| a.patient_id.cmp(&b.patient_id));
    patients
}

fn read_csv_patients(files: &StateFiles) -> Vec<Patient> {
    if !files.csv_file.exists() {
        return Vec::new();
    }

    let mut reader = match csv::Reader::from_path(&files.csv_file) {
        Ok(reader) => reader,
        Err(err) => {
            warn!("unreadable CSV mirror, skipping import: {err}");
            return Vec::new();
        }
    };

    let mut patients = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        match row {
            Ok(row) => {
                if let Some(patient) = row_to_patient(&row) {
                    patients.push(patient);
                }
            }
            Err(err) => warn!("skipping malformed CSV row: {err}"),
        }
    }
    patients
}

/// Validates one mirror row. Rows with missing required fields, an
/// unparseable age, or an unknown gender code are dropped.
fn row_to_patient(row: &CsvRow) -> Option<Patient> {
    let patient_id = row.patient_id.trim();
    let name = row.name.trim();
    let phone = row.phone.trim();
    if patient_id.is_empty() || name.is_empty() || phone.is_empty() {
        return None;
    }

    let age: u32 = row.age.trim().parse().ok()?;
    let gender = Gender::parse(&row.gender)?;
    let notes = row.medical_notes.trim();
    let medical_notes = (!notes.is_empty()).then(|| notes.to_string());

    Some(Patient::new(
        patient_id,
        name,
        age,
        gender,
        phone,
        medical_notes,
    ))
}

fn write_csv_mirror(session: &ClinicSession, files: &StateFiles) -> ClinicResult<()> {
    let mut writer = csv::Writer::from_path(&files.csv_file)?;
    writer.write_record(CSV_HEADERS)?;

    for patient in sorted_patients(session) {
        let age = patient.age.to_string();
        let gender = patient.gender.as_code().to_string();
        writer.write_record([
            patient.patient_id.as_str(),
            patient.name.as_str(),
            age.as_str(),
            gender.as_str(),
            patient.phone.as_str(),
            patient.medical_notes.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
