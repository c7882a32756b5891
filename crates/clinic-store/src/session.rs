//! Session-level composition of the core structures.

use clinic_types::{Appointment, Patient, ScheduleKey, VisitHistory};

use crate::code;
use crate::record_table::RecordTable;
use crate::schedule_tree::{InOrder, ScheduleTree};
use crate::triage::TriageQueue;
use crate::types::{ClinicError, ClinicResult};

/// One interactive session's worth of clinic state.
///
/// Owns the patient registry, the triage queue, the appointment
/// schedule, the derived code index, and the appointment sequence
/// counter. Everything is explicit instance state — no module-level
/// globals — so sessions are independently constructible in tests.
///
/// The code index maps each active appointment code 1:1 to its schedule
/// key. It is a denormalized view of the tree; [`rebuild_code_index`]
/// reconstructs it from scratch and runs on every load.
///
/// [`rebuild_code_index`]: ClinicSession::rebuild_code_index
#[derive(Debug, Default)]
pub struct ClinicSession {
    registry: RecordTable<Patient>,
    triage: TriageQueue,
    schedule: ScheduleTree<Appointment>,
    code_index: RecordTable<ScheduleKey>,
    appt_seq: u64,
}

impl ClinicSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a session from loaded state.
    ///
    /// The code index is not part of the persisted state; it is rebuilt
    /// from the schedule here, which also assigns fresh codes to any
    /// appointment that lost its own.
    pub fn from_parts(
        registry: RecordTable<Patient>,
        triage: TriageQueue,
        schedule: ScheduleTree<Appointment>,
        appt_seq: u64,
    ) -> Self {
        let mut session = Self {
            registry,
            triage,
            schedule,
            code_index: RecordTable::new(),
            appt_seq,
        };
        session.rebuild_code_index();
        session
    }

    // ── Registry ──────────────────────────────────────────────────────

    /// Registers a new patient.
    ///
    /// Rejects an empty id and an id that is already taken; the registry
    /// is insert-only from this path, never silently overwritten.
    pub fn register_patient(&mut self, patient: Patient) -> ClinicResult<()> {
        if patient.patient_id.trim().is_empty() {
            return Err(ClinicError::EmptyField {
                field: "patient_id",
            });
        }
        if self.registry.contains(&patient.patient_id) {
            return Err(ClinicError::DuplicatePatient {
                patient_id: patient.patient_id,
            });
        }
        self.registry.put(patient.patient_id.clone(), patient);
        Ok(())
    }

    /// Looks up a patient by id.
    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.registry.get(patient_id)
    }

    /// Appends a visit entry to a patient's history.
    pub fn add_visit(&mut self, patient_id: &str, entry: &str) -> ClinicResult<()> {
        match self.registry.get_mut(patient_id) {
            Some(patient) => {
                patient.add_visit(entry);
                Ok(())
            }
            None => Err(ClinicError::PatientNotFound {
                patient_id: patient_id.to_string(),
            }),
        }
    }

    /// Borrows a patient's visit history for display.
    pub fn visit_history(&self, patient_id: &str) -> ClinicResult<&VisitHistory> {
        self.registry
            .get(patient_id)
            .map(|patient| &patient.visit_history)
            .ok_or_else(|| ClinicError::PatientNotFound {
                patient_id: patient_id.to_string(),
            })
    }

    // ── Triage ────────────────────────────────────────────────────────

    /// Adds a registered patient to the emergency triage queue.
    pub fn admit_emergency(
        &mut self,
        patient_id: &str,
        severity: u8,
        complaint: &str,
    ) -> ClinicResult<()> {
        let Some(patient) = self.registry.get(patient_id) else {
            return Err(ClinicError::PatientNotFound {
                patient_id: patient_id.to_string(),
            });
        };
        let payload = format!(
            "EMERGENCY pid={} name={} sev={} issue={}",
            patient_id, patient.name, severity, complaint
        );
        self.triage.enqueue(severity, payload)
    }

    /// Removes and returns the most urgent triage entry.
    pub fn treat_next(&mut self) -> Option<(u8, String)> {
        self.triage.dequeue()
    }

    // ── Schedule ──────────────────────────────────────────────────────

    /// Books an appointment for a registered patient.
    ///
    /// Parses `YYYY-MM-DD HH:MM` input, draws a fresh code and sequence
    /// slot, inserts under the derived schedule key, indexes the code,
    /// and records the booking in the patient's visit history.
    pub fn schedule_appointment(
        &mut self,
        patient_id: &str,
        datetime_text: &str,
    ) -> ClinicResult<(ScheduleKey, Appointment)> {
        if !self.registry.contains(patient_id) {
            return Err(ClinicError::PatientNotFound {
                patient_id: patient_id.to_string(),
            });
        }
        let scheduled_at = Appointment::parse_datetime(datetime_text).ok_or_else(|| {
            ClinicError::InvalidDateTime {
                value: datetime_text.to_string(),
            }
        })?;

        let (slot, code) = code::next_free_code(&mut self.appt_seq, &self.code_index)?;
        let appt = Appointment::new(patient_id, scheduled_at, code);
        let key = appt.sort_key(slot);
        if !self.schedule.insert(key, appt.clone()) {
            return Err(ClinicError::DuplicateScheduleKey { key });
        }
        self.code_index.put(appt.code.clone(), key);

        if let Some(patient) = self.registry.get_mut(patient_id) {
            patient.add_visit(format!("APPT SCHEDULED [{}] -> {}", appt.code, appt));
        }
        Ok((key, appt))
    }

    /// Cancels an appointment by its code.
    ///
    /// A code whose index entry points at a key no longer in the tree is
    /// treated as not found and the stale entry is dropped.
    pub fn cancel_appointment(&mut self, code: &str) -> ClinicResult<Appointment> {
        let code = code.trim().to_ascii_uppercase();
        let Some(&key) = self.code_index.get(&code) else {
            return Err(ClinicError::AppointmentNotFound { code });
        };
        let Some(appt) = self.schedule.find(key).cloned() else {
            self.code_index.remove(&code);
            return Err(ClinicError::AppointmentNotFound { code });
        };

        self.schedule.delete(key);
        self.code_index.remove(&code);
        if let Some(patient) = self.registry.get_mut(&appt.patient_id) {
            patient.add_visit(format!("APPT CANCELED [{code}] -> {appt}"));
        }
        Ok(appt)
    }

    /// Moves an appointment to a new date-time, keeping its code.
    ///
    /// Implemented as delete(old key) + insert(new key): the tree has no
    /// native move operation. The new key consumes a fresh sequence
    /// slot.
    pub fn reschedule_appointment(
        &mut self,
        code: &str,
        datetime_text: &str,
    ) -> ClinicResult<(ScheduleKey, Appointment)> {
        let code = code.trim().to_ascii_uppercase();
        let scheduled_at = Appointment::parse_datetime(datetime_text).ok_or_else(|| {
            ClinicError::InvalidDateTime {
                value: datetime_text.to_string(),
            }
        })?;

        let Some(&old_key) = self.code_index.get(&code) else {
            return Err(ClinicError::AppointmentNotFound { code });
        };
        let Some(old_appt) = self.schedule.find(old_key).cloned() else {
            self.code_index.remove(&code);
            return Err(ClinicError::AppointmentNotFound { code });
        };

        self.schedule.delete(old_key);
        let slot = self.appt_seq;
        self.appt_seq += 1;
        let new_appt = Appointment::new(old_appt.patient_id.clone(), scheduled_at, code.clone());
        let new_key = new_appt.sort_key(slot);
        if !self.schedule.insert(new_key, new_appt.clone()) {
            // restore the original booking before surfacing the error
            self.schedule.insert(old_key, old_appt);
            return Err(ClinicError::DuplicateScheduleKey { key: new_key });
        }
        self.code_index.put(code.clone(), new_key);

        if let Some(patient) = self.registry.get_mut(&new_appt.patient_id) {
            patient.add_visit(format!(
                "APPT RESCHEDULED [{code}] -> old={old_appt} new={new_appt}"
            ));
        }
        Ok((new_key, new_appt))
    }

    /// Chronological listing of `(key, appointment)` pairs.
    pub fn appointments(&self) -> InOrder<'_, Appointment> {
        self.schedule.iter()
    }

    /// Reconstructs the code index from the schedule.
    ///
    /// Appointments with an empty code (possible after loading older or
    /// hand-edited state) get a fresh one assigned. Afterwards the index
    /// maps every active code 1:1 to its key.
    pub fn rebuild_code_index(&mut self) {
        let mut index = RecordTable::new();
        let keys: Vec<ScheduleKey> = self.schedule.iter().map(|(key, _)| key).collect();
        for key in keys {
            let needs_code = self
                .schedule
                .find(key)
                .is_some_and(|appt| appt.code.is_empty());
            if needs_code {
                if let Ok((_, fresh)) = code::next_free_code(&mut self.appt_seq, &index) {
                    if let Some(appt) = self.schedule.find_mut(key) {
                        appt.code = fresh;
                    }
                }
            }
            if let Some(appt) = self.schedule.find(key) {
                index.put(appt.code.clone(), key);
            }
        }
        self.code_index = index;
    }

    // ── State access for persistence and display ──────────────────────

    /// The patient registry.
    pub fn registry(&self) -> &RecordTable<Patient> {
        &self.registry
    }

    /// The triage queue.
    pub fn triage(&self) -> &TriageQueue {
        &self.triage
    }

    /// The appointment schedule.
    pub fn schedule(&self) -> &ScheduleTree<Appointment> {
        &self.schedule
    }

    /// The code → schedule-key index.
    pub fn code_index(&self) -> &RecordTable<ScheduleKey> {
        &self.code_index
    }

    /// Next value of the appointment sequence counter.
    pub fn appt_seq(&self) -> u64 {
        self.appt_seq
    }

    /// Number of registered patients.
    pub fn patient_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of booked appointments.
    pub fn appointment_count(&self) -> usize {
        self.schedule.len()
    }

    /// Number of waiting triage entries.
    pub fn triage_count(&self) -> usize {
        self.triage.len()
    }
}
