//! Scheduled appointment record.

use std::fmt;

use chrono::NaiveDateTime;

use crate::{ScheduleKey, KEY_MINUTE_SPAN};

/// Format accepted for appointment date-times, minute resolution.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A scheduled appointment.
///
/// Holds a foreign reference to the patient (not ownership), the
/// scheduled time truncated to whole minutes, and the 5-character base-36
/// code handed out as the external booking handle. The schedule stores
/// appointments under a composite [`ScheduleKey`] derived from the
/// minute timestamp and a session-wide sequence counter, so two bookings
/// on the same minute still get distinct, insertion-ordered keys.
///
/// # Examples
///
/// ```
/// use clinic_types::Appointment;
///
/// let when = Appointment::parse_datetime("2024-01-01 09:00").unwrap();
/// let appt = Appointment::new("P1", when, "00A3Z");
///
/// assert_eq!(appt.datetime_text(), "2024-01-01 09:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    /// Registry id of the patient the slot belongs to.
    pub patient_id: String,
    /// Scheduled time, normalized to whole minutes.
    pub scheduled_at: NaiveDateTime,
    /// External booking code, unique across the active schedule.
    pub code: String,
}

impl Appointment {
    /// Creates an appointment, truncating the time to minute resolution.
    pub fn new(
        patient_id: impl Into<String>,
        scheduled_at: NaiveDateTime,
        code: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            scheduled_at: truncate_to_minute(scheduled_at),
            code: code.into(),
        }
    }

    /// Parses `YYYY-MM-DD HH:MM` text into a minute-resolution time.
    ///
    /// Returns `None` for anything that doesn't match the format.
    pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text.trim(), DATETIME_FORMAT).ok()
    }

    /// Minutes since the Unix epoch for the scheduled time.
    pub fn minute_timestamp(&self) -> i64 {
        self.scheduled_at.and_utc().timestamp() / 60
    }

    /// Derives the schedule key for this appointment and sequence slot.
    pub fn sort_key(&self, sequence: u64) -> ScheduleKey {
        self.minute_timestamp() * KEY_MINUTE_SPAN + sequence as i64
    }

    /// Formats the scheduled time back to `YYYY-MM-DD HH:MM`.
    pub fn datetime_text(&self) -> String {
        self.scheduled_at.format(DATETIME_FORMAT).to_string()
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for patient {}", self.datetime_text(), self.patient_id)
    }
}

fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    use chrono::{DurationRound, TimeDelta};
    value
        .duration_trunc(TimeDelta::minutes(1))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_appointment(datetime: &str) -> Appointment {
        let when = Appointment::parse_datetime(datetime).unwrap();
        Appointment::new("P1", when, "00001")
    }

    #[test]
    fn test_parse_datetime() {
        assert!(Appointment::parse_datetime("2024-01-01 09:00").is_some());
        assert!(Appointment::parse_datetime("  2024-01-01 09:00  ").is_some());
        assert!(Appointment::parse_datetime("2024-01-01").is_none());
        assert!(Appointment::parse_datetime("01/01/2024 09:00").is_none());
        assert!(Appointment::parse_datetime("").is_none());
    }

    #[test]
    fn test_new_truncates_seconds() {
        let with_seconds = "2024-01-01T09:00:42"
            .parse::<NaiveDateTime>()
            .unwrap();
        let appt = Appointment::new("P1", with_seconds, "00001");
        assert_eq!(appt.datetime_text(), "2024-01-01 09:00");
        assert_eq!(appt.scheduled_at.and_utc().timestamp() % 60, 0);
    }

    #[test]
    fn test_minute_timestamp() {
        let appt = make_test_appointment("1970-01-01 01:00");
        assert_eq!(appt.minute_timestamp(), 60);
    }

    #[test]
    fn test_sort_key_separates_same_minute() {
        let first = make_test_appointment("2024-01-01 09:00");
        let second = make_test_appointment("2024-01-01 09:00");

        let key_a = first.sort_key(7);
        let key_b = second.sort_key(8);
        assert_ne!(key_a, key_b);
        assert!(key_a < key_b);
        assert_eq!(key_a / KEY_MINUTE_SPAN, key_b / KEY_MINUTE_SPAN);
    }

    #[test]
    fn test_datetime_text_round_trip() {
        let appt = make_test_appointment("2031-12-24 23:59");
        let reparsed = Appointment::parse_datetime(&appt.datetime_text()).unwrap();
        assert_eq!(reparsed, appt.scheduled_at);
    }
}
