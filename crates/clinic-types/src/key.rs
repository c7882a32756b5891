//! Schedule key type.
//!
//! This module provides a type alias for the composite ordering key used
//! by the appointment schedule.

/// A composite appointment ordering key.
///
/// Schedule keys combine a minute-resolution timestamp with an insertion
/// sequence number: `minutes_since_epoch * KEY_MINUTE_SPAN + sequence`.
/// The sequence component keeps keys unique even when several
/// appointments land on the same minute.
///
/// # Examples
///
/// ```
/// use clinic_types::{ScheduleKey, KEY_MINUTE_SPAN};
///
/// let minute = 28_401_840i64; // minutes since the Unix epoch
/// let key: ScheduleKey = minute * KEY_MINUTE_SPAN + 7;
/// ```
pub type ScheduleKey = i64;

/// Number of key slots reserved per minute of schedule time.
pub const KEY_MINUTE_SPAN: i64 = 1000;
