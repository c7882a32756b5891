//! Base-36 appointment code generation.

use clinic_types::ScheduleKey;

use crate::record_table::RecordTable;
use crate::types::{ClinicError, ClinicResult};

/// Code alphabet in digit-value order.
const CODE_CHARS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Fixed code width in characters.
pub const CODE_LEN: usize = 5;

/// Total distinct codes: 36^5.
pub const CODE_SPACE: u64 = 60_466_176;

/// Formats a counter value as a fixed-width base-36 code.
///
/// Only the lowest five base-36 digits are kept, left-padded with `'0'`,
/// so the raw encoding wraps after 36^5 values. [`next_free_code`]
/// layers collision handling on top for codes still in use.
///
/// # Examples
///
/// ```
/// use clinic_store::code::format_code;
///
/// assert_eq!(format_code(0), "00000");
/// assert_eq!(format_code(35), "0000Z");
/// assert_eq!(format_code(36), "00010");
/// ```
pub fn format_code(counter: u64) -> String {
    let mut value = counter % CODE_SPACE;
    let mut buf = [0u8; CODE_LEN];
    for slot in buf.iter_mut().rev() {
        *slot = CODE_CHARS[(value % 36) as usize];
        value /= 36;
    }
    buf.iter().map(|&b| b as char).collect()
}

/// Draws the next unused code, advancing the counter past every
/// candidate tried.
///
/// Returns the sequence slot consumed together with its code; the slot
/// doubles as the tie-break component of the schedule key. Codes freed
/// by cancellation are recycled naturally: a candidate is only skipped
/// while the code index still maps it to an active appointment. When
/// the index holds all 36^5 codes the error is immediate.
pub fn next_free_code(
    counter: &mut u64,
    code_index: &RecordTable<ScheduleKey>,
) -> ClinicResult<(u64, String)> {
    next_free_code_in(counter, code_index, CODE_SPACE)
}

fn next_free_code_in(
    counter: &mut u64,
    code_index: &RecordTable<ScheduleKey>,
    space: u64,
) -> ClinicResult<(u64, String)> {
    if code_index.len() as u64 >= space {
        return Err(ClinicError::CodeSpaceExhausted);
    }
    loop {
        let slot = *counter;
        let candidate = format_code(slot % space);
        *counter = counter.wrapping_add(1);
        if !code_index.contains(&candidate) {
            return Ok((slot, candidate));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_fixed_width_and_padded() {
        assert_eq!(format_code(0), "00000");
        assert_eq!(format_code(1), "00001");
        assert_eq!(format_code(35), "0000Z");
        assert_eq!(format_code(36), "00010");
        assert_eq!(format_code(36 * 36), "00100");
        assert_eq!(format_code(CODE_SPACE - 1), "ZZZZZ");
    }

    #[test]
    fn test_format_keeps_lowest_five_digits() {
        assert_eq!(format_code(CODE_SPACE), "00000");
        assert_eq!(format_code(CODE_SPACE + 37), "00011");
    }

    #[test]
    fn test_next_free_code_advances_counter() {
        let index = RecordTable::new();
        let mut counter = 5;

        let (slot, code) = next_free_code(&mut counter, &index).unwrap();
        assert_eq!(slot, 5);
        assert_eq!(code, "00005");
        assert_eq!(counter, 6);
    }

    #[test]
    fn test_next_free_code_skips_active_codes() {
        let mut index = RecordTable::new();
        index.put(format_code(0), 100);
        index.put(format_code(1), 200);
        let mut counter = 0;

        let (slot, code) = next_free_code(&mut counter, &index).unwrap();
        assert_eq!(slot, 2);
        assert_eq!(code, "00002");
        assert_eq!(counter, 3);
    }

    #[test]
    fn test_recycles_code_after_cancellation() {
        let mut index = RecordTable::new();
        index.put(format_code(0), 100);
        index.remove(&format_code(0));
        let mut counter = 0;

        let (_, code) = next_free_code(&mut counter, &index).unwrap();
        assert_eq!(code, "00000");
    }

    #[test]
    fn test_exhausted_space_is_an_error() {
        // exercised against a shrunk space: the production value is 36^5
        let space = 8;
        let mut index = RecordTable::new();
        for value in 0..space {
            index.put(format_code(value), value as ScheduleKey);
        }

        let mut counter = 0;
        assert!(matches!(
            next_free_code_in(&mut counter, &index, space),
            Err(ClinicError::CodeSpaceExhausted)
        ));
    }

    #[test]
    fn test_nearly_full_space_finds_the_gap() {
        let space = 8;
        let mut index = RecordTable::new();
        for value in 0..space {
            if value != 6 {
                index.put(format_code(value), value as ScheduleKey);
            }
        }

        let mut counter = 0;
        let (slot, code) = next_free_code_in(&mut counter, &index, space).unwrap();
        assert_eq!(slot, 6);
        assert_eq!(code, format_code(6));
    }
}
