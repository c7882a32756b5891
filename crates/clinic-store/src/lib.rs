//! # clinic-store
//!
//! Hand-built data structures, session composition, and persistence for
//! the clinic record keeper.
//!
//! The core structures are deliberately written out by hand — a chained
//! hash table ([`RecordTable`]), an unbalanced BST ([`ScheduleTree`]),
//! and a binary max-heap ([`TriageQueue`]) — since their invariants and
//! ordering guarantees are the point of the system. [`ClinicSession`]
//! composes them into the operations the menu layer calls, and
//! [`storage`] reads and writes the JSON state document plus the CSV
//! mirror.

#![warn(missing_docs)]

pub mod code;
pub mod record_table;
pub mod schedule_tree;
pub mod session;
pub mod storage;
pub mod triage;
pub mod types;

pub use record_table::RecordTable;
pub use schedule_tree::ScheduleTree;
pub use session::ClinicSession;
pub use triage::TriageQueue;
pub use types::{ClinicError, ClinicResult, StateFiles};

// Re-export clinic-types for convenience
pub use clinic_types;
