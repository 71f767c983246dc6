//! The append-only booking ledger and the confirmation flow.

pub mod recorder;
pub mod types;

pub use recorder::{BookingError, BookingOutcome, BookingRecorder};
pub use types::Booking;
