//! Per-user account records and their repository.

pub mod repository;
pub mod types;

pub use repository::{AccountError, AccountRepository};
pub use types::{AccountRecord, ProfileUpdate, TrainerFields};
