//! The active logged-in identity and its lifecycle.

pub mod manager;
pub mod types;

pub use manager::SessionManager;
pub use types::{AuthError, SessionIdentity, SessionLocation, SessionState};
