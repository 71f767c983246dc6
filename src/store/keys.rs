//! Well-known storage keys.

/// Active session identity. Lives in exactly one scope at a time.
pub const USER_SESSION: &str = "fasta_user";

/// The full conversation ledger (durable scope).
pub const CONVERSATIONS: &str = "fasta_conversations";

/// The append-only booking list (durable scope).
pub const BOOKINGS: &str = "fasta_bookings";

/// One-time demo-data seed guard (durable scope).
pub const CONVERSATIONS_INITIALIZED: &str = "fasta_conversations_initialized";

/// Per-account record key, keyed by email.
pub fn account_key(email: &str) -> String {
    format!("fasta_user_{}", email)
}
