//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Profile
// =============================================================================

/// Minimum display name length
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum display name length
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum company name length
pub const MAX_COMPANY_LENGTH: usize = 100;

/// Apprenticeships run for at most this many training years
pub const MAX_TRAINING_YEAR: f64 = 4.0;

/// Phone numbers: optional leading `+`, digits, spaces, dashes
pub const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 \-]{5,18}[0-9]$";

/// Trades an apprentice can be enrolled in
pub const TRADES: &[&str] = &[
    "carpentry",
    "electrical",
    "plumbing",
    "mechanics",
    "hospitality",
    "retail",
    "it",
    "other",
];

// =============================================================================
// Daily log
// =============================================================================

/// Mood scale for the daily log, best first
pub const MOODS: &[&str] = &["great", "good", "okay", "bad", "terrible"];

/// Where the apprentice spent the day
pub const STATUSES: &[&str] = &["workplace", "school", "vacation", "sick", "off"];

/// Maximum note length for a daily log entry
pub const MAX_NOTE_LENGTH: usize = 500;

/// Upper bound for hours worked in one day
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

// =============================================================================
// Question of the day
// =============================================================================

/// Maximum answer length for the question of the day
pub const MAX_ANSWER_LENGTH: usize = 1000;

