use thiserror::Error;

use crate::types::RuleKind;

/// Errors raised at the rule-validation boundary and by bounded expansion.
///
/// Matching itself never fails: an unusable rule simply never matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    /// A field holds a value outside its domain (e.g. `interval = 0`).
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// The rule lacks the fields its kind needs to ever match.
    #[error("Underspecified {kind} rule: {reason}")]
    Underspecified { kind: RuleKind, reason: &'static str },

    /// A range expansion was asked to cover more days than allowed.
    #[error("Range of {days} days exceeds the maximum of {max}")]
    RangeTooLarge { days: i64, max: u32 },
}

impl RecurrenceError {
    /// Short error code string for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            RecurrenceError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            RecurrenceError::Underspecified { .. } => "UNDERSPECIFIED_RULE",
            RecurrenceError::RangeTooLarge { .. } => "RANGE_TOO_LARGE",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
