//! `cadence-recurrence`: decides on which calendar days a recurring task is due.
//!
//! # Overview
//!
//! A task carries a [`RecurrenceRule`] and an anchor date (usually its
//! creation date). [`matcher::matches`] answers "is it due on this day?";
//! the [`expand`] module applies that answer across a day, a week or a month
//! of tasks. Everything is pure, synchronous and allocation-light, so it can
//! be called from any thread or request handler without coordination.
//!
//! # Rule variants
//!
//! | Variant   | Due on                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `None`    | Never                                                       |
//! | `Daily`   | Every N days from the anchor                                |
//! | `Weekly`  | Listed weekdays of every N-th Monday-aligned week           |
//! | `Monthly` | Day D (clamped) or the Nth/last weekday, every N months     |
//! | `Yearly`  | Month M, day D (clamped; Feb 29 → Feb 28 in common years)   |
//!
//! Stored rules arrive as [`RecurrenceRecord`]s; validate them when they are
//! written and use [`RecurrenceRecord::to_rule_lenient`] when reading rows
//! that may predate validation.

pub mod calendar;
pub mod describe;
pub mod error;
pub mod expand;
pub mod matcher;
pub mod record;
pub mod types;

pub use describe::{describe, describe_in, describe_with};
pub use error::{RecurrenceError, Result};
pub use expand::{
    next_occurrence, occurrences_between, tasks_by_month_day, tasks_by_weekday, tasks_on_date,
};
pub use matcher::matches;
pub use record::RecurrenceRecord;
pub use types::{
    DaySet, Interval, MonthlyPattern, RecurrenceRule, RuleKind, Scheduled, Task, WeekOrdinal,
};
