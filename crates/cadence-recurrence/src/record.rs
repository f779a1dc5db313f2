//! Flat, storage-shaped recurrence rules and their conversion into
//! [`RecurrenceRule`].
//!
//! The persistence layer keeps one row per rule with every field optional
//! except `type`. [`RecurrenceRecord::validate`] is the strict entry point used
//! when a rule is created or edited; [`RecurrenceRecord::to_rule_lenient`] is
//! the total conversion used when evaluating rows that were stored before
//! validation existed (an unusable rule becomes one that never matches).

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{RecurrenceError, Result},
    types::{
        weekday_from_index, weekday_index, DaySet, Interval, MonthlyPattern, RecurrenceRule,
        RuleKind, WeekOrdinal,
    },
};

/// A recurrence rule as stored: `type` plus optional kind-specific fields.
///
/// Integer fields are signed so that out-of-domain values coming from storage
/// or a request body survive long enough to be reported by [`validate`].
///
/// [`validate`]: RecurrenceRecord::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRecord {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(default = "default_interval")]
    pub interval: i64,
    /// 0 = Sunday … 6 = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<i64>,
    /// 1..=5, or -1 for the last occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<i64>,
}

fn default_interval() -> i64 {
    1
}

impl Default for RecurrenceRecord {
    fn default() -> Self {
        Self {
            kind: RuleKind::None,
            interval: default_interval(),
            days_of_week: None,
            day_of_month: None,
            month_of_year: None,
            week_of_month: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Strict,
    Lenient,
}

impl RecurrenceRecord {
    /// Strict conversion: every field must be in range and the kind must have
    /// the fields it needs.
    ///
    /// A monthly record carrying both `weekOfMonth` + `daysOfWeek` and
    /// `dayOfMonth` resolves to the weekday-ordinal form.
    pub fn validate(&self) -> Result<RecurrenceRule> {
        self.build(Mode::Strict)
    }

    /// Total conversion: never fails.
    ///
    /// `interval < 1` is read as 1 and `dayOfMonth > 31` as 31; a record that
    /// still cannot produce a rule becomes [`RecurrenceRule::None`].
    pub fn to_rule_lenient(&self) -> RecurrenceRule {
        self.build(Mode::Lenient).unwrap_or_else(|e| {
            warn!(kind = %self.kind, error = %e, "unusable recurrence rule; it will never match");
            RecurrenceRule::None
        })
    }

    fn build(&self, mode: Mode) -> Result<RecurrenceRule> {
        match self.kind {
            RuleKind::None => Ok(RecurrenceRule::None),
            RuleKind::Daily => Ok(RecurrenceRule::Daily {
                interval: self.interval(mode)?,
            }),
            RuleKind::Weekly => {
                let interval = self.interval(mode)?;
                let days = self.day_set(mode)?;
                if days.is_empty() {
                    return Err(RecurrenceError::Underspecified {
                        kind: RuleKind::Weekly,
                        reason: "daysOfWeek must name at least one weekday",
                    });
                }
                Ok(RecurrenceRule::Weekly { interval, days })
            }
            RuleKind::Monthly => {
                let interval = self.interval(mode)?;
                let pattern = self.monthly_pattern(mode)?;
                Ok(RecurrenceRule::Monthly { interval, pattern })
            }
            RuleKind::Yearly => {
                let (Some(month), Some(day)) = (self.month_of_year, self.day_of_month) else {
                    return Err(RecurrenceError::Underspecified {
                        kind: RuleKind::Yearly,
                        reason: "monthOfYear and dayOfMonth are both required",
                    });
                };
                if !(1..=12).contains(&month) {
                    return Err(invalid("monthOfYear", format!("{month} is not in 1..=12")));
                }
                Ok(RecurrenceRule::Yearly {
                    month: month as u32,
                    day: day_of_month(day, mode)?,
                })
            }
        }
    }

    fn interval(&self, mode: Mode) -> Result<Interval> {
        if let Some(interval) = u32::try_from(self.interval).ok().and_then(Interval::new) {
            return Ok(interval);
        }
        match (self.interval > 0, mode) {
            (true, Mode::Lenient) => {
                debug!(interval = self.interval, "oversized interval saturated");
                Ok(Interval::MAX)
            }
            (false, Mode::Lenient) => {
                debug!(interval = self.interval, "non-positive interval read as 1");
                Ok(Interval::ONE)
            }
            (true, Mode::Strict) => Err(invalid(
                "interval",
                format!("{} exceeds the maximum interval {}", self.interval, u32::MAX),
            )),
            (false, Mode::Strict) => Err(invalid(
                "interval",
                format!("{} is not a positive integer", self.interval),
            )),
        }
    }

    fn day_set(&self, mode: Mode) -> Result<DaySet> {
        let mut days = DaySet::EMPTY;
        for &index in self.days_of_week.iter().flatten() {
            match weekday_from_index(index) {
                Some(day) => days.insert(day),
                // an unknown index can never equal a real weekday
                None if mode == Mode::Lenient => {}
                None => return Err(invalid("daysOfWeek", format!("{index} is not in 0..=6"))),
            }
        }
        Ok(days)
    }

    fn monthly_pattern(&self, mode: Mode) -> Result<MonthlyPattern> {
        let first_day = self.days_of_week.as_deref().and_then(<[i64]>::first).copied();

        if let (Some(week), Some(first_day)) = (self.week_of_month, first_day) {
            if self.day_of_month.is_some() {
                debug!(week, "monthly rule has both forms; using weekday ordinal");
            }
            let week = WeekOrdinal::from_wire(week)
                .ok_or_else(|| invalid("weekOfMonth", format!("{week} is not in 1..=5 or -1")))?;
            let weekday = weekday_from_index(first_day)
                .ok_or_else(|| invalid("daysOfWeek", format!("{first_day} is not in 0..=6")))?;
            let given = self.days_of_week.as_ref().map_or(0, Vec::len);
            if mode == Mode::Strict && given > 1 {
                return Err(invalid(
                    "daysOfWeek",
                    "a weekday-ordinal monthly rule takes exactly one weekday".to_string(),
                ));
            }
            return Ok(MonthlyPattern::Weekday { week, weekday });
        }

        match self.day_of_month {
            Some(day) => Ok(MonthlyPattern::DayOfMonth(day_of_month(day, mode)?)),
            None => Err(RecurrenceError::Underspecified {
                kind: RuleKind::Monthly,
                reason: "needs dayOfMonth, or weekOfMonth with one weekday in daysOfWeek",
            }),
        }
    }
}

fn day_of_month(day: i64, mode: Mode) -> Result<u32> {
    match day {
        1..=31 => Ok(day as u32),
        32.. if mode == Mode::Lenient => Ok(31),
        _ => Err(invalid("dayOfMonth", format!("{day} is not in 1..=31"))),
    }
}

fn invalid(field: &'static str, reason: String) -> RecurrenceError {
    RecurrenceError::InvalidConfiguration { field, reason }
}

fn wire_day(day: Weekday) -> i64 {
    i64::from(weekday_index(day))
}

impl From<RecurrenceRule> for RecurrenceRecord {
    fn from(rule: RecurrenceRule) -> Self {
        let mut record = RecurrenceRecord {
            kind: rule.kind(),
            interval: i64::from(rule.interval().get()),
            ..Default::default()
        };
        match rule {
            RecurrenceRule::None | RecurrenceRule::Daily { .. } => {}
            RecurrenceRule::Weekly { days, .. } => {
                record.days_of_week = Some(days.iter().map(wire_day).collect());
            }
            RecurrenceRule::Monthly {
                pattern: MonthlyPattern::DayOfMonth(day),
                ..
            } => record.day_of_month = Some(i64::from(day)),
            RecurrenceRule::Monthly {
                pattern: MonthlyPattern::Weekday { week, weekday },
                ..
            } => {
                record.week_of_month = Some(week.to_wire());
                record.days_of_week = Some(vec![wire_day(weekday)]);
            }
            RecurrenceRule::Yearly { month, day } => {
                record.month_of_year = Some(i64::from(month));
                record.day_of_month = Some(i64::from(day));
            }
        }
        record
    }
}

impl TryFrom<RecurrenceRecord> for RecurrenceRule {
    type Error = RecurrenceError;

    fn try_from(record: RecurrenceRecord) -> Result<Self> {
        record.validate()
    }
}
