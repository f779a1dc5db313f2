//! Batch views over a task list: one day, one week, one month, and bounded
//! per-rule occurrence search.
//!
//! Coarser views hide high-frequency rules that would otherwise fill every
//! cell: the week view drops daily rules, the month view drops daily and
//! weekly rules.

use std::collections::BTreeMap;

use cadence_core::config::ExpansionConfig;
use chrono::{Days, NaiveDate};
use tracing::{debug, trace};

use crate::{
    calendar::{days_between, last_day_of_month},
    error::{RecurrenceError, Result},
    matcher::matches,
    types::{RecurrenceRule, RuleKind, Scheduled},
};

/// Every task in `tasks` that is due on `date`, in input order.
pub fn tasks_on_date<T: Scheduled>(date: NaiveDate, tasks: &[T]) -> Vec<&T> {
    let due: Vec<&T> = tasks
        .iter()
        .filter(|task| matches(task.rule(), task.anchor(), date))
        .collect();
    trace!(%date, due = due.len(), total = tasks.len(), "resolved tasks for date");
    due
}

/// Tasks due on each of the seven days starting at `week_start`, daily rules
/// excluded. Keys are day offsets 0..=6; days with nothing due are absent.
pub fn tasks_by_weekday<T: Scheduled>(week_start: NaiveDate, tasks: &[T]) -> BTreeMap<u8, Vec<&T>> {
    let mut buckets = BTreeMap::new();
    for (offset, date) in (0u8..7).zip(week_start.iter_days()) {
        let due = due_excluding(date, tasks, &[RuleKind::Daily]);
        if !due.is_empty() {
            buckets.insert(offset, due);
        }
    }
    debug!(%week_start, days = buckets.len(), "expanded week view");
    buckets
}

/// Tasks due on each day of `month` (1-based) in `year`, daily and weekly
/// rules excluded. Keys are days of the month; days with nothing due are
/// absent. A month outside 1..=12 yields an empty map.
pub fn tasks_by_month_day<T: Scheduled>(year: i32, month: u32, tasks: &[T]) -> BTreeMap<u32, Vec<&T>> {
    let mut buckets = BTreeMap::new();
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        debug!(year, month, "month view requested for an invalid month");
        return buckets;
    };
    for (day, date) in (1..=last_day_of_month(year, month)).zip(first.iter_days()) {
        let due = due_excluding(date, tasks, &[RuleKind::Daily, RuleKind::Weekly]);
        if !due.is_empty() {
            buckets.insert(day, due);
        }
    }
    debug!(year, month, days = buckets.len(), "expanded month view");
    buckets
}

fn due_excluding<'a, T: Scheduled>(date: NaiveDate, tasks: &'a [T], hidden: &[RuleKind]) -> Vec<&'a T> {
    tasks
        .iter()
        .filter(|task| !hidden.contains(&task.rule().kind()))
        .filter(|task| matches(task.rule(), task.anchor(), date))
        .collect()
}

/// Due dates of `rule` in the closed range `[start, end]`.
///
/// An inverted range is empty. A range wider than `limits.max_range_days`
/// is refused rather than truncated.
pub fn occurrences_between(
    rule: &RecurrenceRule,
    anchor: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
    limits: &ExpansionConfig,
) -> Result<Vec<NaiveDate>> {
    let span = days_between(start, end) + 1;
    if span <= 0 {
        return Ok(Vec::new());
    }
    if span > i64::from(limits.max_range_days) {
        return Err(RecurrenceError::RangeTooLarge {
            days: span,
            max: limits.max_range_days,
        });
    }
    Ok(start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| matches(rule, anchor, *date))
        .collect())
}

/// First due date of `rule` on or after `from`, looking at most
/// `limits.search_horizon_days` days ahead.
pub fn next_occurrence(
    rule: &RecurrenceRule,
    anchor: NaiveDate,
    from: NaiveDate,
    limits: &ExpansionConfig,
) -> Option<NaiveDate> {
    if matches!(rule, RecurrenceRule::None) {
        return None;
    }
    let horizon = limits.search_horizon_days as usize;
    let next = from
        .iter_days()
        .take(horizon)
        .find(|date| matches(rule, anchor, *date));
    if next.is_none() {
        debug!(
            kind = %rule.kind(),
            %from,
            until = ?from.checked_add_days(Days::new(u64::from(limits.search_horizon_days))),
            "no occurrence within search horizon"
        );
    }
    next
}
