use chrono::{Datelike, NaiveDate};

use crate::{
    calendar::{days_between, last_day_of_month, months_between, nth_weekday_of_month, weeks_between},
    types::{Interval, MonthlyPattern, RecurrenceRule},
};

/// Decide whether `rule` is due on `target`.
///
/// Interval counting for daily, weekly and monthly rules starts at `anchor`;
/// dates before the anchor never satisfy an interval greater than one. With an
/// interval of one the anchor is not consulted at all.
///
/// Pure and total: no rule/date combination panics.
pub fn matches(rule: &RecurrenceRule, anchor: NaiveDate, target: NaiveDate) -> bool {
    match rule {
        RecurrenceRule::None => false,

        RecurrenceRule::Daily { interval } => {
            interval.is_one() || on_interval(days_between(anchor, target), *interval)
        }

        RecurrenceRule::Weekly { interval, days } => {
            days.contains(target.weekday())
                && (interval.is_one() || on_interval(weeks_between(anchor, target), *interval))
        }

        RecurrenceRule::Monthly { interval, pattern } => {
            let due_day = match *pattern {
                MonthlyPattern::DayOfMonth(day) => {
                    Some(day.min(last_day_of_month(target.year(), target.month())))
                }
                MonthlyPattern::Weekday { week, weekday } => {
                    nth_weekday_of_month(target.year(), target.month(), weekday, week)
                }
            };
            due_day == Some(target.day())
                && (interval.is_one() || on_interval(months_between(anchor, target), *interval))
        }

        RecurrenceRule::Yearly { month, day } => {
            // clamping makes Feb 29 land on Feb 28 in common years
            target.month() == *month
                && target.day() == (*day).min(last_day_of_month(target.year(), *month))
        }
    }
}

fn on_interval(elapsed: i64, interval: Interval) -> bool {
    elapsed >= 0 && elapsed % i64::from(interval.get()) == 0
}
