//! Calendar arithmetic on `NaiveDate` fields.
//!
//! Everything here works on year/month/day values, never on elapsed instants,
//! so results do not drift across daylight-saving transitions.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::types::WeekOrdinal;

/// Signed number of calendar days from `a` to `b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// The Monday on or before `date`, or `None` if that Monday falls before
/// [`NaiveDate::MIN`].
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// Whole Monday-aligned weeks from the week containing `a` to the week
/// containing `b`.
///
/// Works on day offsets only, so it is defined for every pair of dates.
pub fn weeks_between(a: NaiveDate, b: NaiveDate) -> i64 {
    let offset = |d: NaiveDate| i64::from(d.weekday().num_days_from_monday());
    (days_between(a, b) + offset(a) - offset(b)).div_euclid(7)
}

/// Calendar months from `a` to `b`, ignoring the day of month.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i64 {
    i64::from(b.year() - a.year()) * 12 + (i64::from(b.month()) - i64::from(a.month()))
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` (1-based) of `year`: 28–31.
///
/// Months outside 1..=12 are treated as 31-day months; callers that need a
/// real month validate it first.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Day-of-month of the `n`th (or last) `weekday` in the given month.
///
/// Returns `None` when the month has no such occurrence (a "5th Monday" in a
/// four-Monday month) or when `year`/`month` do not name a real month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: WeekOrdinal) -> Option<u32> {
    match n.position() {
        Some(nth) => NaiveDate::from_weekday_of_month_opt(year, month, weekday, nth).map(|d| d.day()),
        None => {
            let last = NaiveDate::from_ymd_opt(year, month, last_day_of_month(year, month))?;
            let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
            Some(last.day() - back)
        }
    }
}
