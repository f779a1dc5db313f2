//! Human-readable phrases for recurrence rules.

use cadence_core::{CadenceConfig, Locale};
use chrono::Weekday;

use crate::types::{weekday_index, DaySet, MonthlyPattern, RecurrenceRule, WeekOrdinal};

const EN_DAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const EN_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const PT_DAYS_SHORT: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sab"];
const PT_MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Marco",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// English description, e.g. "every 2 weeks (Sat)".
pub fn describe(rule: &RecurrenceRule) -> String {
    describe_in(rule, Locale::En)
}

/// Description of `rule` in `locale`. Deterministic: depends only on the
/// rule's fields.
pub fn describe_in(rule: &RecurrenceRule, locale: Locale) -> String {
    match locale {
        Locale::En => english(rule),
        Locale::Pt => portuguese(rule),
    }
}

/// Description in the locale configured under `[describe]`.
pub fn describe_with(rule: &RecurrenceRule, config: &CadenceConfig) -> String {
    describe_in(rule, config.describe.locale)
}

fn day_list(days: DaySet, names: &[&'static str; 7]) -> String {
    days.iter()
        .map(|day| day_name(day, names))
        .collect::<Vec<_>>()
        .join(", ")
}

fn day_name(day: Weekday, names: &[&'static str; 7]) -> &'static str {
    names[usize::from(weekday_index(day))]
}

fn month_name(month: u32, names: &[&'static str; 12]) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| names.get(i as usize))
        .copied()
        .unwrap_or("?")
}

fn english(rule: &RecurrenceRule) -> String {
    match rule {
        RecurrenceRule::None => "no fixed date".to_string(),

        RecurrenceRule::Daily { interval } if interval.is_one() => "every day".to_string(),
        RecurrenceRule::Daily { interval } => format!("every {interval} days"),

        RecurrenceRule::Weekly { interval, days } => {
            let list = day_list(*days, &EN_DAYS_SHORT);
            match (interval.is_one(), days.len()) {
                (true, 7) => "every day".to_string(),
                (true, 0) => "weekly".to_string(),
                (true, _) => format!("every {list}"),
                (false, 0) => format!("every {interval} weeks"),
                (false, _) => format!("every {interval} weeks ({list})"),
            }
        }

        RecurrenceRule::Monthly { interval, pattern } => match *pattern {
            MonthlyPattern::Weekday { week, weekday } => {
                let ordinal = match week {
                    WeekOrdinal::First => "1st",
                    WeekOrdinal::Second => "2nd",
                    WeekOrdinal::Third => "3rd",
                    WeekOrdinal::Fourth => "4th",
                    WeekOrdinal::Fifth => "5th",
                    WeekOrdinal::Last => "last",
                };
                let day = day_name(weekday, &EN_DAYS);
                if interval.is_one() {
                    format!("{ordinal} {day} of month")
                } else {
                    format!("{ordinal} {day} every {interval} months")
                }
            }
            MonthlyPattern::DayOfMonth(day) if interval.is_one() => {
                format!("day {day} of every month")
            }
            MonthlyPattern::DayOfMonth(day) => format!("every {interval} months, day {day}"),
        },

        RecurrenceRule::Yearly { month, day } => {
            format!("{} {day} every year", month_name(*month, &EN_MONTHS_SHORT))
        }
    }
}

fn portuguese(rule: &RecurrenceRule) -> String {
    match rule {
        RecurrenceRule::None => "Sem data definida".to_string(),

        RecurrenceRule::Daily { interval } if interval.is_one() => "Todo dia".to_string(),
        RecurrenceRule::Daily { interval } => format!("A cada {interval} dias"),

        RecurrenceRule::Weekly { interval, days } => {
            let list = day_list(*days, &PT_DAYS_SHORT);
            match (interval.is_one(), days.len()) {
                (true, 7) => "Todo dia".to_string(),
                (true, 0) => "Semanal".to_string(),
                (true, _) => format!("Toda {list}"),
                (false, 0) => format!("A cada {interval} semanas"),
                (false, _) => format!("A cada {interval} semanas ({list})"),
            }
        }

        RecurrenceRule::Monthly { interval, pattern } => match *pattern {
            MonthlyPattern::Weekday { week, weekday } => {
                let ordinal = match week.position() {
                    Some(n) => format!("{n}o"),
                    None => "Ultimo".to_string(),
                };
                let day = day_name(weekday, &PT_DAYS_SHORT);
                if interval.is_one() {
                    format!("{ordinal} {day} do mes")
                } else {
                    format!("{ordinal} {day} A cada {interval} meses")
                }
            }
            MonthlyPattern::DayOfMonth(day) if interval.is_one() => {
                format!("Dia {day} de cada mes")
            }
            MonthlyPattern::DayOfMonth(day) => format!("A cada {interval} meses, dia {day}"),
        },

        RecurrenceRule::Yearly { month, day } => {
            format!("{day} de {} todo ano", month_name(*month, &PT_MONTHS))
        }
    }
}
