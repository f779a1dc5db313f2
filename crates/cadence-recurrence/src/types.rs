use std::fmt;
use std::num::NonZeroU32;

use cadence_core::TaskId;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::record::RecurrenceRecord;

/// "Every N units" multiplier of a rule. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval(NonZeroU32);

impl Interval {
    pub const ONE: Interval = Interval(NonZeroU32::MIN);
    pub const MAX: Interval = Interval(NonZeroU32::MAX);

    /// `None` for zero.
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn is_one(self) -> bool {
        self == Self::ONE
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wire index of a weekday: 0 = Sunday … 6 = Saturday.
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Inverse of [`weekday_index`]; `None` outside 0..=6.
pub fn weekday_from_index(index: i64) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Set of weekdays, one bit per day (bit 0 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);
    pub const ALL: DaySet = DaySet(0b111_1111);

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << weekday_index(day);
    }

    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << weekday_index(day)) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in wire order, Sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        (0..7i64)
            .filter_map(weekday_from_index)
            .filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekOrdinal {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
}

impl WeekOrdinal {
    /// Wire form: 1..=5, or -1 for last.
    pub fn from_wire(n: i64) -> Option<Self> {
        match n {
            1 => Some(WeekOrdinal::First),
            2 => Some(WeekOrdinal::Second),
            3 => Some(WeekOrdinal::Third),
            4 => Some(WeekOrdinal::Fourth),
            5 => Some(WeekOrdinal::Fifth),
            -1 => Some(WeekOrdinal::Last),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i64 {
        match self.position() {
            Some(n) => i64::from(n),
            None => -1,
        }
    }

    /// 1-based position counted from the start of the month; `None` for `Last`.
    pub fn position(self) -> Option<u8> {
        match self {
            WeekOrdinal::First => Some(1),
            WeekOrdinal::Second => Some(2),
            WeekOrdinal::Third => Some(3),
            WeekOrdinal::Fourth => Some(4),
            WeekOrdinal::Fifth => Some(5),
            WeekOrdinal::Last => None,
        }
    }
}

/// The two ways a monthly rule can pick its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthlyPattern {
    /// Fixed day 1–31, clamped to the month's last day.
    DayOfMonth(u32),
    /// Nth (or last) occurrence of a weekday.
    Weekday { week: WeekOrdinal, weekday: Weekday },
}

/// Discriminator of [`RecurrenceRule`]; also the `type` field of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleKind::None => "none",
            RuleKind::Daily => "daily",
            RuleKind::Weekly => "weekly",
            RuleKind::Monthly => "monthly",
            RuleKind::Yearly => "yearly",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(RuleKind::None),
            "daily" => Ok(RuleKind::Daily),
            "weekly" => Ok(RuleKind::Weekly),
            "monthly" => Ok(RuleKind::Monthly),
            "yearly" => Ok(RuleKind::Yearly),
            other => Err(format!("unknown recurrence type: {other}")),
        }
    }
}

/// Declarative description of the days an obligation is due.
///
/// Serialized through [`RecurrenceRecord`], so the JSON form is the flat
/// storage shape and deserialization validates strictly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RecurrenceRecord", into = "RecurrenceRecord")]
pub enum RecurrenceRule {
    /// No fixed date; never due.
    #[default]
    None,

    /// Every `interval` days counted from the anchor.
    Daily { interval: Interval },

    /// On the listed weekdays of every `interval`-th Monday-aligned week.
    Weekly { interval: Interval, days: DaySet },

    /// Once a month, every `interval` months counted from the anchor's month.
    Monthly {
        interval: Interval,
        pattern: MonthlyPattern,
    },

    /// Once a year on `month`/`day`; Feb 29 falls back to Feb 28 in common years.
    Yearly { month: u32, day: u32 },
}

impl RecurrenceRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            RecurrenceRule::None => RuleKind::None,
            RecurrenceRule::Daily { .. } => RuleKind::Daily,
            RecurrenceRule::Weekly { .. } => RuleKind::Weekly,
            RecurrenceRule::Monthly { .. } => RuleKind::Monthly,
            RecurrenceRule::Yearly { .. } => RuleKind::Yearly,
        }
    }

    /// The rule's interval; rules without one report 1.
    pub fn interval(&self) -> Interval {
        match self {
            RecurrenceRule::Daily { interval }
            | RecurrenceRule::Weekly { interval, .. }
            | RecurrenceRule::Monthly { interval, .. } => *interval,
            RecurrenceRule::None | RecurrenceRule::Yearly { .. } => Interval::ONE,
        }
    }

    /// Whether the rule is due on `target`, counting intervals from `anchor`.
    pub fn matches(&self, anchor: NaiveDate, target: NaiveDate) -> bool {
        crate::matcher::matches(self, anchor, target)
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::describe::describe(self))
    }
}

/// Anything the range expander can place on a calendar.
pub trait Scheduled {
    fn rule(&self) -> &RecurrenceRule;

    /// Reference date for interval counting (usually the creation date).
    fn anchor(&self) -> NaiveDate;
}

/// A recurring obligation as the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub recurrence: RecurrenceRule,
    pub anchor: NaiveDate,
}

impl Task {
    pub fn new(recurrence: RecurrenceRule, anchor: NaiveDate) -> Self {
        Self {
            id: TaskId::new(),
            recurrence,
            anchor,
        }
    }
}

impl Scheduled for Task {
    fn rule(&self) -> &RecurrenceRule {
        &self.recurrence
    }

    fn anchor(&self) -> NaiveDate {
        self.anchor
    }
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
    fn rule(&self) -> &RecurrenceRule {
        (**self).rule()
    }

    fn anchor(&self) -> NaiveDate {
        (**self).anchor()
    }
}
