use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::daily::NutritionTotals;
use super::plan::{ExerciseItem, MealItem};

/// A calendar month written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// First day of the following month, exclusive upper bound for range scans.
    pub fn next_first_day(&self) -> NaiveDate {
        let (year, month) = match self.first_day.month() {
            12 => (self.first_day.year() + 1, 1),
            m => (self.first_day.year(), m + 1),
        };
        // Day 1 of a month in 1..=12 always exists.
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.next_first_day()
            .pred_opt()
            .map(|last| last.day())
            .unwrap_or(31)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date < self.next_first_day()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first_day.iter_days().take(self.days_in_month() as usize)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    /// Accepts exactly four digits, a dash and two digits, month 01-12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(format!("Invalid yearMonth format: {s} (expected YYYY-MM)"));
        }
        let year: i32 = s[..4].parse().map_err(|_| format!("Invalid year in {s}"))?;
        let month: u32 = s[5..].parse().map_err(|_| format!("Invalid month in {s}"))?;
        Self::new(year, month).ok_or_else(|| format!("Invalid month in {s}"))
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealsDetail {
    pub breakfast: Vec<MealItem>,
    pub lunch: Vec<MealItem>,
    pub dinner: Vec<MealItem>,
    pub nutrition_totals: NutritionTotals,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WorkoutDetail {
    pub exercises: Vec<ExerciseItem>,
}

/// One day of the month view. Days without records keep the zeroed default.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyDetail {
    pub date: NaiveDate,
    pub meals: MealsDetail,
    pub workout: WorkoutDetail,
}

impl DailyDetail {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            meals: MealsDetail::default(),
            workout: WorkoutDetail::default(),
        }
    }
}

/// Response of GET /api/calorie-progress/{memberId}/{yearMonth}/details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDetails {
    pub member_id: String,
    pub year_month: String,
    pub daily_details: Vec<DailyDetail>,
    pub month_totals: NutritionTotals,
    pub active_days: usize,
}
