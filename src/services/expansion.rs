use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::{
    db::PlanStore,
    error::ApiError,
    models::{
        daily::{DietDay, WorkoutDay},
        plan::{DayEntries, DayName, WeeklyTemplate},
    },
    services::metrics::ASSIGNED_DAYS_COUNTER,
};

/// Monday-first; index with [`day_index`], never with a Sunday-based weekday.
pub const DAY_NAMES: [DayName; 7] = DayName::ALL;

/// Map a weekday to its slot in [`DAY_NAMES`]. Native numbering counts
/// Sunday as 0, so Sunday becomes slot 6 and every other day shifts down one.
pub fn day_index(weekday: Weekday) -> usize {
    match weekday.num_days_from_sunday() {
        0 => 6,
        native => native as usize - 1,
    }
}

pub fn day_name_for(date: NaiveDate) -> DayName {
    DAY_NAMES[day_index(date.weekday())]
}

/// Strict `YYYY-MM-DD`: ten bytes, dashes at 4 and 7, digits everywhere else.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ApiError> {
    let invalid = || ApiError::validation(format!("Invalid date: {value} (expected YYYY-MM-DD)"));
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Outcome of one (member, date) write.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionResult {
    pub member_id: String,
    pub date: NaiveDate,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExpansionResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct PlanExpander;

impl PlanExpander {
    /// Project `template` onto seven consecutive days from each member's
    /// start date and upsert one daily record per non-empty day.
    ///
    /// Arguments are validated up front. After that the writes are
    /// independent: a failed write is reported in its result entry and the
    /// remaining days are still attempted. Nothing is rolled back.
    pub async fn expand(
        store: &dyn PlanStore,
        template: &WeeklyTemplate,
        member_ids: &[String],
        start_dates: &[String],
    ) -> Result<Vec<ExpansionResult>, ApiError> {
        let starts = validate_assignment(member_ids, start_dates)?;
        let kind = template.kind.to_string();
        let mut results = Vec::new();

        for (member_id, start) in member_ids.iter().zip(starts) {
            for offset in 0..7 {
                let date = start + Duration::days(offset);
                let day = day_name_for(date);
                let Some(entries) = template.days.get(&day).filter(|e| !e.is_empty()) else {
                    continue;
                };

                let written = match entries {
                    DayEntries::Meals { meals } => {
                        let record = DietDay::from_meals(member_id, date, meals, Some(template.template_id));
                        store.put_diet_day(&record).await
                    }
                    DayEntries::Exercises { exercises } => {
                        let record = WorkoutDay::new(member_id, date, exercises.clone(), Some(template.template_id));
                        store.put_workout_day(&record).await
                    }
                };

                let error = match written {
                    Ok(()) => {
                        ASSIGNED_DAYS_COUNTER.with_label_values(&[&kind, "written"]).inc();
                        None
                    }
                    Err(e) => {
                        ASSIGNED_DAYS_COUNTER.with_label_values(&[&kind, "failed"]).inc();
                        tracing::warn!("assign {kind} plan: write failed for {member_id} on {date}: {e:#}");
                        Some("Failed to save daily plan".to_string())
                    }
                };
                results.push(ExpansionResult {
                    member_id: member_id.clone(),
                    date,
                    item_count: entries.len(),
                    error,
                });
            }
        }

        tracing::info!(
            template_id = %template.template_id,
            members = member_ids.len(),
            days = results.len(),
            "expanded weekly {kind} plan"
        );
        Ok(results)
    }
}

fn validate_assignment(member_ids: &[String], start_dates: &[String]) -> Result<Vec<NaiveDate>, ApiError> {
    if member_ids.is_empty() {
        return Err(ApiError::validation("memberIds must not be empty"));
    }
    if member_ids.len() != start_dates.len() {
        return Err(ApiError::validation(format!(
            "memberIds and startDates must have the same length ({} vs {})",
            member_ids.len(),
            start_dates.len()
        )));
    }
    if member_ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ApiError::validation("memberIds must not contain empty ids"));
    }
    start_dates.iter().map(|s| parse_iso_date(s)).collect()
}
