use chrono::Datelike;

use crate::{
    db::PlanStore,
    error::ApiError,
    models::{
        daily::NutritionTotals,
        progress::{DailyDetail, MealsDetail, MonthDetails, WorkoutDetail, YearMonth},
    },
    services::metrics::MONTH_VIEWS_COUNTER,
};

pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// One entry per calendar day of `year_month`, ascending. Days with a
    /// stored record get its meals or exercises wholesale; the rest keep the
    /// zeroed default.
    pub async fn aggregate(
        store: &dyn PlanStore,
        member_id: &str,
        year_month: &str,
    ) -> Result<MonthDetails, ApiError> {
        let month: YearMonth = year_month.parse().map_err(|e: String| {
            MONTH_VIEWS_COUNTER.with_label_values(&["invalid"]).inc();
            ApiError::Validation(e)
        })?;

        let (diet_days, workout_days) = tokio::try_join!(
            store.diet_days_in_month(member_id, month),
            store.workout_days_in_month(member_id, month),
        )?;

        let mut details: Vec<DailyDetail> = month.days().map(DailyDetail::empty).collect();
        let mut active = vec![false; details.len()];

        for day in diet_days.into_iter().filter(|d| month.contains(d.date)) {
            let idx = day.date.day0() as usize;
            details[idx].meals = MealsDetail {
                breakfast: day.breakfast,
                lunch: day.lunch,
                dinner: day.dinner,
                nutrition_totals: day.nutrition_totals,
            };
            active[idx] = true;
        }
        for day in workout_days.into_iter().filter(|d| month.contains(d.date)) {
            let idx = day.date.day0() as usize;
            details[idx].workout = WorkoutDetail { exercises: day.exercises };
            active[idx] = true;
        }

        let mut month_totals = NutritionTotals::default();
        for detail in &details {
            month_totals += detail.meals.nutrition_totals;
        }

        MONTH_VIEWS_COUNTER.with_label_values(&["ok"]).inc();
        Ok(MonthDetails {
            member_id: member_id.to_string(),
            year_month: month.to_string(),
            daily_details: details,
            month_totals,
            active_days: active.iter().filter(|a| **a).count(),
        })
    }
}
