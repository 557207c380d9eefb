use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::{ExerciseItem, MealItem, MealType};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub carbs: f64,
    pub proteins: f64,
    pub fats: f64,
    pub fibre: f64,
}

impl NutritionTotals {
    /// Sum every item regardless of which meal it belongs to.
    pub fn sum<'a>(items: impl IntoIterator<Item = &'a MealItem>) -> Self {
        items.into_iter().fold(Self::default(), |mut acc, item| {
            acc.calories += item.calories();
            acc.carbs += item.carbs();
            acc.proteins += item.proteins();
            acc.fats += item.fats();
            acc.fibre += item.fibre();
            acc
        })
    }
}

impl std::ops::AddAssign for NutritionTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.carbs += rhs.carbs;
        self.proteins += rhs.proteins;
        self.fats += rhs.fats;
        self.fibre += rhs.fibre;
    }
}

/// Materialized diet for one member on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietDay {
    pub member_id: String,
    pub date: NaiveDate,
    pub breakfast: Vec<MealItem>,
    pub lunch: Vec<MealItem>,
    pub dinner: Vec<MealItem>,
    pub nutrition_totals: NutritionTotals,
    /// Template this day was expanded from, `None` for direct edits.
    pub template_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl DietDay {
    /// Partition meals by `mealType`. Totals cover all meals, including
    /// snacks and untagged items that land in no partition.
    pub fn from_meals(
        member_id: &str,
        date: NaiveDate,
        meals: &[MealItem],
        template_id: Option<Uuid>,
    ) -> Self {
        let pick = |wanted: MealType| -> Vec<MealItem> {
            meals
                .iter()
                .filter(|m| m.meal_type == Some(wanted))
                .cloned()
                .collect()
        };
        Self {
            member_id: member_id.to_string(),
            date,
            breakfast: pick(MealType::Breakfast),
            lunch: pick(MealType::Lunch),
            dinner: pick(MealType::Dinner),
            nutrition_totals: NutritionTotals::sum(meals),
            template_id,
            updated_at: Utc::now(),
        }
    }
}

/// Materialized workout for one member on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDay {
    pub member_id: String,
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseItem>,
    pub template_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutDay {
    pub fn new(
        member_id: &str,
        date: NaiveDate,
        exercises: Vec<ExerciseItem>,
        template_id: Option<Uuid>,
    ) -> Self {
        Self {
            member_id: member_id.to_string(),
            date,
            exercises,
            template_id,
            updated_at: Utc::now(),
        }
    }
}

/// Body for PUT /api/diet-plans/{memberId}/{date}. Meals are partitioned
/// by `mealType` exactly as template expansion does.
#[derive(Debug, Deserialize)]
pub struct PutDietDayRequest {
    pub meals: Vec<MealItem>,
}

/// Body for PUT /api/workout-plans/{memberId}/{date}.
#[derive(Debug, Deserialize)]
pub struct PutWorkoutDayRequest {
    pub exercises: Vec<ExerciseItem>,
}
