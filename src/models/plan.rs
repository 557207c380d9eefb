use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a template or daily record carries meals or exercises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Diet,
    Workout,
}

impl PlanKind {
    pub fn template_table(self) -> &'static str {
        match self {
            PlanKind::Diet => "weekly_diet_plans",
            PlanKind::Workout => "weekly_workout_plans",
        }
    }

    /// Name of the item list inside a day bucket.
    pub fn items_field(self) -> &'static str {
        match self {
            PlanKind::Diet => "meals",
            PlanKind::Workout => "exercises",
        }
    }

    /// Key used for the per-day item count in assignment results.
    pub fn count_field(self) -> &'static str {
        match self {
            PlanKind::Diet => "mealsCount",
            PlanKind::Workout => "exercisesCount",
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlanKind::Diet => "diet",
            PlanKind::Workout => "workout",
        };
        write!(f, "{s}")
    }
}

/// Day keys of a weekly template. Declaration order is Monday-first, so
/// `BTreeMap<DayName, _>` iterates the week the way coaches read it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    pub const ALL: [DayName; 7] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
        DayName::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayName::Monday => "monday",
            DayName::Tuesday => "tuesday",
            DayName::Wednesday => "wednesday",
            DayName::Thursday => "thursday",
            DayName::Friday => "friday",
            DayName::Saturday => "saturday",
            DayName::Sunday => "sunday",
        }
    }
}

impl std::fmt::Display for DayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One food entry of a diet plan. `total*` fields hold the amount for the
/// served quantity and take precedence over the per-unit values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proteins: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fibre: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_proteins: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fats: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fibre: Option<f64>,
}

impl MealItem {
    pub fn calories(&self) -> f64 {
        self.total_calories.or(self.calories).unwrap_or(0.0)
    }

    pub fn carbs(&self) -> f64 {
        self.total_carbs.or(self.carbs).unwrap_or(0.0)
    }

    pub fn proteins(&self) -> f64 {
        self.total_proteins.or(self.proteins).unwrap_or(0.0)
    }

    pub fn fats(&self) -> f64 {
        self.total_fats.or(self.fats).unwrap_or(0.0)
    }

    pub fn fibre(&self) -> f64 {
        self.total_fibre.or(self.fibre).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Load in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One day bucket of a weekly template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DayEntries {
    Meals { meals: Vec<MealItem> },
    Exercises { exercises: Vec<ExerciseItem> },
}

impl DayEntries {
    pub fn empty(kind: PlanKind) -> Self {
        match kind {
            PlanKind::Diet => DayEntries::Meals { meals: Vec::new() },
            PlanKind::Workout => DayEntries::Exercises { exercises: Vec::new() },
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DayEntries::Meals { meals } => meals.len(),
            DayEntries::Exercises { exercises } => exercises.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type WeekDays = BTreeMap<DayName, DayEntries>;

/// A reusable week of meals or exercises owned by a coach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTemplate {
    pub owner_id: String,
    pub template_id: Uuid,
    pub kind: PlanKind,
    pub name: String,
    pub days: WeekDays,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for POST and PUT on /api/weekly-{diet,workout}-plans.
/// `weekly_plan` stays raw JSON so validation can name the offending day.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWeeklyPlanRequest {
    pub weekly_plan: serde_json::Value,
    pub template_name: String,
}

/// Body for POST /api/weekly-{diet,workout}-plans/{planId}/assign.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPlanRequest {
    pub member_ids: Vec<String>,
    pub start_dates: Vec<String>,
}
