use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::PlanStore,
    error::ApiError,
    models::plan::{DayEntries, DayName, ExerciseItem, MealItem, PlanKind, WeekDays, WeeklyTemplate},
    services::metrics::TEMPLATES_SAVED_COUNTER,
};

pub struct WeeklyPlanService;

impl WeeklyPlanService {
    pub async fn list(
        store: &dyn PlanStore,
        kind: PlanKind,
        owner_id: &str,
    ) -> Result<Vec<WeeklyTemplate>, ApiError> {
        Ok(store.list_templates(kind, owner_id).await?)
    }

    pub async fn get(
        store: &dyn PlanStore,
        kind: PlanKind,
        owner_id: &str,
        template_id: Uuid,
    ) -> Result<WeeklyTemplate, ApiError> {
        store
            .get_template(kind, owner_id, template_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Weekly {kind} plan not found")))
    }

    pub async fn create(
        store: &dyn PlanStore,
        kind: PlanKind,
        owner_id: &str,
        name: &str,
        raw_days: &Value,
    ) -> Result<WeeklyTemplate, ApiError> {
        let name = validate_name(name)?;
        let days = parse_week(kind, raw_days)?;
        let now = Utc::now();
        let template = WeeklyTemplate {
            owner_id: owner_id.to_string(),
            template_id: Uuid::new_v4(),
            kind,
            name,
            days,
            created_at: now,
            updated_at: now,
        };
        store.put_template(&template).await?;
        TEMPLATES_SAVED_COUNTER
            .with_label_values(&[&kind.to_string(), "create"])
            .inc();
        tracing::info!(%owner_id, template_id = %template.template_id, "created weekly {kind} plan");
        Ok(template)
    }

    /// Replace name and days wholesale; identity and `created_at` are kept.
    pub async fn update(
        store: &dyn PlanStore,
        kind: PlanKind,
        owner_id: &str,
        template_id: Uuid,
        name: &str,
        raw_days: &Value,
    ) -> Result<WeeklyTemplate, ApiError> {
        let name = validate_name(name)?;
        let days = parse_week(kind, raw_days)?;
        let existing = Self::get(store, kind, owner_id, template_id).await?;
        let template = WeeklyTemplate {
            name,
            days,
            updated_at: Utc::now(),
            ..existing
        };
        store.put_template(&template).await?;
        TEMPLATES_SAVED_COUNTER
            .with_label_values(&[&kind.to_string(), "update"])
            .inc();
        Ok(template)
    }

    pub async fn delete(
        store: &dyn PlanStore,
        kind: PlanKind,
        owner_id: &str,
        template_id: Uuid,
    ) -> Result<(), ApiError> {
        if store.delete_template(kind, owner_id, template_id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found(format!("Weekly {kind} plan not found")))
        }
    }
}

fn validate_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("templateName must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Check that all seven days are present and each carries an item array
/// (`meals` or `exercises` depending on `kind`), then decode the items.
pub fn parse_week(kind: PlanKind, raw: &Value) -> Result<WeekDays, ApiError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ApiError::validation("weeklyPlan must be an object keyed by day"))?;
    let field = kind.items_field();

    let mut days = WeekDays::new();
    for day in DayName::ALL {
        let bucket = obj
            .get(day.as_str())
            .ok_or_else(|| ApiError::validation(format!("Missing day: {day}")))?;
        let items = bucket
            .get(field)
            .filter(|v| v.is_array())
            .ok_or_else(|| ApiError::validation(format!("{day}.{field} must be an array")))?;

        let entries = match kind {
            PlanKind::Diet => DayEntries::Meals {
                meals: decode_items::<MealItem>(day, items)?,
            },
            PlanKind::Workout => DayEntries::Exercises {
                exercises: decode_items::<ExerciseItem>(day, items)?,
            },
        };
        days.insert(day, entries);
    }
    Ok(days)
}

fn decode_items<T: serde::de::DeserializeOwned>(day: DayName, items: &Value) -> Result<Vec<T>, ApiError> {
    serde_json::from_value(items.clone())
        .map_err(|e| ApiError::validation(format!("Invalid entry in {day}: {e}")))
}
