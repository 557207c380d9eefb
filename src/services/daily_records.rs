use chrono::NaiveDate;

use crate::{
    db::PlanStore,
    error::ApiError,
    models::daily::{DietDay, PutDietDayRequest, PutWorkoutDayRequest, WorkoutDay},
};

/// Direct reads and edits of a single member-day, outside of template assignment.
pub struct DailyRecordService;

impl DailyRecordService {
    pub async fn get_diet(store: &dyn PlanStore, member_id: &str, date: NaiveDate) -> Result<DietDay, ApiError> {
        store
            .get_diet_day(member_id, date)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No diet plan for {member_id} on {date}")))
    }

    /// Overwrite the day. Meals are partitioned and totals recomputed the
    /// same way template expansion builds a record.
    pub async fn put_diet(
        store: &dyn PlanStore,
        member_id: &str,
        date: NaiveDate,
        req: PutDietDayRequest,
    ) -> Result<DietDay, ApiError> {
        let day = DietDay::from_meals(member_id, date, &req.meals, None);
        store.put_diet_day(&day).await?;
        Ok(day)
    }

    pub async fn delete_diet(store: &dyn PlanStore, member_id: &str, date: NaiveDate) -> Result<(), ApiError> {
        if store.delete_diet_day(member_id, date).await? {
            Ok(())
        } else {
            Err(ApiError::not_found(format!("No diet plan for {member_id} on {date}")))
        }
    }

    pub async fn get_workout(store: &dyn PlanStore, member_id: &str, date: NaiveDate) -> Result<WorkoutDay, ApiError> {
        store
            .get_workout_day(member_id, date)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No workout plan for {member_id} on {date}")))
    }

    pub async fn put_workout(
        store: &dyn PlanStore,
        member_id: &str,
        date: NaiveDate,
        req: PutWorkoutDayRequest,
    ) -> Result<WorkoutDay, ApiError> {
        let day = WorkoutDay::new(member_id, date, req.exercises, None);
        store.put_workout_day(&day).await?;
        Ok(day)
    }

    pub async fn delete_workout(store: &dyn PlanStore, member_id: &str, date: NaiveDate) -> Result<(), ApiError> {
        if store.delete_workout_day(member_id, date).await? {
            Ok(())
        } else {
            Err(ApiError::not_found(format!("No workout plan for {member_id} on {date}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryPlanStore;
    use crate::models::plan::{MealItem, MealType};

    #[tokio::test]
    async fn test_put_then_get_diet() {
        let store = MemoryPlanStore::new();
        let date: NaiveDate = "2024-06-10".parse().unwrap();
        let req = PutDietDayRequest {
            meals: vec![
                MealItem {
                    name: "Toast".into(),
                    meal_type: Some(MealType::Breakfast),
                    calories: Some(180.0),
                    fibre: Some(2.5),
                    ..Default::default()
                },
                MealItem {
                    name: "Soup".into(),
                    meal_type: Some(MealType::Dinner),
                    total_calories: Some(220.0),
                    ..Default::default()
                },
            ],
        };

        DailyRecordService::put_diet(&store, "m1", date, req).await.unwrap();
        let day = DailyRecordService::get_diet(&store, "m1", date).await.unwrap();

        assert_eq!(day.nutrition_totals.calories, 400.0);
        assert_eq!(day.nutrition_totals.fibre, 2.5);
        assert_eq!(day.breakfast[0].name, "Toast");
        assert_eq!(day.dinner[0].name, "Soup");
        assert!(day.lunch.is_empty());
        assert_eq!(day.template_id, None);
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let store = MemoryPlanStore::new();
        let date: NaiveDate = "2024-06-10".parse().unwrap();

        assert!(matches!(
            DailyRecordService::get_workout(&store, "m1", date).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            DailyRecordService::delete_diet(&store, "m1", date).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_workout() {
        let store = MemoryPlanStore::new();
        let date: NaiveDate = "2024-06-11".parse().unwrap();
        DailyRecordService::put_workout(&store, "m1", date, PutWorkoutDayRequest { exercises: vec![] })
            .await
            .unwrap();

        DailyRecordService::delete_workout(&store, "m1", date).await.unwrap();
        assert!(DailyRecordService::get_workout(&store, "m1", date).await.is_err());
    }
}
