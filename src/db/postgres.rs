use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::PlanStore;
use crate::models::{
    daily::{DietDay, NutritionTotals, WorkoutDay},
    plan::{ExerciseItem, MealItem, PlanKind, WeekDays, WeeklyTemplate},
    progress::YearMonth,
};

/// PostgreSQL-backed store. Templates use a genuine composite primary key
/// `(owner_id, template_id)`; day buckets and meal lists live in JSONB.
#[derive(Clone)]
pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TemplateRow {
    owner_id: String,
    template_id: Uuid,
    name: String,
    days: Json<WeekDays>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TemplateRow {
    fn into_template(self, kind: PlanKind) -> WeeklyTemplate {
        WeeklyTemplate {
            owner_id: self.owner_id,
            template_id: self.template_id,
            kind,
            name: self.name,
            days: self.days.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct DietDayRow {
    member_id: String,
    date: NaiveDate,
    breakfast: Json<Vec<MealItem>>,
    lunch: Json<Vec<MealItem>>,
    dinner: Json<Vec<MealItem>>,
    calories: f64,
    carbs: f64,
    proteins: f64,
    fats: f64,
    fibre: f64,
    template_id: Option<Uuid>,
    updated_at: DateTime<Utc>,
}

impl From<DietDayRow> for DietDay {
    fn from(row: DietDayRow) -> Self {
        DietDay {
            member_id: row.member_id,
            date: row.date,
            breakfast: row.breakfast.0,
            lunch: row.lunch.0,
            dinner: row.dinner.0,
            nutrition_totals: NutritionTotals {
                calories: row.calories,
                carbs: row.carbs,
                proteins: row.proteins,
                fats: row.fats,
                fibre: row.fibre,
            },
            template_id: row.template_id,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct WorkoutDayRow {
    member_id: String,
    date: NaiveDate,
    exercises: Json<Vec<ExerciseItem>>,
    template_id: Option<Uuid>,
    updated_at: DateTime<Utc>,
}

impl From<WorkoutDayRow> for WorkoutDay {
    fn from(row: WorkoutDayRow) -> Self {
        WorkoutDay {
            member_id: row.member_id,
            date: row.date,
            exercises: row.exercises.0,
            template_id: row.template_id,
            updated_at: row.updated_at,
        }
    }
}

const DIET_COLUMNS: &str = "member_id, date, breakfast, lunch, dinner,
       calories, carbs, proteins, fats, fibre, template_id, updated_at";

const WORKOUT_COLUMNS: &str = "member_id, date, exercises, template_id, updated_at";

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn list_templates(&self, kind: PlanKind, owner_id: &str) -> anyhow::Result<Vec<WeeklyTemplate>> {
        let table = kind.template_table();
        let rows = sqlx::query_as::<_, TemplateRow>(&format!(
            "SELECT owner_id, template_id, name, days, created_at, updated_at
             FROM {table}
             WHERE owner_id = $1
             ORDER BY created_at"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.into_template(kind)).collect())
    }

    async fn get_template(
        &self,
        kind: PlanKind,
        owner_id: &str,
        template_id: Uuid,
    ) -> anyhow::Result<Option<WeeklyTemplate>> {
        let table = kind.template_table();
        let row = sqlx::query_as::<_, TemplateRow>(&format!(
            "SELECT owner_id, template_id, name, days, created_at, updated_at
             FROM {table}
             WHERE owner_id = $1 AND template_id = $2"
        ))
        .bind(owner_id)
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into_template(kind)))
    }

    async fn put_template(&self, template: &WeeklyTemplate) -> anyhow::Result<()> {
        let table = template.kind.template_table();
        sqlx::query(&format!(
            "INSERT INTO {table} (owner_id, template_id, name, days, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (owner_id, template_id) DO UPDATE SET
                 name       = EXCLUDED.name,
                 days       = EXCLUDED.days,
                 updated_at = EXCLUDED.updated_at"
        ))
        .bind(&template.owner_id)
        .bind(template.template_id)
        .bind(&template.name)
        .bind(Json(&template.days))
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_template(&self, kind: PlanKind, owner_id: &str, template_id: Uuid) -> anyhow::Result<bool> {
        let table = kind.template_table();
        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE owner_id = $1 AND template_id = $2"
        ))
        .bind(owner_id)
        .bind(template_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn put_diet_day(&self, day: &DietDay) -> anyhow::Result<()> {
        let totals = &day.nutrition_totals;
        sqlx::query(
            "INSERT INTO diet_plans
                 (member_id, date, breakfast, lunch, dinner,
                  calories, carbs, proteins, fats, fibre, template_id, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             ON CONFLICT (member_id, date) DO UPDATE SET
                 breakfast   = EXCLUDED.breakfast,
                 lunch       = EXCLUDED.lunch,
                 dinner      = EXCLUDED.dinner,
                 calories    = EXCLUDED.calories,
                 carbs       = EXCLUDED.carbs,
                 proteins    = EXCLUDED.proteins,
                 fats        = EXCLUDED.fats,
                 fibre       = EXCLUDED.fibre,
                 template_id = EXCLUDED.template_id,
                 updated_at  = EXCLUDED.updated_at",
        )
        .bind(&day.member_id)
        .bind(day.date)
        .bind(Json(&day.breakfast))
        .bind(Json(&day.lunch))
        .bind(Json(&day.dinner))
        .bind(totals.calories)
        .bind(totals.carbs)
        .bind(totals.proteins)
        .bind(totals.fats)
        .bind(totals.fibre)
        .bind(day.template_id)
        .bind(day.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_diet_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<Option<DietDay>> {
        let row = sqlx::query_as::<_, DietDayRow>(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_plans WHERE member_id = $1 AND date = $2"
        ))
        .bind(member_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(DietDay::from))
    }

    async fn delete_diet_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM diet_plans WHERE member_id = $1 AND date = $2")
            .bind(member_id)
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn diet_days_in_month(&self, member_id: &str, month: YearMonth) -> anyhow::Result<Vec<DietDay>> {
        let rows = sqlx::query_as::<_, DietDayRow>(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_plans
             WHERE member_id = $1 AND date >= $2 AND date < $3
             ORDER BY date"
        ))
        .bind(member_id)
        .bind(month.first_day())
        .bind(month.next_first_day())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(DietDay::from).collect())
    }

    async fn put_workout_day(&self, day: &WorkoutDay) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO workout_plans (member_id, date, exercises, template_id, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (member_id, date) DO UPDATE SET
                 exercises   = EXCLUDED.exercises,
                 template_id = EXCLUDED.template_id,
                 updated_at  = EXCLUDED.updated_at",
        )
        .bind(&day.member_id)
        .bind(day.date)
        .bind(Json(&day.exercises))
        .bind(day.template_id)
        .bind(day.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_workout_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<Option<WorkoutDay>> {
        let row = sqlx::query_as::<_, WorkoutDayRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workout_plans WHERE member_id = $1 AND date = $2"
        ))
        .bind(member_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(WorkoutDay::from))
    }

    async fn delete_workout_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM workout_plans WHERE member_id = $1 AND date = $2")
            .bind(member_id)
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn workout_days_in_month(&self, member_id: &str, month: YearMonth) -> anyhow::Result<Vec<WorkoutDay>> {
        let rows = sqlx::query_as::<_, WorkoutDayRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workout_plans
             WHERE member_id = $1 AND date >= $2 AND date < $3
             ORDER BY date"
        ))
        .bind(member_id)
        .bind(month.first_day())
        .bind(month.next_first_day())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(WorkoutDay::from).collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
