pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::{Config, StoreBackend};
use crate::models::{
    daily::{DietDay, WorkoutDay},
    plan::{PlanKind, WeeklyTemplate},
    progress::YearMonth,
};

pub use memory::MemoryPlanStore;
pub use postgres::PgPlanStore;

/// Document store holding weekly templates and per-day records.
///
/// Templates are keyed by `(owner_id, template_id)` within a [`PlanKind`];
/// daily records by `(member_id, date)`. Every write is an upsert and the
/// last writer wins.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Templates of one owner, oldest first.
    async fn list_templates(&self, kind: PlanKind, owner_id: &str) -> anyhow::Result<Vec<WeeklyTemplate>>;

    async fn get_template(
        &self,
        kind: PlanKind,
        owner_id: &str,
        template_id: Uuid,
    ) -> anyhow::Result<Option<WeeklyTemplate>>;

    /// Insert or overwrite. `created_at` of an existing row is kept.
    async fn put_template(&self, template: &WeeklyTemplate) -> anyhow::Result<()>;

    /// Returns false when nothing was deleted.
    async fn delete_template(&self, kind: PlanKind, owner_id: &str, template_id: Uuid) -> anyhow::Result<bool>;

    async fn put_diet_day(&self, day: &DietDay) -> anyhow::Result<()>;

    async fn get_diet_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<Option<DietDay>>;

    async fn delete_diet_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<bool>;

    /// Diet records of a member dated within `month`, ascending.
    async fn diet_days_in_month(&self, member_id: &str, month: YearMonth) -> anyhow::Result<Vec<DietDay>>;

    async fn put_workout_day(&self, day: &WorkoutDay) -> anyhow::Result<()>;

    async fn get_workout_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<Option<WorkoutDay>>;

    async fn delete_workout_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<bool>;

    /// Workout records of a member dated within `month`, ascending.
    async fn workout_days_in_month(&self, member_id: &str, month: YearMonth) -> anyhow::Result<Vec<WorkoutDay>>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> anyhow::Result<()>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn PlanStore) {}
};

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Build the store selected by `STORE_BACKEND`. The pool is returned
/// alongside so `main` can close it on shutdown.
pub async fn connect(config: &Config) -> anyhow::Result<(Arc<dyn PlanStore>, Option<PgPool>)> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on restart");
            Ok((Arc::new(MemoryPlanStore::default()), None))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;
            let pool = create_pool(url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database connected and migrations applied");
            Ok((Arc::new(PgPlanStore::new(pool.clone())), Some(pool)))
        }
    }
}
