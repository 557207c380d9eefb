use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::PlanStore;
use crate::models::{
    daily::{DietDay, WorkoutDay},
    plan::{PlanKind, WeeklyTemplate},
    progress::YearMonth,
};

type TemplateKey = (PlanKind, String, Uuid);
type DayKey = (String, NaiveDate);

/// Process-local store for development (`STORE_BACKEND=memory`) and tests.
#[derive(Default)]
pub struct MemoryPlanStore {
    templates: RwLock<HashMap<TemplateKey, WeeklyTemplate>>,
    diet_days: RwLock<BTreeMap<DayKey, DietDay>>,
    workout_days: RwLock<BTreeMap<DayKey, WorkoutDay>>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn month_range(member_id: &str, month: YearMonth) -> std::ops::Range<DayKey> {
    (member_id.to_string(), month.first_day())..(member_id.to_string(), month.next_first_day())
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn list_templates(&self, kind: PlanKind, owner_id: &str) -> anyhow::Result<Vec<WeeklyTemplate>> {
        let templates = self.templates.read().await;
        let mut owned: Vec<WeeklyTemplate> = templates
            .values()
            .filter(|t| t.kind == kind && t.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|t| t.created_at);
        Ok(owned)
    }

    async fn get_template(
        &self,
        kind: PlanKind,
        owner_id: &str,
        template_id: Uuid,
    ) -> anyhow::Result<Option<WeeklyTemplate>> {
        let templates = self.templates.read().await;
        Ok(templates.get(&(kind, owner_id.to_string(), template_id)).cloned())
    }

    async fn put_template(&self, template: &WeeklyTemplate) -> anyhow::Result<()> {
        let mut templates = self.templates.write().await;
        let key = (template.kind, template.owner_id.clone(), template.template_id);
        let mut stored = template.clone();
        if let Some(existing) = templates.get(&key) {
            stored.created_at = existing.created_at;
        }
        templates.insert(key, stored);
        Ok(())
    }

    async fn delete_template(&self, kind: PlanKind, owner_id: &str, template_id: Uuid) -> anyhow::Result<bool> {
        let mut templates = self.templates.write().await;
        Ok(templates.remove(&(kind, owner_id.to_string(), template_id)).is_some())
    }

    async fn put_diet_day(&self, day: &DietDay) -> anyhow::Result<()> {
        let mut days = self.diet_days.write().await;
        days.insert((day.member_id.clone(), day.date), day.clone());
        Ok(())
    }

    async fn get_diet_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<Option<DietDay>> {
        let days = self.diet_days.read().await;
        Ok(days.get(&(member_id.to_string(), date)).cloned())
    }

    async fn delete_diet_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<bool> {
        let mut days = self.diet_days.write().await;
        Ok(days.remove(&(member_id.to_string(), date)).is_some())
    }

    async fn diet_days_in_month(&self, member_id: &str, month: YearMonth) -> anyhow::Result<Vec<DietDay>> {
        let days = self.diet_days.read().await;
        Ok(days.range(month_range(member_id, month)).map(|(_, d)| d.clone()).collect())
    }

    async fn put_workout_day(&self, day: &WorkoutDay) -> anyhow::Result<()> {
        let mut days = self.workout_days.write().await;
        days.insert((day.member_id.clone(), day.date), day.clone());
        Ok(())
    }

    async fn get_workout_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<Option<WorkoutDay>> {
        let days = self.workout_days.read().await;
        Ok(days.get(&(member_id.to_string(), date)).cloned())
    }

    async fn delete_workout_day(&self, member_id: &str, date: NaiveDate) -> anyhow::Result<bool> {
        let mut days = self.workout_days.write().await;
        Ok(days.remove(&(member_id.to_string(), date)).is_some())
    }

    async fn workout_days_in_month(&self, member_id: &str, month: YearMonth) -> anyhow::Result<Vec<WorkoutDay>> {
        let days = self.workout_days.read().await;
        Ok(days.range(month_range(member_id, month)).map(|(_, d)| d.clone()).collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
