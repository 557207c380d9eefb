use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{auth::require_staff, json::JsonBody},
    models::{
        auth::AuthenticatedUser,
        plan::{AssignPlanRequest, PlanKind, SaveWeeklyPlanRequest},
    },
    services::{expansion::PlanExpander, weekly_plans::WeeklyPlanService},
    AppState,
};

/// GET /api/weekly-{diet,workout}-plans: templates owned by the caller
pub async fn list_plans(
    State(state): State<AppState>,
    Extension(kind): Extension<PlanKind>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, ApiError> {
    require_staff(&user)?;
    let plans = WeeklyPlanService::list(state.store.as_ref(), kind, &user.user_id).await?;
    Ok(Json(json!({ "success": true, "plans": plans })))
}

/// GET /api/weekly-{diet,workout}-plans/{planId}
pub async fn get_plan(
    State(state): State<AppState>,
    Extension(kind): Extension<PlanKind>,
    user: AuthenticatedUser,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&user)?;
    let plan = WeeklyPlanService::get(state.store.as_ref(), kind, &user.user_id, plan_id).await?;
    Ok(Json(json!({ "success": true, "plan": plan })))
}

/// POST /api/weekly-{diet,workout}-plans
pub async fn create_plan(
    State(state): State<AppState>,
    Extension(kind): Extension<PlanKind>,
    user: AuthenticatedUser,
    JsonBody(body): JsonBody<SaveWeeklyPlanRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_staff(&user)?;
    let plan = WeeklyPlanService::create(
        state.store.as_ref(),
        kind,
        &user.user_id,
        &body.template_name,
        &body.weekly_plan,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "planId": plan.template_id })),
    ))
}

/// PUT /api/weekly-{diet,workout}-plans/{planId}, full overwrite of name and days
pub async fn update_plan(
    State(state): State<AppState>,
    Extension(kind): Extension<PlanKind>,
    user: AuthenticatedUser,
    Path(plan_id): Path<Uuid>,
    JsonBody(body): JsonBody<SaveWeeklyPlanRequest>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&user)?;
    WeeklyPlanService::update(
        state.store.as_ref(),
        kind,
        &user.user_id,
        plan_id,
        &body.template_name,
        &body.weekly_plan,
    )
    .await?;
    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/weekly-{diet,workout}-plans/{planId}
pub async fn delete_plan(
    State(state): State<AppState>,
    Extension(kind): Extension<PlanKind>,
    user: AuthenticatedUser,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&user)?;
    WeeklyPlanService::delete(state.store.as_ref(), kind, &user.user_id, plan_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /api/weekly-{diet,workout}-plans/{planId}/assign
///
/// Always 200 once validation passes; `success` is false if any day failed
/// to save, and the failing entries carry an `error` field.
pub async fn assign_plan(
    State(state): State<AppState>,
    Extension(kind): Extension<PlanKind>,
    user: AuthenticatedUser,
    Path(plan_id): Path<Uuid>,
    JsonBody(body): JsonBody<AssignPlanRequest>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&user)?;
    let store = state.store.as_ref();
    let template = WeeklyPlanService::get(store, kind, &user.user_id, plan_id).await?;
    let results = PlanExpander::expand(store, &template, &body.member_ids, &body.start_dates).await?;

    let all_ok = results.iter().all(|r| r.is_ok());
    let results: Vec<Value> = results
        .into_iter()
        .map(|r| {
            let mut entry = Map::new();
            entry.insert("memberId".into(), json!(r.member_id));
            entry.insert("date".into(), json!(r.date));
            entry.insert(kind.count_field().into(), json!(r.item_count));
            if let Some(error) = r.error {
                entry.insert("error".into(), json!(error));
            }
            Value::Object(entry)
        })
        .collect();

    Ok(Json(json!({ "success": all_ok, "results": results })))
}
