use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    middleware::{auth::require_member_access, json::JsonBody},
    models::{
        auth::AuthenticatedUser,
        daily::{PutDietDayRequest, PutWorkoutDayRequest},
    },
    services::{daily_records::DailyRecordService, expansion::parse_iso_date},
    AppState,
};

/// GET /api/diet-plans/{memberId}/{date}
pub async fn get_diet_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((member_id, date)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    require_member_access(&user, &member_id)?;
    let date = parse_iso_date(&date)?;
    let plan = DailyRecordService::get_diet(state.store.as_ref(), &member_id, date).await?;
    Ok(Json(json!({ "success": true, "plan": plan })))
}

/// PUT /api/diet-plans/{memberId}/{date}
pub async fn put_diet_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((member_id, date)): Path<(String, String)>,
    JsonBody(body): JsonBody<PutDietDayRequest>,
) -> Result<Json<Value>, ApiError> {
    require_member_access(&user, &member_id)?;
    let date = parse_iso_date(&date)?;
    let plan = DailyRecordService::put_diet(state.store.as_ref(), &member_id, date, body).await?;
    Ok(Json(json!({ "success": true, "plan": plan })))
}

/// DELETE /api/diet-plans/{memberId}/{date}
pub async fn delete_diet_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((member_id, date)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    require_member_access(&user, &member_id)?;
    let date = parse_iso_date(&date)?;
    DailyRecordService::delete_diet(state.store.as_ref(), &member_id, date).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/workout-plans/{memberId}/{date}
pub async fn get_workout_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((member_id, date)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    require_member_access(&user, &member_id)?;
    let date = parse_iso_date(&date)?;
    let plan = DailyRecordService::get_workout(state.store.as_ref(), &member_id, date).await?;
    Ok(Json(json!({ "success": true, "plan": plan })))
}

/// PUT /api/workout-plans/{memberId}/{date}
pub async fn put_workout_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((member_id, date)): Path<(String, String)>,
    JsonBody(body): JsonBody<PutWorkoutDayRequest>,
) -> Result<Json<Value>, ApiError> {
    require_member_access(&user, &member_id)?;
    let date = parse_iso_date(&date)?;
    let plan = DailyRecordService::put_workout(state.store.as_ref(), &member_id, date, body).await?;
    Ok(Json(json!({ "success": true, "plan": plan })))
}

/// DELETE /api/workout-plans/{memberId}/{date}
pub async fn delete_workout_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((member_id, date)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    require_member_access(&user, &member_id)?;
    let date = parse_iso_date(&date)?;
    DailyRecordService::delete_workout(state.store.as_ref(), &member_id, date).await?;
    Ok(Json(json!({ "success": true })))
}
