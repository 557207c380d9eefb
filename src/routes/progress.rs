use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{
    error::ApiError,
    middleware::auth::require_member_access,
    models::auth::AuthenticatedUser,
    services::progress::MonthlyAggregator,
    AppState,
};

/// GET /api/calorie-progress/{memberId}/{yearMonth}/details
pub async fn month_details(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((member_id, year_month)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    require_member_access(&user, &member_id)?;
    let details = MonthlyAggregator::aggregate(state.store.as_ref(), &member_id, &year_month).await?;

    let mut body = serde_json::to_value(details).map_err(anyhow::Error::from)?;
    if let Some(obj) = body.as_object_mut() {
        obj.insert("success".into(), Value::Bool(true));
    }
    Ok(Json(body))
}
