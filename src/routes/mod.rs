pub mod daily_records;
pub mod health;
pub mod metrics;
pub mod progress;
pub mod weekly_plans;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{middleware::auth::JwtSecret, models::plan::PlanKind, AppState};

/// Template CRUD and assignment, shared by the diet and workout prefixes.
/// Handlers read which one they serve from the `PlanKind` extension.
fn weekly_plan_routes(kind: PlanKind) -> Router<AppState> {
    Router::new()
        .route("/", get(weekly_plans::list_plans).post(weekly_plans::create_plan))
        .route(
            "/{plan_id}",
            get(weekly_plans::get_plan)
                .put(weekly_plans::update_plan)
                .delete(weekly_plans::delete_plan),
        )
        .route("/{plan_id}/assign", post(weekly_plans::assign_plan))
        .layer(Extension(kind))
}

/// Allow the configured base URL, its subdomains, and localhost.
fn cors_layer(base_url: &str) -> CorsLayer {
    let base = base_url.to_string();
    let origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        if o == base {
            return true;
        }
        if let Some(idx) = base.find("://") {
            let after_scheme = &base[idx + 3..];
            let domain = after_scheme.split('/').next().unwrap_or(after_scheme);
            let domain_clean = domain.split(':').next().unwrap_or(domain);
            if o.ends_with(&format!(".{domain_clean}")) {
                return true;
            }
        }
        false
    });

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(origin)
}

pub fn build_router(state: AppState) -> Router {
    let jwt_secret = JwtSecret(state.config.jwt_secret.clone());
    let cors = cors_layer(&state.config.app_base_url);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Weekly templates
        .nest("/api/weekly-diet-plans", weekly_plan_routes(PlanKind::Diet))
        .nest("/api/weekly-workout-plans", weekly_plan_routes(PlanKind::Workout))
        // Per-day records
        .route(
            "/api/diet-plans/{member_id}/{date}",
            get(daily_records::get_diet_day)
                .put(daily_records::put_diet_day)
                .delete(daily_records::delete_diet_day),
        )
        .route(
            "/api/workout-plans/{member_id}/{date}",
            get(daily_records::get_workout_day)
                .put(daily_records::put_workout_day)
                .delete(daily_records::delete_workout_day),
        )
        // Month view
        .route(
            "/api/calorie-progress/{member_id}/{year_month}/details",
            get(progress::month_details),
        )
        .layer(Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(state)
}
