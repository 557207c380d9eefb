use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use gymdesk_api::{
    config::{Config, StoreBackend},
    db::MemoryPlanStore,
    models::user::UserRole,
    routes::build_router,
    services::auth::issue_access_token,
    AppState,
};

const SECRET: &str = "test-secret";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_app() -> axum::Router {
    let config = Config {
        store_backend: StoreBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        jwt_secret: SECRET.into(),
        host: "127.0.0.1".into(),
        port: 0,
        app_base_url: "http://localhost".into(),
    };
    build_router(AppState {
        store: Arc::new(MemoryPlanStore::new()),
        config: Arc::new(config),
    })
}

fn token(user_id: &str, role: UserRole) -> String {
    issue_access_token(user_id, role, SECRET, 600).unwrap()
}

async fn send(app: &axum::Router, method: &str, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"));
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1_048_576).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn week(field: &str) -> Value {
    let mut days = serde_json::Map::new();
    for day in ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"] {
        days.insert(day.into(), json!({ field: [] }));
    }
    Value::Object(days)
}

fn monday_breakfast_week() -> Value {
    let mut plan = week("meals");
    plan["monday"] = json!({ "meals": [{
        "name": "Oats",
        "mealType": "breakfast",
        "calories": 300.0,
        "carbs": 54.0,
        "proteins": 10.0,
        "fats": 6.0,
        "fibre": 8.0
    }] });
    plan
}

async fn create_diet_plan(app: &axum::Router, coach: &str, plan: Value) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/weekly-diet-plans",
        coach,
        Some(json!({ "weeklyPlan": plan, "templateName": "Monday oats" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    body["planId"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/api/weekly-diet-plans").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_assign_then_month_view_scenario() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);
    let plan_id = create_diet_plan(&app, &coach, monday_breakfast_week()).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/weekly-diet-plans/{plan_id}/assign"),
        &coach,
        Some(json!({ "memberIds": ["m1"], "startDates": ["2024-06-03"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(
        body["results"],
        json!([{ "memberId": "m1", "date": "2024-06-03", "mealsCount": 1 }])
    );

    let member = token("m1", UserRole::Member);
    let (status, body) = send(&app, "GET", "/api/calorie-progress/m1/2024-06/details", &member, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["memberId"], "m1");
    assert_eq!(body["yearMonth"], "2024-06");

    let days = body["dailyDetails"].as_array().unwrap();
    assert_eq!(days.len(), 30);
    for day in days {
        let calories = day["meals"]["nutritionTotals"]["calories"].as_f64().unwrap();
        if day["date"] == "2024-06-03" {
            assert_eq!(calories, 300.0);
            assert_eq!(day["meals"]["breakfast"][0]["name"], "Oats");
        } else {
            assert_eq!(calories, 0.0, "{}", day["date"]);
            assert_eq!(day["workout"]["exercises"], json!([]));
        }
    }
    assert_eq!(body["activeDays"], 1);

    // No records on the empty days of that week.
    let (status, _) = send(&app, "GET", "/api/diet-plans/m1/2024-06-04", &member, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_year_month_is_400() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);
    let (status, body) = send(&app, "GET", "/api/calorie-progress/m1/2024-13/details", &coach, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_missing_day_is_400_naming_the_day() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);
    let mut plan = week("meals");
    plan.as_object_mut().unwrap().remove("wednesday");

    let (status, body) = send(
        &app,
        "POST",
        "/api/weekly-diet-plans",
        &coach,
        Some(json!({ "weeklyPlan": plan, "templateName": "Broken" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("wednesday"), "{body}");
}

#[tokio::test]
async fn test_mismatched_assignment_lengths_is_400() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);
    let plan_id = create_diet_plan(&app, &coach, monday_breakfast_week()).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/weekly-diet-plans/{plan_id}/assign"),
        &coach,
        Some(json!({ "memberIds": ["m1", "m2"], "startDates": ["2024-06-03"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_template_crud() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);
    let plan_id = create_diet_plan(&app, &coach, monday_breakfast_week()).await;
    let uri = format!("/api/weekly-diet-plans/{plan_id}");

    let (status, body) = send(&app, "GET", &uri, &coach, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"]["days"], monday_breakfast_week());
    assert_eq!(body["plan"]["name"], "Monday oats");

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        &coach,
        Some(json!({ "weeklyPlan": week("meals"), "templateName": "Rest week" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/weekly-diet-plans", &coach, None).await;
    let plans = body["plans"].as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["name"], "Rest week");

    // Templates are scoped to their owner.
    let other = token("coach-2", UserRole::Coach);
    let (status, _) = send(&app, "GET", &uri, &other, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, &coach, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &uri, &coach, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_unknown_template_is_404() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/weekly-workout-plans/{}/assign", uuid::Uuid::new_v4()),
        &coach,
        Some(json!({ "memberIds": ["m1"], "startDates": ["2024-06-03"] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_workout_assignment_reports_exercises_count() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);
    let mut plan = week("exercises");
    plan["sunday"] = json!({ "exercises": [
        { "name": "Squat", "bodyPart": "legs", "sets": 5, "reps": 5, "weight": 100 },
        { "name": "Plank", "bodyPart": "core", "sets": 3 }
    ] });

    let (status, body) = send(
        &app,
        "POST",
        "/api/weekly-workout-plans",
        &coach,
        Some(json!({ "weeklyPlan": plan, "templateName": "Sunday legs" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let plan_id = body["planId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/weekly-workout-plans/{plan_id}/assign"),
        &coach,
        Some(json!({ "memberIds": ["m1"], "startDates": ["2024-06-03"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["results"],
        json!([{ "memberId": "m1", "date": "2024-06-09", "exercisesCount": 2 }])
    );

    let (_, body) = send(&app, "GET", "/api/calorie-progress/m1/2024-06/details", &coach, None).await;
    assert_eq!(body["dailyDetails"][8]["workout"]["exercises"][0]["name"], "Squat");
}

#[tokio::test]
async fn test_member_cannot_read_other_member() {
    let app = test_app();
    let member = token("m1", UserRole::Member);

    let (status, _) = send(&app, "GET", "/api/calorie-progress/m2/2024-06/details", &member, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/weekly-diet-plans", &member, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_direct_diet_edit_overwrites_day() {
    let app = test_app();
    let member = token("m1", UserRole::Member);
    let uri = "/api/diet-plans/m1/2024-06-12";

    let (status, body) = send(
        &app,
        "PUT",
        uri,
        &member,
        Some(json!({ "meals": [
            { "name": "Eggs", "mealType": "breakfast", "calories": 150.0 },
            { "name": "Steak", "mealType": "dinner", "totalCalories": 700.0 },
            { "name": "Nuts", "mealType": "snack", "calories": 50.0 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["plan"]["breakfast"][0]["name"], "Eggs");
    assert_eq!(body["plan"]["dinner"][0]["name"], "Steak");
    assert_eq!(body["plan"]["nutritionTotals"]["calories"], 900.0);

    let (status, _) = send(
        &app,
        "PUT",
        uri,
        &member,
        Some(json!({ "meals": [{ "name": "Salad", "mealType": "lunch", "calories": 90.0 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", uri, &member, None).await;
    assert_eq!(body["plan"]["nutritionTotals"]["calories"], 90.0);
    assert_eq!(body["plan"]["lunch"][0]["name"], "Salad");
    assert_eq!(body["plan"]["breakfast"], json!([]));

    let (status, _) = send(&app, "GET", "/api/diet-plans/m1/2024-6-12", &member, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_diet_edit_without_meals_is_rejected_and_keeps_day() {
    let app = test_app();
    let member = token("m1", UserRole::Member);
    let uri = "/api/diet-plans/m1/2024-06-13";

    let (status, _) = send(
        &app,
        "PUT",
        uri,
        &member,
        Some(json!({ "meals": [{ "name": "Eggs", "mealType": "breakfast", "calories": 150.0 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "PUT",
        uri,
        &member,
        Some(json!({ "breakfast": [{ "name": "Toast", "calories": 300.0 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", uri, &member, None).await;
    assert_eq!(body["plan"]["breakfast"][0]["name"], "Eggs");
    assert_eq!(body["plan"]["nutritionTotals"]["calories"], 150.0);
}

#[tokio::test]
async fn test_malformed_bodies_are_400_json() {
    let app = test_app();
    let coach = token("coach-1", UserRole::Coach);

    let (status, body) = send(
        &app,
        "POST",
        "/api/weekly-diet-plans",
        &coach,
        Some(json!({ "weeklyPlan": week("meals") })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("templateName"), "{body}");

    let plan_id = create_diet_plan(&app, &coach, monday_breakfast_week()).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/weekly-diet-plans/{plan_id}/assign"),
        &coach,
        Some(json!({ "memberIds": "m1", "startDates": ["2024-06-03"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let request = Request::builder()
        .method("PUT")
        .uri("/api/workout-plans/m1/2024-06-03")
        .header("Authorization", format!("Bearer {coach}"))
        .body(Body::from("{\"exercises\": [}"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
