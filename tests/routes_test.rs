// ABOUTME: HTTP integration tests for the assembled router
// ABOUTME: Drives registration, authentication, program assignment, and completion end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! HTTP tests against `server::build_router` using `tower::ServiceExt::oneshot`.

mod common;
mod helpers;

use std::sync::Arc;

use common::{create_test_program, create_test_resources, create_test_workout};
use fittrack_server::resources::ServerResources;
use fittrack_server::server::{build_router, MAX_BODY_BYTES};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn register(resources: &Arc<ServerResources>, email: &str) -> String {
    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({
            "email": email,
            "password": "correct horse battery",
            "display_name": "Test Runner"
        }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);

    let body: Value = response.json();
    body["jwt_token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_health_and_ready_need_no_auth() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");

    let response = AxumTestRequest::get("/ready")
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({
            "email": "big@example.com",
            "password": "x".repeat(MAX_BODY_BYTES + 1),
        }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 413);

    // Nothing was created
    assert!(resources
        .database
        .get_user_by_email("big@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let resources = create_test_resources().await.unwrap();
    register(&resources, "Runner@Example.com").await;

    // Duplicate registration is rejected regardless of case
    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({ "email": "runner@example.com", "password": "another password" }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 409);

    let response = AxumTestRequest::post("/auth/login")
        .json(&json!({ "email": "runner@example.com", "password": "wrong password" }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::post("/auth/login")
        .json(&json!({ "email": "runner@example.com", "password": "correct horse battery" }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let token = body["jwt_token"].as_str().unwrap().to_owned();
    assert_eq!(body["user"]["email"], "runner@example.com");

    let response = AxumTestRequest::put("/api/me")
        .bearer(&token)
        .json(&json!({ "fitness_level": "intermediate", "fitness_goal": "run a 10k" }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get("/api/me")
        .bearer(&token)
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 200);
    let profile: Value = response.json();
    assert_eq!(profile["fitness_level"], "intermediate");
    assert_eq!(profile["fitness_goal"], "run a 10k");
    assert_eq!(profile["display_name"], "Test Runner");
    assert!(profile.get("password_hash").is_none());
}

#[tokio::test]
async fn test_registration_validation() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({ "email": "not-an-email", "password": "long enough pw" }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({ "email": "short@example.com", "password": "short" }))
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_api_requires_a_valid_bearer_token() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/api/workouts")
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    let response = AxumTestRequest::get("/api/workouts")
        .bearer("not.a.token")
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::get("/api/workouts")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_assign_schedule_and_complete_over_http() {
    let resources = create_test_resources().await.unwrap();
    let token = register(&resources, "flow@example.com").await;
    let w1 = create_test_workout(&resources.database, "W1").await.unwrap();
    let w2 = create_test_workout(&resources.database, "W2").await.unwrap();
    let program = create_test_program(&resources.database, "Five", 5, &[&w1, &w2])
        .await
        .unwrap();

    let response = AxumTestRequest::get(&format!("/api/programs/{}", program.id))
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["workouts"].as_array().unwrap().len(), 2);

    let response = AxumTestRequest::post(&format!("/api/programs/{}/assign", program.id))
        .bearer(&token)
        .json(&json!({ "start_date": "2025-03-03" }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);
    let assignment: Value = response.json();
    let rows = assignment["scheduled_workouts"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4]["scheduled_date"], "2025-03-15");
    let user_program_id = assignment["user_program"]["id"].as_str().unwrap().to_owned();
    let day1_id = rows[0]["id"].as_str().unwrap().to_owned();

    // A second assignment while active is a conflict
    let response = AxumTestRequest::post(&format!("/api/programs/{}/assign", program.id))
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_CONFLICT");

    let response = AxumTestRequest::get("/api/schedule?date=2025-03-06")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["scheduled_workouts"][0]["program_day"], 2);

    let response = AxumTestRequest::get("/api/schedule/range?start=2025-03-01&end=2025-03-31")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["total"], 5);

    let response = AxumTestRequest::put(&format!("/api/schedule/{day1_id}/completion"))
        .bearer(&token)
        .json(&json!({ "is_completed": true }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let outcome: Value = response.json();
    assert_eq!(outcome["updated_workout"]["is_completed"], true);
    assert_eq!(outcome["user_program"]["current_day"], 2);
    assert!(outcome["completed_workout"].is_object());

    let response = AxumTestRequest::get("/api/completed-workouts")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    let body: Value = response.json();
    assert_eq!(body["total"], 1);

    let response = AxumTestRequest::get("/api/statistics")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let stats: Value = response.json();
    assert_eq!(stats["completed_workouts"], 1);

    let response = AxumTestRequest::post(&format!("/api/user-programs/{user_program_id}/unsubscribe"))
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["is_active"], false);

    let response = AxumTestRequest::get("/api/user-programs/active")
        .bearer(&token)
        .send(build_router(resources))
        .await;
    let body: Value = response.json();
    assert!(body["user_program"].is_null());
}

#[tokio::test]
async fn test_other_users_rows_are_not_found() {
    let resources = create_test_resources().await.unwrap();
    let owner = register(&resources, "owner@example.com").await;
    let intruder = register(&resources, "intruder@example.com").await;
    let w1 = create_test_workout(&resources.database, "W1").await.unwrap();
    let program = create_test_program(&resources.database, "Mine", 2, &[&w1])
        .await
        .unwrap();

    let response = AxumTestRequest::post(&format!("/api/programs/{}/assign", program.id))
        .bearer(&owner)
        .send(build_router(resources.clone()))
        .await;
    let assignment: Value = response.json();
    let row_id = assignment["scheduled_workouts"][0]["id"].as_str().unwrap().to_owned();
    let user_program_id = assignment["user_program"]["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::put(&format!("/api/schedule/{row_id}/completion"))
        .bearer(&intruder)
        .json(&json!({ "is_completed": true }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::post(&format!("/api/user-programs/{user_program_id}/unsubscribe"))
        .bearer(&intruder)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::get("/api/user-programs/active")
        .bearer(&owner)
        .send(build_router(resources))
        .await;
    let body: Value = response.json();
    assert_eq!(body["user_program"]["is_active"], true);
}

#[tokio::test]
async fn test_input_coercion_errors_are_bad_requests() {
    let resources = create_test_resources().await.unwrap();
    let token = register(&resources, "typo@example.com").await;

    let response = AxumTestRequest::get("/api/schedule?date=03/06/2025")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");

    let response = AxumTestRequest::get("/api/schedule/range?start=2025-03-10&end=2025-03-01")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::put("/api/schedule/not-a-uuid/completion")
        .bearer(&token)
        .json(&json!({ "is_completed": true }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/schedule")
        .bearer(&token)
        .json(&json!({
            "workout_id": uuid::Uuid::new_v4().to_string(),
            "scheduled_date": "2025-03-06"
        }))
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_favorites_lifecycle() {
    let resources = create_test_resources().await.unwrap();
    let token = register(&resources, "fan@example.com").await;
    let workout = create_test_workout(&resources.database, "Loved").await.unwrap();
    let path = format!("/api/favorites/{}", workout.id);

    let response = AxumTestRequest::post(&path)
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);

    // Adding again is idempotent
    let response = AxumTestRequest::post(&path)
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get(&format!("/api/workouts/{}", workout.id))
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    let body: Value = response.json();
    assert_eq!(body["is_favorite"], true);
    assert_eq!(body["title"], "Loved");

    let response = AxumTestRequest::delete(&path)
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::delete(&path)
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::post(&format!("/api/favorites/{}", uuid::Uuid::new_v4()))
        .bearer(&token)
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_progress_tests_round_trip() {
    let resources = create_test_resources().await.unwrap();
    let token = register(&resources, "tester@example.com").await;

    let response = AxumTestRequest::post("/api/progress-tests")
        .bearer(&token)
        .json(&json!({ "test_type": "pushups", "result": 32.0, "unit": "reps" }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post("/api/progress-tests")
        .bearer(&token)
        .json(&json!({ "test_type": "", "result": 1.0 }))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::get("/api/progress-tests?test_type=pushups")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["progress_tests"][0]["unit"], "reps");

    let response = AxumTestRequest::get("/api/statistics")
        .bearer(&token)
        .send(build_router(resources))
        .await;
    let stats: Value = response.json();
    assert_eq!(stats["progress_tests"], 1);
    assert_eq!(stats["current_streak"], 0);
}
