//! Integration tests for authentication and ownership enforcement
//!
//! These run against a real Postgres instance (TEST_DATABASE_URL) and
//! are ignored by default.

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn register_body(email: &str, doctor_id: uuid::Uuid) -> String {
    json!({
        "full_name": "Test Patient",
        "email": email,
        "password": "SecurePassword123!",
        "birth_date": "1990-04-12",
        "birth_place": "Springfield",
        "phone": "123456789",
        "doctor_id": doctor_id,
    })
    .to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let email = format!("register_test_{}@example.com", uuid::Uuid::new_v4());
    let (status, response) = app
        .post("/api/auth/register", &register_body(&email, doctor_id))
        .await;

    assert_eq!(status, StatusCode::CREATED);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Patient registered successfully");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let email = format!("duplicate_{}@example.com", uuid::Uuid::new_v4());
    let body = register_body(&email, doctor_id);

    // First registration should succeed
    let (status, _) = app.post("/api/auth/register", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    // Second registration with same email should fail
    let (status, response) = app.post("/api/auth/register", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"], "Email is already registered");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_invalid_email() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let (status, _) = app
        .post("/api/auth/register", &register_body("not-an-email", doctor_id))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_short_password() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let body = json!({
        "full_name": "Test Patient",
        "email": format!("short_{}@example.com", uuid::Uuid::new_v4()),
        "password": "123",
        "birth_date": "1990-04-12",
        "birth_place": "Springfield",
        "phone": "123456789",
        "doctor_id": doctor_id,
    });

    let (status, _) = app.post("/api/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_unknown_doctor() {
    let app = common::TestApp::new().await;

    let email = format!("no_doc_{}@example.com", uuid::Uuid::new_v4());
    let (status, _) = app
        .post("/api/auth/register", &register_body(&email, uuid::Uuid::new_v4()))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success_issues_token() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let email = format!("login_test_{}@example.com", uuid::Uuid::new_v4());
    app.post("/api/auth/register", &register_body(&email, doctor_id))
        .await;

    let login_body = json!({
        "email": email,
        "password": "SecurePassword123!"
    });
    let (status, response) = app.post("/api/auth/login", &login_body.to_string()).await;

    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let token = response["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);

    // The token carries the patient role and a UUID subject
    let verifier = medtrack_backend::auth::TokenService::new(common::JWT_SECRET, 3600);
    let claims = verifier.verify(token).unwrap();
    assert_eq!(claims.role, medtrack_shared::types::Role::Patient);
    assert!(uuid::Uuid::parse_str(&claims.sub).is_ok());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let email = format!("wrong_pass_{}@example.com", uuid::Uuid::new_v4());
    app.post("/api/auth/register", &register_body(&email, doctor_id))
        .await;

    let login_body = json!({
        "email": email,
        "password": "WrongPassword123!"
    });
    let (status, response) = app.post("/api/auth/login", &login_body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"], "Wrong password");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_unknown_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": format!("nonexistent_{}@example.com", uuid::Uuid::new_v4()),
        "password": "SomePassword123!"
    });

    let (status, response) = app.post("/api/auth/login", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"], "No account exists for that email");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_patient_sees_only_own_measurements() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    // Two independent patients under the same doctor
    let email_a = format!("own_a_{}@example.com", uuid::Uuid::new_v4());
    let email_b = format!("own_b_{}@example.com", uuid::Uuid::new_v4());
    app.post("/api/auth/register", &register_body(&email_a, doctor_id))
        .await;
    app.post("/api/auth/register", &register_body(&email_b, doctor_id))
        .await;

    let token_a = login(&app, &email_a).await;
    let token_b = login(&app, &email_b).await;

    let measurement = json!({
        "recorded_on": "2024-03-01",
        "blood_pressure": 120,
        "pulse": 72,
        "weight_kg": 70.5,
        "blood_sugar": 5.2
    });
    let (status, created) = app
        .post_auth("/api/measurements", &measurement.to_string(), &token_a)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let measurement_id = created["id"].as_str().unwrap().to_string();

    // Owner sees it
    let (status, list) = app.get_auth("/api/measurements", &token_a).await;
    assert_eq!(status, StatusCode::OK);
    let list: serde_json::Value = serde_json::from_str(&list).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    // The other patient does not
    let (status, list) = app.get_auth("/api/measurements", &token_b).await;
    assert_eq!(status, StatusCode::OK);
    let list: serde_json::Value = serde_json::from_str(&list).unwrap();
    assert!(list.as_array().unwrap().is_empty());

    // And cannot delete it either
    let (status, response) = app
        .delete_auth(&format!("/api/measurements/{}", measurement_id), &token_b)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"], "You do not have access to this resource");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_patient_cannot_touch_another_patients_profile() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let email_a = format!("prof_a_{}@example.com", uuid::Uuid::new_v4());
    let email_b = format!("prof_b_{}@example.com", uuid::Uuid::new_v4());
    app.post("/api/auth/register", &register_body(&email_a, doctor_id))
        .await;
    app.post("/api/auth/register", &register_body(&email_b, doctor_id))
        .await;

    let token_a = login(&app, &email_a).await;
    let token_b = login(&app, &email_b).await;

    let (status, profile_a) = app.get_auth("/api/patients/me", &token_a).await;
    assert_eq!(status, StatusCode::OK);
    let profile_a: serde_json::Value = serde_json::from_str(&profile_a).unwrap();
    let id_a = profile_a["id"].as_str().unwrap().to_string();

    // B updating A's existing profile is 403, not 404
    let update = json!({"phone": "987654321"});
    let (status, response) = app
        .put_auth(&format!("/api/patients/{}", id_a), &update.to_string(), &token_b)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"], "You do not have access to this resource");

    // Same for deletion
    let (status, _) = app
        .delete_auth(&format!("/api/patients/{}", id_a), &token_b)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A's profile is untouched
    let (status, profile_a) = app.get_auth("/api/patients/me", &token_a).await;
    assert_eq!(status, StatusCode::OK);
    let profile_a: serde_json::Value = serde_json::from_str(&profile_a).unwrap();
    assert_eq!(profile_a["phone"], "123456789");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_missing_measurement_is_not_found_before_forbidden() {
    let app = common::TestApp::new().await;
    let doctor_id = app
        .seed_doctor(&format!("dr_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    let email = format!("nf_{}@example.com", uuid::Uuid::new_v4());
    app.post("/api/auth/register", &register_body(&email, doctor_id))
        .await;
    let token = login(&app, &email).await;

    let (status, _) = app
        .delete_auth(&format!("/api/measurements/{}", uuid::Uuid::new_v4()), &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_doctor_roster_is_filtered_server_side() {
    let app = common::TestApp::new().await;
    let doctor_email = format!("dr_roster_{}@example.com", uuid::Uuid::new_v4());
    let doctor_id = app.seed_doctor(&doctor_email, "DoctorPass1").await;
    let other_doctor_id = app
        .seed_doctor(&format!("dr_other_{}@example.com", uuid::Uuid::new_v4()), "DoctorPass1")
        .await;

    // One patient for each doctor
    let email_mine = format!("roster_mine_{}@example.com", uuid::Uuid::new_v4());
    let email_other = format!("roster_other_{}@example.com", uuid::Uuid::new_v4());
    app.post("/api/auth/register", &register_body(&email_mine, doctor_id))
        .await;
    app.post("/api/auth/register", &register_body(&email_other, other_doctor_id))
        .await;

    let login_body = json!({"email": doctor_email, "password": "DoctorPass1"});
    let (status, response) = app.post("/api/auth/login", &login_body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let doctor_token = response["token"].as_str().unwrap().to_string();

    let (status, roster) = app.get_auth("/api/patients/doctor", &doctor_token).await;
    assert_eq!(status, StatusCode::OK);
    let roster: serde_json::Value = serde_json::from_str(&roster).unwrap();
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["email"], email_mine.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_protected_endpoint_with_garbage_token() {
    let app = common::TestApp::new().await;

    let fake_token =
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIiwiZXhwIjoxfQ.invalid";

    let (status, _) = app.get_auth("/api/patients/me", fake_token).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

async fn login(app: &common::TestApp, email: &str) -> String {
    let body = json!({"email": email, "password": "SecurePassword123!"});
    let (status, response) = app.post("/api/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    response["token"].as_str().unwrap().to_string()
}
