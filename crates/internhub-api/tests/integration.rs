// HTTP-level tests exercising the full router via tower::ServiceExt::oneshot,
// backed by an in-memory database. No TCP server is started.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use internhub_api::applications::allow_any_transition;
use internhub_api::auth::{AppState, AppStateInner};
use internhub_api::routes::create_router;
use internhub_db::Database;

fn build_app() -> Router {
    let db = Database::open_in_memory().unwrap();
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret: "integration-test-secret".into(),
        status_policy: allow_any_transition,
    });
    create_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register a student account, returning (user_id, token).
async fn register_student(app: &Router, email: &str) -> (String, String) {
    let payload = json!({
        "email": email,
        "password": "hunter2hunter2",
        "user_type": "Student",
        "first_name": "Ada",
        "last_name": "Lovelace",
    });
    let (status, body) = send(app, "POST", "/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["user_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// Register a company account, returning (user_id, token).
async fn register_company(app: &Router, email: &str, name: &str) -> (String, String) {
    let payload = json!({
        "email": email,
        "password": "hunter2hunter2",
        "user_type": "Company",
        "company_name": name,
    });
    let (status, body) = send(app, "POST", "/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["user_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// Create a published internship as the given company, returning its id.
async fn create_internship(app: &Router, token: &str) -> String {
    let payload = json!({
        "title": "Backend Intern",
        "start_date": "2026-06-01",
        "end_date": "2026-09-01",
        "location": "Lisbon",
        "min_salary": 1000,
        "max_salary": 1500,
    });
    let (status, body) = send(app, "POST", "/internships", Some(token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["internship_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_then_login() {
    let app = build_app();
    let (user_id, _) = register_student(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "hunter2hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"].as_str().unwrap(), user_id);
    assert_eq!(body["user_type"], "Student");
    assert!(body["token"].as_str().is_some());

    // Wrong password never leaks whether the account exists
    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = build_app();
    register_student(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "hunter2hunter2",
            "user_type": "Company",
            "company_name": "Acme",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Email"));
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let app = build_app();

    for payload in [
        json!({ "email": "", "password": "hunter2hunter2", "user_type": "Student" }),
        json!({ "email": "not-an-email", "password": "hunter2hunter2", "user_type": "Student" }),
        json!({ "email": "a@b.com", "password": "short", "user_type": "Student" }),
        json!({ "email": "a@b.com", "password": "hunter2hunter2", "user_type": "Wizard" }),
    ] {
        let (status, _) = send(&app, "POST", "/auth/register", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = build_app();

    let (status, _) = send(&app, "GET", "/saved", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/saved", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Public surface stays open
    let (status, _) = send(&app, "GET", "/internships", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/companies", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn internship_crud_with_ownership() {
    let app = build_app();
    let (company_id, owner) = register_company(&app, "acme@example.com", "Acme").await;
    let (_, rival) = register_company(&app, "rival@example.com", "Rival").await;
    let internship_id = create_internship(&app, &owner).await;

    let (status, body) = send(&app, "GET", &format!("/internships/{internship_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Backend Intern");
    assert_eq!(body["company_id"].as_str().unwrap(), company_id);
    assert_eq!(body["status"], "Published");

    // A missing id is NotFound even for a non-owner
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/internships/{}", uuid::Uuid::new_v4()),
        Some(&rival),
        Some(json!({ "title": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Non-owner cannot touch an existing posting
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/internships/{internship_id}"),
        Some(&rival),
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/internships/{internship_id}"),
        Some(&rival),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Owner partial update leaves other fields alone
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/internships/{internship_id}"),
        Some(&owner),
        Some(json!({ "title": "Platform Intern" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &format!("/internships/{internship_id}"), None, None).await;
    assert_eq!(body["title"], "Platform Intern");
    assert_eq!(body["location"], "Lisbon");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/internships/{internship_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/internships/{internship_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn students_cannot_manage_postings() {
    let app = build_app();
    let (_, student) = register_student(&app, "ada@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/internships",
        Some(&student),
        Some(json!({
            "title": "X",
            "start_date": "2026-06-01",
            "end_date": "2026-09-01",
            "location": "Lisbon",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_internship_requires_core_fields() {
    let app = build_app();
    let (_, company) = register_company(&app, "acme@example.com", "Acme").await;

    let (status, _) = send(
        &app,
        "POST",
        "/internships",
        Some(&company),
        Some(json!({ "title": "No dates" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn public_listing_filters_and_pages() {
    let app = build_app();
    let (_, company) = register_company(&app, "acme@example.com", "Acme").await;
    create_internship(&app, &company).await;
    create_internship(&app, &company).await;

    let (status, body) = send(&app, "GET", "/internships", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["company_name"], "Acme");

    let (_, body) = send(&app, "GET", "/internships?limit=1", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/internships?location=Porto", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn application_lifecycle() {
    let app = build_app();
    let (company_id, company) = register_company(&app, "acme@example.com", "Acme").await;
    let (student_id, student) = register_student(&app, "ada@example.com").await;
    let internship_id = create_internship(&app, &company).await;

    // Submit
    let (status, body) = send(
        &app,
        "POST",
        "/applications",
        Some(&student),
        Some(json!({ "internship_id": &internship_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Pending");

    // A second submission for the same pair is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/applications",
        Some(&student),
        Some(json!({ "internship_id": &internship_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Student sees the pending application with posting fields attached
    let (status, body) = send(&app, "GET", "/applications/student", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    let apps = body.as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["status"], "Pending");
    assert_eq!(apps[0]["company_name"], "Acme");

    // Owning company accepts it
    let (status, _) = send(
        &app,
        "PUT",
        "/applications/status",
        Some(&company),
        Some(json!({
            "student_id": &student_id,
            "internship_id": &internship_id,
            "status": "Accepted",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/applications/student", Some(&student), None).await;
    assert_eq!(body[0]["status"], "Accepted");

    // Per-internship view is owner-only
    let (status, body) = send(
        &app,
        "GET",
        &format!("/applications/internship/{internship_id}"),
        Some(&company),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, rival) = register_company(&app, "rival@example.com", "Rival").await;
    let (status, _) = send(
        &app,
        "GET",
        &format!("/applications/internship/{internship_id}"),
        Some(&rival),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A non-owner cannot flip the status, and the stored value survives
    let (status, _) = send(
        &app,
        "PUT",
        "/applications/status",
        Some(&rival),
        Some(json!({
            "student_id": &student_id,
            "internship_id": &internship_id,
            "status": "Rejected",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, body) = send(&app, "GET", "/applications/student", Some(&student), None).await;
    assert_eq!(body[0]["status"], "Accepted");

    // Company-wide view carries the applicant profile
    let (status, body) = send(
        &app,
        "GET",
        &format!("/applications/company/{company_id}"),
        Some(&company),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["first_name"], "Ada");
    assert_eq!(rows[0]["email"], "ada@example.com");
    assert_eq!(rows[0]["status"], "Accepted");

    // And only for the company's own id
    let (status, _) = send(
        &app,
        "GET",
        &format!("/applications/company/{company_id}"),
        Some(&rival),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn application_edge_cases() {
    let app = build_app();
    let (_, company) = register_company(&app, "acme@example.com", "Acme").await;
    let (student_id, student) = register_student(&app, "ada@example.com").await;
    let internship_id = create_internship(&app, &company).await;

    // Companies cannot apply
    let (status, _) = send(
        &app,
        "POST",
        "/applications",
        Some(&company),
        Some(json!({ "internship_id": &internship_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Applying to a missing posting
    let (status, _) = send(
        &app,
        "POST",
        "/applications",
        Some(&student),
        Some(json!({ "internship_id": uuid::Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Missing body field
    let (status, _) = send(&app, "POST", "/applications", Some(&student), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Status update validation
    let (status, _) = send(
        &app,
        "PUT",
        "/applications/status",
        Some(&company),
        Some(json!({ "student_id": &student_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/applications/status",
        Some(&company),
        Some(json!({
            "student_id": &student_id,
            "internship_id": &internship_id,
            "status": "Maybe",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No application on file for this pair
    let (status, _) = send(
        &app,
        "PUT",
        "/applications/status",
        Some(&company),
        Some(json!({
            "student_id": &student_id,
            "internship_id": &internship_id,
            "status": "Accepted",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saved_internships_flow() {
    let app = build_app();
    let (_, company) = register_company(&app, "acme@example.com", "Acme").await;
    let (_, student) = register_student(&app, "ada@example.com").await;
    let internship_id = create_internship(&app, &company).await;

    // Saving a missing posting
    let (status, _) = send(
        &app,
        "POST",
        "/saved",
        Some(&student),
        Some(json!({ "internship_id": uuid::Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/saved",
        Some(&student),
        Some(json!({ "internship_id": &internship_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Saving twice is a conflict, and the count stays at one
    let (status, _) = send(
        &app,
        "POST",
        "/saved",
        Some(&student),
        Some(json!({ "internship_id": &internship_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, "GET", "/saved/count", Some(&student), None).await;
    assert_eq!(body["count"], 1);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/saved/check/{internship_id}"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(body["is_saved"], true);

    let (status, body) = send(&app, "GET", "/saved", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    let saved = body.as_array().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["internship"]["title"], "Backend Intern");
    assert_eq!(saved[0]["internship"]["company_name"], "Acme");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/saved/{internship_id}"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Already removed
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/saved/{internship_id}"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Companies have no saved list
    let (status, _) = send(&app, "GET", "/saved", Some(&company), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleting_an_internship_cascades() {
    let app = build_app();
    let (_, company) = register_company(&app, "acme@example.com", "Acme").await;
    let (_, student) = register_student(&app, "ada@example.com").await;
    let internship_id = create_internship(&app, &company).await;

    let (status, _) = send(
        &app,
        "POST",
        "/applications",
        Some(&student),
        Some(json!({ "internship_id": &internship_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(
        &app,
        "POST",
        "/saved",
        Some(&student),
        Some(json!({ "internship_id": &internship_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/internships/{internship_id}"),
        Some(&company),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Posting and every dependent row are gone
    let (status, _) = send(&app, "GET", &format!("/internships/{internship_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/applications/student", Some(&student), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = send(&app, "GET", "/saved", Some(&student), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
    let (_, body) = send(&app, "GET", "/saved/count", Some(&student), None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn student_profile_roundtrip() {
    let app = build_app();
    let (_, student) = register_student(&app, "ada@example.com").await;

    let (status, body) = send(&app, "GET", "/students/me", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Ada");

    let (status, _) = send(
        &app,
        "PUT",
        "/students/me",
        Some(&student),
        Some(json!({ "university": "IST", "gpa": 3.7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/students/education",
        Some(&student),
        Some(json!({
            "institution": "IST",
            "diploma": "BSc Computer Science",
            "start_date": "2023-09-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/students/skills",
        Some(&student),
        Some(json!({ "skill": "Rust" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/students/experience",
        Some(&student),
        Some(json!({
            "title": "Intern",
            "company_name": "Acme",
            "start_date": "2025-06-01",
            "end_date": "2025-09-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/students/me/full", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["university"], "IST");
    assert_eq!(body["education"].as_array().unwrap().len(), 1);
    assert_eq!(body["skills"], json!(["Rust"]));
    assert_eq!(body["experience"][0]["title"], "Intern");

    // Deletions
    let (status, _) = send(
        &app,
        "DELETE",
        "/students/skills/Rust",
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "DELETE",
        "/students/skills/Rust",
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "DELETE",
        "/students/education",
        Some(&student),
        Some(json!({ "institution": "IST", "diploma": "BSc Computer Science" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Company tokens are rejected on the student surface
    let (_, company) = register_company(&app, "acme@example.com", "Acme").await;
    let (status, _) = send(&app, "GET", "/students/me", Some(&company), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn company_profile_and_directory() {
    let app = build_app();
    let (company_id, company) = register_company(&app, "acme@example.com", "Acme").await;

    let (status, _) = send(
        &app,
        "PUT",
        "/companies/me",
        Some(&company),
        Some(json!({ "website": "https://acme.example", "industry": "Robotics" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/companies/benefits",
        Some(&company),
        Some(json!({ "benefit": "Gym" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/companies/me/full", Some(&company), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company_name"], "Acme");
    assert_eq!(body["industry"], "Robotics");
    assert_eq!(body["benefits"], json!(["Gym"]));

    let (status, _) = send(
        &app,
        "DELETE",
        "/companies/benefits",
        Some(&company),
        Some(json!({ "benefit": "Gym" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Directory is public and includes the registered company
    let (status, body) = send(&app, "GET", "/companies", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let companies = body.as_array().unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0]["company_id"].as_str().unwrap(), company_id);
    assert_eq!(companies[0]["industry"], "Robotics");

    // Student tokens are rejected on the company surface
    let (_, student) = register_student(&app, "ada@example.com").await;
    let (status, _) = send(&app, "GET", "/companies/me", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
