mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{authed_request, response_json, setup_test_app, token_for_role};

async fn create_course(pool: &PgPool, code: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (course_code, course_name, description, duration, fees) \
         VALUES ($1, 'Course', 'About the course', 8, 100.0) RETURNING id",
    )
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_with_enrollments(pool: PgPool) {
    let token = token_for_role(&pool, "manager").await;
    let rust = create_course(&pool, "RUST-101").await;
    let sql = create_course(&pool, "SQL-201").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/students",
            &token,
            Some(
                serde_json::json!({
                    "student_code": "STU-001",
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": "Ada@Test.com",
                    "phone": "555-0100",
                    "enrolled_courses": [rust, sql],
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    assert_eq!(json["student_code"], "STU-001");
    assert_eq!(json["email"], "ada@test.com");
    // enrollment_date defaults to the insert time when omitted
    assert!(json["enrollment_date"].is_string());

    let mut enrolled: Vec<String> = json["enrolled_courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap().to_string())
        .collect();
    enrolled.sort();
    let mut expected = vec![rust.to_string(), sql.to_string()];
    expected.sort();
    assert_eq!(enrolled, expected);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_duplicate_code(pool: PgPool) {
    let token = token_for_role(&pool, "manager").await;

    let body = serde_json::json!({
        "student_code": "STU-001",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": common::generate_unique_email(),
        "phone": "555-0100",
    })
    .to_string();

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(authed_request("POST", "/api/students", &token, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/students",
            &token,
            Some(
                serde_json::json!({
                    "student_code": "STU-001",
                    "first_name": "Grace",
                    "last_name": "Hopper",
                    "email": common::generate_unique_email(),
                    "phone": "555-0101",
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_replaces_enrollments(pool: PgPool) {
    let token = token_for_role(&pool, "manager").await;
    let rust = create_course(&pool, "RUST-101").await;
    let sql = create_course(&pool, "SQL-201").await;

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/students",
            &token,
            Some(
                serde_json::json!({
                    "student_code": "STU-001",
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": common::generate_unique_email(),
                    "phone": "555-0100",
                    "enrolled_courses": [rust],
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();
    let id = response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(authed_request(
            "PUT",
            &format!("/api/students/{}", id),
            &token,
            Some(serde_json::json!({ "enrolled_courses": [sql] }).to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let enrolled: Vec<&str> = json["enrolled_courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(enrolled, vec![sql.to_string().as_str()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_cannot_write_students(pool: PgPool) {
    let token = token_for_role(&pool, "user").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/students/{}", Uuid::new_v4()),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_not_found(pool: PgPool) {
    let token = token_for_role(&pool, "user").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/students/{}", Uuid::new_v4()),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
