mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use tower::ServiceExt;

use arrowclass::config::jwt::JwtConfig;
use arrowclass::utils::jwt::verify_token;

use common::{create_role, create_user, generate_unique_email, response_json, setup_test_app};

fn login_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let role_id = create_role(&pool, "admin", "Full system access").await;
    let email = generate_unique_email();
    let user_id = create_user(&pool, "Login User", &email, "password123", role_id).await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(login_request(serde_json::json!({
            "email": email,
            "password": "password123",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let claims = verify_token(json["token"].as_str().unwrap(), &JwtConfig::from_env()).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, email);

    assert_eq!(json["user"]["id"], user_id.to_string());
    assert_eq!(json["user"]["email"], email);
    assert_eq!(json["user"]["role"]["name"], "admin");
    // The password hash must never leave the service layer.
    assert!(json["user"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_email_is_case_insensitive(pool: PgPool) {
    let role_id = create_role(&pool, "user", "Basic user access").await;
    create_user(&pool, "Case User", "case@test.com", "password123", role_id).await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(login_request(serde_json::json!({
            "email": "CASE@Test.Com",
            "password": "password123",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let role_id = create_role(&pool, "user", "Basic user access").await;
    let email = generate_unique_email();
    create_user(&pool, "Login User", &email, "password123", role_id).await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(login_request(serde_json::json!({
            "email": email,
            "password": "wrong-password",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email_uses_same_message(pool: PgPool) {
    let app = setup_test_app(pool);
    let response = app
        .oneshot(login_request(serde_json::json!({
            "email": "nobody@test.com",
            "password": "password123",
        })))
        .await
        .unwrap();

    // Same status and message as a wrong password, so the endpoint cannot be
    // used to probe which emails exist.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_invalid_email_format(pool: PgPool) {
    let app = setup_test_app(pool);
    let response = app
        .oneshot(login_request(serde_json::json!({
            "email": "not-an-email",
            "password": "password123",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_password_field(pool: PgPool) {
    let app = setup_test_app(pool);
    let response = app
        .oneshot(login_request(serde_json::json!({
            "email": "somebody@test.com",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
