use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use sqlx::PgPool;
use uuid::Uuid;

use arrowclass::config::cors::CorsConfig;
use arrowclass::config::jwt::JwtConfig;
use arrowclass::router::init_router;
use arrowclass::state::AppState;
use arrowclass::utils::jwt::create_token;
use arrowclass::utils::password::hash_password;

pub fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub async fn create_role(pool: &PgPool, name: &str, description: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role_id: Uuid,
) -> Uuid {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, role_id) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(email.to_lowercase())
    .bind(hashed)
    .bind(role_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Creates a role with the given name plus a user holding it, and returns a
/// bearer token for that user.
#[allow(dead_code)]
pub async fn token_for_role(pool: &PgPool, role_name: &str) -> String {
    let role_id = create_role(pool, role_name, "test role").await;
    let email = generate_unique_email();
    let user_id = create_user(pool, "Test User", &email, "password123", role_id).await;
    issue_token(user_id, &email)
}

#[allow(dead_code)]
pub fn issue_token(user_id: Uuid, email: &str) -> String {
    dotenvy::dotenv().ok();
    create_token(user_id, email, &JwtConfig::from_env()).unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn authed_request(method: &str, uri: &str, token: &str, body: Option<String>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token));

    match body {
        Some(body) => builder.body(Body::from(body)).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[allow(dead_code)]
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
