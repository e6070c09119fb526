mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use tower::ServiceExt;

use arrowclass::seeder;

use common::{response_json, setup_test_app};

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_populates_empty_database(pool: PgPool) {
    seeder::run(&pool).await.unwrap();

    assert_eq!(count(&pool, "permissions").await, 10);
    assert_eq!(count(&pool, "roles").await, 3);
    assert_eq!(count(&pool, "users").await, 2);

    let admin_permissions = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM role_permissions rp \
         JOIN roles r ON r.id = rp.role_id WHERE r.name = 'admin'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(admin_permissions, 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_is_idempotent(pool: PgPool) {
    seeder::run(&pool).await.unwrap();
    seeder::run(&pool).await.unwrap();

    assert_eq!(count(&pool, "permissions").await, 10);
    assert_eq!(count(&pool, "roles").await, 3);
    assert_eq!(count(&pool, "users").await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_skips_partially_populated_tables(pool: PgPool) {
    sqlx::query("INSERT INTO roles (name, description) VALUES ('custom', 'Pre-existing role')")
        .execute(&pool)
        .await
        .unwrap();

    seeder::run(&pool).await.unwrap();

    // A non-empty roles table is left alone entirely.
    assert_eq!(count(&pool, "roles").await, 1);
    assert_eq!(count(&pool, "permissions").await, 10);
    // No seeded roles means the default users cannot resolve their role
    // names; the inserts match zero rows.
    assert_eq!(count(&pool, "users").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seeded_admin_can_login(pool: PgPool) {
    seeder::run(&pool).await.unwrap();

    let app = setup_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "email": "vamsee@example.com",
                        "password": "password123",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["user"]["role"]["name"], "admin");
}
