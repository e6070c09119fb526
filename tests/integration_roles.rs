mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{authed_request, response_json, setup_test_app, token_for_role};

async fn create_permission(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO permissions (name, description, category) \
         VALUES ($1, 'test permission', 'Test') RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_roles_admin_only(pool: PgPool) {
    let token = token_for_role(&pool, "manager").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request("GET", "/api/roles", &token, None))
        .await
        .unwrap();

    // Managers can read users but not roles.
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_role_with_permissions(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;
    let read = create_permission(&pool, "user.read").await;
    let update = create_permission(&pool, "user.update").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/roles",
            &token,
            Some(
                serde_json::json!({
                    "name": "auditor",
                    "description": "Read-only oversight",
                    "permission_ids": [read, update],
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    assert_eq!(json["name"], "auditor");

    let names: Vec<&str> = json["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["user.read", "user.update"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_role_duplicate_name(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/roles",
            &token,
            Some(
                serde_json::json!({
                    "name": "admin",
                    "description": "Shadow admin",
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"], "Role already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_role_replaces_permission_set(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;
    let read = create_permission(&pool, "user.read").await;
    let manage = create_permission(&pool, "role.manage").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/roles",
            &token,
            Some(
                serde_json::json!({
                    "name": "auditor",
                    "description": "Read-only oversight",
                    "permission_ids": [read],
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();
    let role_id = response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(authed_request(
            "PUT",
            &format!("/api/roles/{}", role_id),
            &token,
            Some(serde_json::json!({ "permission_ids": [manage] }).to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let names: Vec<&str> = json["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    // The old set is replaced, not appended to.
    assert_eq!(names, vec!["role.manage"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_role_keeps_users_dangling(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;
    let member_role = common::create_role(&pool, "user", "Basic user access").await;
    let user_id = common::create_user(
        &pool,
        "Orphaned",
        &common::generate_unique_email(),
        "password123",
        member_role,
    )
    .await;

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/roles/{}", member_role),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The user survives with its role reference unresolved.
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/users/{}", user_id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert!(json["role"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_role_not_found(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/roles/{}", Uuid::new_v4()),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
