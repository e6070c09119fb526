mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{authed_request, response_json, setup_test_app, token_for_role};

#[sqlx::test(migrations = "./migrations")]
async fn test_permission_round_trip(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/permissions",
            &token,
            Some(
                serde_json::json!({
                    "name": "reports.view",
                    "description": "View reports",
                    "category": "Reports",
                })
                .to_string(),
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["name"], "reports.view");
    assert_eq!(created["category"], "Reports");

    let id = created["id"].as_str().unwrap();
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/permissions/{}", id),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, created);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_permission_duplicate_name(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;

    let body = serde_json::json!({
        "name": "reports.view",
        "description": "View reports",
        "category": "Reports",
    })
    .to_string();

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/permissions",
            &token,
            Some(body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(authed_request("POST", "/api/permissions", &token, Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Permission already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_permission_partial(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/permissions",
            &token,
            Some(
                serde_json::json!({
                    "name": "settings.manage",
                    "description": "Manage system settings",
                    "category": "Settings",
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
            &format!("/api/permissions/{}", id),
            &token,
            Some(serde_json::json!({ "description": "Manage settings" }).to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["description"], "Manage settings");
    assert_eq!(json["name"], "settings.manage");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_permission_not_found(pool: PgPool) {
    let token = token_for_role(&pool, "admin").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/permissions/{}", Uuid::new_v4()),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_permissions_admin_only(pool: PgPool) {
    let token = token_for_role(&pool, "user").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(authed_request("GET", "/api/permissions", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
