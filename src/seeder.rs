//! Startup seeding of default permissions, roles and users.
//!
//! Each set is inserted only when its table is empty, in dependency order so
//! role permission lists and user role references resolve. "Only when the
//! count is zero" is the entire idempotency guarantee; two instances racing
//! on first startup could double-insert.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::utils::password::hash_password;

const DEFAULT_PERMISSIONS: &[(&str, &str, &str)] = &[
    ("user.create", "Create new users", "User Management"),
    ("user.read", "View user information", "User Management"),
    ("user.update", "Update user information", "User Management"),
    ("user.delete", "Delete users", "User Management"),
    ("user.read.own", "View own profile", "User Management"),
    ("role.manage", "Manage roles and permissions", "Role Management"),
    ("dashboard.view", "Access dashboard", "Dashboard"),
    ("reports.view", "View reports", "Reports"),
    ("settings.manage", "Manage system settings", "Settings"),
    ("system.admin", "Full system administration access", "System"),
];

const ADMIN_PERMISSIONS: &[&str] = &[
    "user.create",
    "user.read",
    "user.update",
    "user.delete",
    "role.manage",
];
const MANAGER_PERMISSIONS: &[&str] = &["user.read", "user.update"];
const USER_PERMISSIONS: &[&str] = &["user.read.own"];

pub async fn run(db: &PgPool) -> Result<()> {
    seed_permissions(db).await?;
    seed_roles(db).await?;
    seed_users(db).await?;
    Ok(())
}

async fn is_empty(db: &PgPool, table: &str) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db)
        .await?;
    Ok(count == 0)
}

async fn seed_permissions(db: &PgPool) -> Result<()> {
    if !is_empty(db, "permissions").await? {
        return Ok(());
    }

    for (name, description, category) in DEFAULT_PERMISSIONS {
        sqlx::query("INSERT INTO permissions (name, description, category) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(description)
            .bind(category)
            .execute(db)
            .await?;
    }

    info!(count = DEFAULT_PERMISSIONS.len(), "Seeded default permissions");
    Ok(())
}

async fn seed_roles(db: &PgPool) -> Result<()> {
    if !is_empty(db, "roles").await? {
        return Ok(());
    }

    seed_role(db, "admin", "Full system access", ADMIN_PERMISSIONS).await?;
    seed_role(db, "manager", "Limited management access", MANAGER_PERMISSIONS).await?;
    seed_role(db, "user", "Basic user access", USER_PERMISSIONS).await?;

    info!("Seeded default roles");
    Ok(())
}

async fn seed_role(
    db: &PgPool,
    name: &str,
    description: &str,
    permission_names: &[&str],
) -> Result<()> {
    let role_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .fetch_one(db)
    .await?;

    for permission_name in permission_names {
        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) \
             SELECT $1, id FROM permissions WHERE name = $2 \
             ON CONFLICT DO NOTHING",
        )
        .bind(role_id)
        .bind(permission_name)
        .execute(db)
        .await?;
    }

    Ok(())
}

async fn seed_users(db: &PgPool) -> Result<()> {
    if !is_empty(db, "users").await? {
        return Ok(());
    }

    seed_user(db, "Vamsee Kalyan", "vamsee@example.com", "password123", "admin").await?;
    seed_user(db, "Krishna Sukanya", "krishna@example.com", "password123", "user").await?;

    info!("Seeded default users");
    Ok(())
}

async fn seed_user(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role_name: &str,
) -> Result<()> {
    let hashed = hash_password(password)
        .map_err(|e| anyhow::anyhow!("failed to hash seed password: {}", e.error))?;

    sqlx::query(
        "INSERT INTO users (name, email, password, role_id) \
         SELECT $1, $2, $3, id FROM roles WHERE name = $4",
    )
    .bind(name)
    .bind(email)
    .bind(&hashed)
    .bind(role_name)
    .execute(db)
    .await?;

    Ok(())
}
