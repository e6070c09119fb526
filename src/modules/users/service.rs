use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::{AppError, unique_violation};
use crate::utils::password::hash_password;

use super::model::{CreateUserDto, RoleSummary, UpdateUserDto, UserView};

/// Flat row for the user + role join; mapped into [`UserView`] so the role
/// expansion happens only at the API boundary.
#[derive(sqlx::FromRow)]
struct UserRoleRow {
    id: Uuid,
    name: String,
    email: String,
    role_id: Uuid,
    role_name: Option<String>,
    role_description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRoleRow> for UserView {
    fn from(row: UserRoleRow) -> Self {
        let role = match (row.role_name, row.role_description) {
            (Some(name), Some(description)) => Some(RoleSummary {
                id: row.role_id,
                name,
                description,
            }),
            _ => None,
        };

        UserView {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_VIEW_QUERY: &str = "SELECT u.id, u.name, u.email, u.role_id, \
     r.name AS role_name, r.description AS role_description, \
     u.created_at, u.updated_at \
     FROM users u LEFT JOIN roles r ON r.id = u.role_id";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<UserView>, AppError> {
        let rows = sqlx::query_as::<_, UserRoleRow>(&format!("{} ORDER BY u.name", USER_VIEW_QUERY))
            .fetch_all(db)
            .await
            .map_err(AppError::database)?;

        Ok(rows.into_iter().map(UserView::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<UserView, AppError> {
        let row = sqlx::query_as::<_, UserRoleRow>(&format!("{} WHERE u.id = $1", USER_VIEW_QUERY))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(row.into())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<UserView, AppError> {
        // Reference check and insert are independent calls; no atomicity
        // across them.
        Self::ensure_role_exists(db, dto.role_id).await?;

        let hashed_password = hash_password(&dto.password)?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password, role_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&dto.name)
        .bind(dto.email.to_lowercase())
        .bind(&hashed_password)
        .bind(dto.role_id)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Email already exists"))?;

        Self::get_user(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<UserView, AppError> {
        #[derive(sqlx::FromRow)]
        struct ExistingUser {
            name: String,
            email: String,
            role_id: Uuid,
        }

        let existing = sqlx::query_as::<_, ExistingUser>(
            "SELECT name, email, role_id FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if let Some(role_id) = dto.role_id {
            if role_id != existing.role_id {
                Self::ensure_role_exists(db, role_id).await?;
            }
        }

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.map(|e| e.to_lowercase()).unwrap_or(existing.email);
        let role_id = dto.role_id.unwrap_or(existing.role_id);

        let result = if let Some(password) = dto.password {
            let hashed_password = hash_password(&password)?;
            sqlx::query(
                "UPDATE users SET name = $1, email = $2, role_id = $3, password = $4, \
                 updated_at = NOW() WHERE id = $5",
            )
            .bind(&name)
            .bind(&email)
            .bind(role_id)
            .bind(&hashed_password)
            .bind(id)
            .execute(db)
            .await
        } else {
            sqlx::query(
                "UPDATE users SET name = $1, email = $2, role_id = $3, \
                 updated_at = NOW() WHERE id = $4",
            )
            .bind(&name)
            .bind(&email)
            .bind(role_id)
            .bind(id)
            .execute(db)
            .await
        };

        result.map_err(|e| unique_violation(e, "Email already exists"))?;

        Self::get_user(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    /// Role options for the user form: id, name and description of every
    /// role.
    #[instrument(skip(db))]
    pub async fn get_role_options(db: &PgPool) -> Result<Vec<RoleSummary>, AppError> {
        #[derive(sqlx::FromRow)]
        struct RoleRow {
            id: Uuid,
            name: String,
            description: String,
        }

        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(rows
            .into_iter()
            .map(|r| RoleSummary {
                id: r.id,
                name: r.name,
                description: r.description,
            })
            .collect())
    }

    async fn ensure_role_exists(db: &PgPool, role_id: Uuid) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM roles WHERE id = $1)")
                .bind(role_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        if !exists {
            return Err(AppError::bad_request(anyhow::anyhow!("Invalid role")));
        }

        Ok(())
    }
}
