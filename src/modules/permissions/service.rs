use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::{AppError, unique_violation};

use super::model::{CreatePermissionDto, Permission, UpdatePermissionDto};

const PERMISSION_COLUMNS: &str = "id, name, description, category, created_at, updated_at";

pub struct PermissionService;

impl PermissionService {
    #[instrument(skip(db))]
    pub async fn get_permissions(db: &PgPool) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {} FROM permissions ORDER BY category, name",
            PERMISSION_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(permissions)
    }

    #[instrument(skip(db))]
    pub async fn get_permission(db: &PgPool, id: Uuid) -> Result<Permission, AppError> {
        let permission = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {} FROM permissions WHERE id = $1",
            PERMISSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Permission not found")))?;

        Ok(permission)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_permission(
        db: &PgPool,
        dto: CreatePermissionDto,
    ) -> Result<Permission, AppError> {
        let permission = sqlx::query_as::<_, Permission>(&format!(
            "INSERT INTO permissions (name, description, category) \
             VALUES ($1, $2, $3) RETURNING {}",
            PERMISSION_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.category)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Permission already exists"))?;

        Ok(permission)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_permission(
        db: &PgPool,
        id: Uuid,
        dto: UpdatePermissionDto,
    ) -> Result<Permission, AppError> {
        let existing = Self::get_permission(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let description = dto.description.unwrap_or(existing.description);
        let category = dto.category.unwrap_or(existing.category);

        let permission = sqlx::query_as::<_, Permission>(&format!(
            "UPDATE permissions SET name = $1, description = $2, category = $3, \
             updated_at = NOW() WHERE id = $4 RETURNING {}",
            PERMISSION_COLUMNS
        ))
        .bind(&name)
        .bind(&description)
        .bind(&category)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Permission already exists"))?;

        Ok(permission)
    }

    #[instrument(skip(db))]
    pub async fn delete_permission(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Permission not found")));
        }

        Ok(())
    }
}
