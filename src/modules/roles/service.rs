use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::permissions::model::Permission;
use crate::utils::errors::{AppError, unique_violation};

use super::model::{CreateRoleDto, Role, RoleWithPermissions, UpdateRoleDto};

pub struct RoleService;

impl RoleService {
    #[instrument(skip(db))]
    pub async fn get_roles(db: &PgPool) -> Result<Vec<RoleWithPermissions>, AppError> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at FROM roles ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let mut expanded = Vec::with_capacity(roles.len());
        for role in roles {
            let permissions = Self::get_role_permissions(db, role.id).await?;
            expanded.push(RoleWithPermissions { role, permissions });
        }

        Ok(expanded)
    }

    #[instrument(skip(db))]
    pub async fn get_role(db: &PgPool, id: Uuid) -> Result<RoleWithPermissions, AppError> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at FROM roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Role not found")))?;

        let permissions = Self::get_role_permissions(db, role.id).await?;

        Ok(RoleWithPermissions { role, permissions })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_role(
        db: &PgPool,
        dto: CreateRoleDto,
    ) -> Result<RoleWithPermissions, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Role already exists"))?;

        Self::set_role_permissions(db, id, &dto.permission_ids).await?;

        Self::get_role(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_role(
        db: &PgPool,
        id: Uuid,
        dto: UpdateRoleDto,
    ) -> Result<RoleWithPermissions, AppError> {
        let existing = Self::get_role(db, id).await?;

        let name = dto.name.unwrap_or(existing.role.name);
        let description = dto.description.unwrap_or(existing.role.description);

        sqlx::query(
            "UPDATE roles SET name = $1, description = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(&name)
        .bind(&description)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| unique_violation(e, "Role already exists"))?;

        if let Some(permission_ids) = dto.permission_ids {
            sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
                .bind(id)
                .execute(db)
                .await
                .map_err(AppError::database)?;
            Self::set_role_permissions(db, id, &permission_ids).await?;
        }

        Self::get_role(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_role(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Role not found")));
        }

        Ok(())
    }

    async fn get_role_permissions(db: &PgPool, role_id: Uuid) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT p.id, p.name, p.description, p.category, p.created_at, p.updated_at \
             FROM permissions p \
             JOIN role_permissions rp ON rp.permission_id = p.id \
             WHERE rp.role_id = $1 \
             ORDER BY p.name",
        )
        .bind(role_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(permissions)
    }

    /// Stores the permission id list as given. Ids are not checked against
    /// the catalog; a dangling id simply never expands.
    async fn set_role_permissions(
        db: &PgPool,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<(), AppError> {
        for permission_id in permission_ids {
            sqlx::query(
                "INSERT INTO role_permissions (role_id, permission_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(role_id)
            .bind(permission_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;
        }

        Ok(())
    }
}
