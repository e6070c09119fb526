use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{DashboardResponse, DashboardStats};

pub struct DashboardService;

impl DashboardService {
    #[instrument(skip(db))]
    pub async fn get_dashboard(db: &PgPool, user_id: Uuid) -> Result<DashboardResponse, AppError> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .unwrap_or_else(|| "there".to_string());

        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
            .map_err(AppError::database)?;

        Ok(DashboardResponse {
            message: format!("Welcome to dashboard, {}!", name),
            stats: DashboardStats { total_users },
        })
    }
}
