use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Verifies credentials and issues a token.
    ///
    /// An unknown email and a wrong password produce the same 401 message so
    /// the endpoint cannot be used to enumerate accounts.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserAuthRow {
            id: Uuid,
            email: String,
            password: String,
        }

        let row = sqlx::query_as::<_, UserAuthRow>(
            "SELECT id, email, password FROM users WHERE email = $1",
        )
        .bind(dto.email.to_lowercase())
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid email or password")))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let token = create_token(row.id, &row.email, jwt_config)?;
        let user = UserService::get_user(db, row.id).await?;

        Ok(LoginResponse { token, user })
    }
}
