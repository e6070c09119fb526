use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    /// Institute-assigned identifier, e.g. "C001". Unique, separate from the
    /// primary key.
    pub course_code: String,
    pub course_name: String,
    pub description: String,
    /// Duration in months.
    pub duration: i32,
    pub fees: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1))]
    pub course_code: String,
    #[validate(length(min = 1))]
    pub course_name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 0.0))]
    pub fees: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1))]
    pub course_code: Option<String>,
    #[validate(length(min = 1))]
    pub course_name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[validate(range(min = 0.0))]
    pub fees: Option<f64>,
}
