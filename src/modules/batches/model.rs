use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::courses::model::Course;
use crate::modules::faculties::model::Faculty;
use crate::modules::students::model::Student;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Batch {
    pub id: Uuid,
    /// Institute-assigned identifier, e.g. "B001".
    pub batch_code: String,
    pub batch_name: String,
    pub course_id: Uuid,
    pub faculty_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Batch with course, faculty and roster expanded. `course`/`faculty` are
/// `None` and roster entries are absent when the underlying reference
/// dangles.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchView {
    #[serde(flatten)]
    pub batch: Batch,
    pub course: Option<Course>,
    pub faculty: Option<Faculty>,
    pub students: Vec<Student>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBatchDto {
    #[validate(length(min = 1))]
    pub batch_code: String,
    #[validate(length(min = 1))]
    pub batch_name: String,
    pub course_id: Uuid,
    pub faculty_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBatchDto {
    #[validate(length(min = 1))]
    pub batch_code: Option<String>,
    #[validate(length(min = 1))]
    pub batch_name: Option<String>,
    pub course_id: Option<Uuid>,
    pub faculty_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub student_ids: Option<Vec<Uuid>>,
}
