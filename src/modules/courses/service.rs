use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::{AppError, unique_violation};

use super::model::{Course, CreateCourseDto, UpdateCourseDto};

const COURSE_COLUMNS: &str =
    "id, course_code, course_name, description, duration, fees, created_at, updated_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn get_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses ORDER BY course_code",
            COURSE_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(course)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (course_code, course_name, description, duration, fees) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(&dto.course_code)
        .bind(&dto.course_name)
        .bind(&dto.description)
        .bind(dto.duration)
        .bind(dto.fees)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Course code already exists"))?;

        Ok(course)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::get_course(db, id).await?;

        let course_code = dto.course_code.unwrap_or(existing.course_code);
        let course_name = dto.course_name.unwrap_or(existing.course_name);
        let description = dto.description.unwrap_or(existing.description);
        let duration = dto.duration.unwrap_or(existing.duration);
        let fees = dto.fees.unwrap_or(existing.fees);

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET course_code = $1, course_name = $2, description = $3, \
             duration = $4, fees = $5, updated_at = NOW() WHERE id = $6 RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(&course_code)
        .bind(&course_name)
        .bind(&description)
        .bind(duration)
        .bind(fees)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Course code already exists"))?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        Ok(())
    }
}
