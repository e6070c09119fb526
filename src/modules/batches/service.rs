use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::Course;
use crate::modules::faculties::model::Faculty;
use crate::modules::students::model::Student;
use crate::utils::errors::{AppError, unique_violation};

use super::model::{Batch, BatchView, CreateBatchDto, UpdateBatchDto};

const BATCH_COLUMNS: &str = "id, batch_code, batch_name, course_id, faculty_id, \
     start_date, end_date, created_at, updated_at";

pub struct BatchService;

impl BatchService {
    #[instrument(skip(db))]
    pub async fn get_batches(db: &PgPool) -> Result<Vec<BatchView>, AppError> {
        let batches = sqlx::query_as::<_, Batch>(&format!(
            "SELECT {} FROM batches ORDER BY batch_code",
            BATCH_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let mut views = Vec::with_capacity(batches.len());
        for batch in batches {
            views.push(Self::expand(db, batch).await?);
        }

        Ok(views)
    }

    #[instrument(skip(db))]
    pub async fn get_batch(db: &PgPool, id: Uuid) -> Result<BatchView, AppError> {
        let batch = sqlx::query_as::<_, Batch>(&format!(
            "SELECT {} FROM batches WHERE id = $1",
            BATCH_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Batch not found")))?;

        Self::expand(db, batch).await
    }

    #[instrument(skip(db, dto))]
    pub async fn create_batch(db: &PgPool, dto: CreateBatchDto) -> Result<BatchView, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO batches (batch_code, batch_name, course_id, faculty_id, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&dto.batch_code)
        .bind(&dto.batch_name)
        .bind(dto.course_id)
        .bind(dto.faculty_id)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Batch code already exists"))?;

        Self::set_students(db, id, &dto.student_ids).await?;

        Self::get_batch(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_batch(
        db: &PgPool,
        id: Uuid,
        dto: UpdateBatchDto,
    ) -> Result<BatchView, AppError> {
        let existing = Self::get_batch(db, id).await?;

        let batch_code = dto.batch_code.unwrap_or(existing.batch.batch_code);
        let batch_name = dto.batch_name.unwrap_or(existing.batch.batch_name);
        let course_id = dto.course_id.unwrap_or(existing.batch.course_id);
        let faculty_id = dto.faculty_id.unwrap_or(existing.batch.faculty_id);
        let start_date = dto.start_date.unwrap_or(existing.batch.start_date);
        let end_date = dto.end_date.unwrap_or(existing.batch.end_date);

        sqlx::query(
            "UPDATE batches SET batch_code = $1, batch_name = $2, course_id = $3, \
             faculty_id = $4, start_date = $5, end_date = $6, updated_at = NOW() WHERE id = $7",
        )
        .bind(&batch_code)
        .bind(&batch_name)
        .bind(course_id)
        .bind(faculty_id)
        .bind(start_date)
        .bind(end_date)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| unique_violation(e, "Batch code already exists"))?;

        if let Some(student_ids) = dto.student_ids {
            sqlx::query("DELETE FROM batch_students WHERE batch_id = $1")
                .bind(id)
                .execute(db)
                .await
                .map_err(AppError::database)?;
            Self::set_students(db, id, &student_ids).await?;
        }

        Self::get_batch(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_batch(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Batch not found")));
        }

        Ok(())
    }

    /// Expands the batch's references. Dangling course/faculty ids resolve to
    /// `None`; roster entries whose student was deleted are dropped.
    async fn expand(db: &PgPool, batch: Batch) -> Result<BatchView, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, course_code, course_name, description, duration, fees, \
             created_at, updated_at FROM courses WHERE id = $1",
        )
        .bind(batch.course_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let faculty = sqlx::query_as::<_, Faculty>(
            "SELECT id, faculty_code, first_name, last_name, email, phone, \
             created_at, updated_at FROM faculties WHERE id = $1",
        )
        .bind(batch.faculty_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let students = sqlx::query_as::<_, Student>(
            "SELECT s.id, s.student_code, s.first_name, s.last_name, s.email, s.phone, \
             s.enrollment_date, s.created_at, s.updated_at \
             FROM students s \
             JOIN batch_students bs ON bs.student_id = s.id \
             WHERE bs.batch_id = $1 \
             ORDER BY s.last_name, s.first_name",
        )
        .bind(batch.id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(BatchView {
            batch,
            course,
            faculty,
            students,
        })
    }

    async fn set_students(db: &PgPool, batch_id: Uuid, student_ids: &[Uuid]) -> Result<(), AppError> {
        for student_id in student_ids {
            sqlx::query(
                "INSERT INTO batch_students (batch_id, student_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(batch_id)
            .bind(student_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;
        }

        Ok(())
    }
}
