use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::{AppError, unique_violation};

use super::model::{CreateFacultyDto, Faculty, FacultyView, UpdateFacultyDto};

const FACULTY_COLUMNS: &str =
    "id, faculty_code, first_name, last_name, email, phone, created_at, updated_at";

pub struct FacultyService;

impl FacultyService {
    #[instrument(skip(db))]
    pub async fn get_faculties(db: &PgPool) -> Result<Vec<FacultyView>, AppError> {
        let faculties = sqlx::query_as::<_, Faculty>(&format!(
            "SELECT {} FROM faculties ORDER BY last_name, first_name",
            FACULTY_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let mut views = Vec::with_capacity(faculties.len());
        for faculty in faculties {
            let assigned_courses = Self::get_assigned_courses(db, faculty.id).await?;
            views.push(FacultyView {
                faculty,
                assigned_courses,
            });
        }

        Ok(views)
    }

    #[instrument(skip(db))]
    pub async fn get_faculty(db: &PgPool, id: Uuid) -> Result<FacultyView, AppError> {
        let faculty = sqlx::query_as::<_, Faculty>(&format!(
            "SELECT {} FROM faculties WHERE id = $1",
            FACULTY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Faculty not found")))?;

        let assigned_courses = Self::get_assigned_courses(db, faculty.id).await?;

        Ok(FacultyView {
            faculty,
            assigned_courses,
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_faculty(db: &PgPool, dto: CreateFacultyDto) -> Result<FacultyView, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO faculties (faculty_code, first_name, last_name, email, phone) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&dto.faculty_code)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.email.to_lowercase())
        .bind(&dto.phone)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation(e, "Faculty code or email already exists"))?;

        Self::set_assigned_courses(db, id, &dto.assigned_courses).await?;

        Self::get_faculty(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_faculty(
        db: &PgPool,
        id: Uuid,
        dto: UpdateFacultyDto,
    ) -> Result<FacultyView, AppError> {
        let existing = Self::get_faculty(db, id).await?;

        let faculty_code = dto.faculty_code.unwrap_or(existing.faculty.faculty_code);
        let first_name = dto.first_name.unwrap_or(existing.faculty.first_name);
        let last_name = dto.last_name.unwrap_or(existing.faculty.last_name);
        let email = dto
            .email
            .map(|e| e.to_lowercase())
            .unwrap_or(existing.faculty.email);
        let phone = dto.phone.unwrap_or(existing.faculty.phone);

        sqlx::query(
            "UPDATE faculties SET faculty_code = $1, first_name = $2, last_name = $3, \
             email = $4, phone = $5, updated_at = NOW() WHERE id = $6",
        )
        .bind(&faculty_code)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&phone)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| unique_violation(e, "Faculty code or email already exists"))?;

        if let Some(assigned_courses) = dto.assigned_courses {
            sqlx::query("DELETE FROM faculty_courses WHERE faculty_id = $1")
                .bind(id)
                .execute(db)
                .await
                .map_err(AppError::database)?;
            Self::set_assigned_courses(db, id, &assigned_courses).await?;
        }

        Self::get_faculty(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_faculty(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM faculties WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Faculty not found")));
        }

        Ok(())
    }

    async fn get_assigned_courses(db: &PgPool, faculty_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let course_ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT course_id FROM faculty_courses WHERE faculty_id = $1 ORDER BY course_id",
        )
        .bind(faculty_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(course_ids)
    }

    async fn set_assigned_courses(
        db: &PgPool,
        faculty_id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<(), AppError> {
        for course_id in course_ids {
            sqlx::query(
                "INSERT INTO faculty_courses (faculty_id, course_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(faculty_id)
            .bind(course_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;
        }

        Ok(())
    }
}
