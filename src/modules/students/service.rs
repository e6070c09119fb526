use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::{AppError, unique_violation};

use super::model::{CreateStudentDto, Student, StudentView, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "id, student_code, first_name, last_name, email, phone, \
     enrollment_date, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<StudentView>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students ORDER BY last_name, first_name",
            STUDENT_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let mut views = Vec::with_capacity(students.len());
        for student in students {
            let enrolled_courses = Self::get_enrolled_courses(db, student.id).await?;
            views.push(StudentView {
                student,
                enrolled_courses,
            });
        }

        Ok(views)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<StudentView, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE id = $1",
            STUDENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        let enrolled_courses = Self::get_enrolled_courses(db, student.id).await?;

        Ok(StudentView {
            student,
            enrolled_courses,
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<StudentView, AppError> {
        let id = if let Some(enrollment_date) = dto.enrollment_date {
            sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO students (student_code, first_name, last_name, email, phone, enrollment_date) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
            )
            .bind(&dto.student_code)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(dto.email.to_lowercase())
            .bind(&dto.phone)
            .bind(enrollment_date)
            .fetch_one(db)
            .await
        } else {
            sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO students (student_code, first_name, last_name, email, phone) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .bind(&dto.student_code)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(dto.email.to_lowercase())
            .bind(&dto.phone)
            .fetch_one(db)
            .await
        }
        .map_err(|e| unique_violation(e, "Student code or email already exists"))?;

        Self::set_enrolled_courses(db, id, &dto.enrolled_courses).await?;

        Self::get_student(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<StudentView, AppError> {
        let existing = Self::get_student(db, id).await?;

        let student_code = dto.student_code.unwrap_or(existing.student.student_code);
        let first_name = dto.first_name.unwrap_or(existing.student.first_name);
        let last_name = dto.last_name.unwrap_or(existing.student.last_name);
        let email = dto
            .email
            .map(|e| e.to_lowercase())
            .unwrap_or(existing.student.email);
        let phone = dto.phone.unwrap_or(existing.student.phone);
        let enrollment_date = dto.enrollment_date.unwrap_or(existing.student.enrollment_date);

        sqlx::query(
            "UPDATE students SET student_code = $1, first_name = $2, last_name = $3, \
             email = $4, phone = $5, enrollment_date = $6, updated_at = NOW() WHERE id = $7",
        )
        .bind(&student_code)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&phone)
        .bind(enrollment_date)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| unique_violation(e, "Student code or email already exists"))?;

        if let Some(enrolled_courses) = dto.enrolled_courses {
            sqlx::query("DELETE FROM student_courses WHERE student_id = $1")
                .bind(id)
                .execute(db)
                .await
                .map_err(AppError::database)?;
            Self::set_enrolled_courses(db, id, &enrolled_courses).await?;
        }

        Self::get_student(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }

    async fn get_enrolled_courses(db: &PgPool, student_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let course_ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT course_id FROM student_courses WHERE student_id = $1 ORDER BY course_id",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(course_ids)
    }

    async fn set_enrolled_courses(
        db: &PgPool,
        student_id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<(), AppError> {
        for course_id in course_ids {
            sqlx::query(
                "INSERT INTO student_courses (student_id, course_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(student_id)
            .bind(course_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;
        }

        Ok(())
    }
}
