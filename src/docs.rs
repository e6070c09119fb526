use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MessageResponse};
use crate::modules::batches::model::{Batch, BatchView, CreateBatchDto, UpdateBatchDto};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::dashboard::model::{DashboardResponse, DashboardStats};
use crate::modules::faculties::model::{CreateFacultyDto, Faculty, FacultyView, UpdateFacultyDto};
use crate::modules::permissions::model::{CreatePermissionDto, Permission, UpdatePermissionDto};
use crate::modules::roles::model::{CreateRoleDto, Role, RoleWithPermissions, UpdateRoleDto};
use crate::modules::students::model::{CreateStudentDto, Student, StudentView, UpdateStudentDto};
use crate::modules::users::model::{CreateUserDto, RoleSummary, UpdateUserDto, UserView};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::dashboard::controller::dashboard,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_user_roles,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::get_role,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::update_role,
        crate::modules::roles::controller::delete_role,
        crate::modules::permissions::controller::get_permissions,
        crate::modules::permissions::controller::get_permission,
        crate::modules::permissions::controller::create_permission,
        crate::modules::permissions::controller::update_permission,
        crate::modules::permissions::controller::delete_permission,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::faculties::controller::get_faculties,
        crate::modules::faculties::controller::get_faculty,
        crate::modules::faculties::controller::create_faculty,
        crate::modules::faculties::controller::update_faculty,
        crate::modules::faculties::controller::delete_faculty,
        crate::modules::batches::controller::get_batches,
        crate::modules::batches::controller::get_batch,
        crate::modules::batches::controller::create_batch,
        crate::modules::batches::controller::update_batch,
        crate::modules::batches::controller::delete_batch,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            LoginRequest,
            LoginResponse,
            DashboardResponse,
            DashboardStats,
            UserView,
            RoleSummary,
            CreateUserDto,
            UpdateUserDto,
            Role,
            RoleWithPermissions,
            CreateRoleDto,
            UpdateRoleDto,
            Permission,
            CreatePermissionDto,
            UpdatePermissionDto,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Student,
            StudentView,
            CreateStudentDto,
            UpdateStudentDto,
            Faculty,
            FacultyView,
            CreateFacultyDto,
            UpdateFacultyDto,
            Batch,
            BatchView,
            CreateBatchDto,
            UpdateBatchDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Dashboard", description = "Aggregate overview"),
        (name = "Users", description = "Application user management"),
        (name = "Roles", description = "Role management"),
        (name = "Permissions", description = "Permission catalog"),
        (name = "Courses", description = "Course management"),
        (name = "Students", description = "Student management"),
        (name = "Faculties", description = "Faculty management"),
        (name = "Batches", description = "Batch management"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
