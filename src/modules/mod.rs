//! Feature modules.
//!
//! Each module follows the same structure:
//!
//! - `model.rs`: entities, DTOs and response projections
//! - `service.rs`: business logic against the database pool
//! - `controller.rs`: HTTP handlers
//! - `router.rs`: route wiring

pub mod auth;
pub mod batches;
pub mod courses;
pub mod dashboard;
pub mod faculties;
pub mod permissions;
pub mod roles;
pub mod students;
pub mod users;
