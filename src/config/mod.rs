//! Configuration modules.
//!
//! Each submodule covers one aspect of configuration, loaded from environment
//! variables with fallback defaults where a default is safe to have.

pub mod cors;
pub mod database;
pub mod jwt;
