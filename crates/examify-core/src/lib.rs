//! # examify-core
//!
//! Core crate for the Examify data layer. Contains collaborator traits,
//! configuration schemas, path and cache-key types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Examify crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
