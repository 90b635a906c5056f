//! # examify-entity
//!
//! Serde entity models for the Examify data layer: activity records,
//! application settings, user profiles, and exams.

pub mod activity;
pub mod exam;
pub mod profile;
pub mod settings;
