//! # examify-audit
//!
//! The settings-gated activity logger. Appends immutable,
//! server-timestamped activity records, gated on a single global
//! configuration document.

pub mod logger;

pub use logger::ActivityLogger;
