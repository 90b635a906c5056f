//! # examify-service
//!
//! Application services built on the data layer: profiles, exams,
//! settings, avatars, and AI question generation.

pub mod avatar;
pub mod context;
pub mod exam;
pub mod profile;
pub mod question;
pub mod settings;

pub use avatar::AvatarService;
pub use context::RequestContext;
pub use exam::ExamService;
pub use profile::ProfileService;
pub use question::QuestionService;
pub use settings::SettingsService;
