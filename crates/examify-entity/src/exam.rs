//! Exam and question entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::generator::GeneratedQuestion;

/// A single multiple-choice question inside an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question prompt text.
    pub prompt: String,
    /// Answer options.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub answer_index: usize,
    /// Points awarded for a correct answer.
    pub points: u32,
}

impl From<GeneratedQuestion> for Question {
    fn from(generated: GeneratedQuestion) -> Self {
        Self {
            prompt: generated.prompt,
            options: generated.options,
            answer_index: generated.answer_index,
            points: 1,
        }
    }
}

/// An exam document as stored in the exams collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// Store-assigned exam identifier.
    pub id: String,
    /// Exam title.
    pub title: String,
    /// Longer description shown before starting.
    #[serde(default)]
    pub description: Option<String>,
    /// Time limit in minutes.
    pub duration_minutes: u32,
    /// Whether the exam is visible to test takers.
    #[serde(default)]
    pub published: bool,
    /// The user who owns the exam.
    pub owner_id: String,
    /// Questions in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// When the exam was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the exam was last written.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data for creating a new exam.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExam {
    /// Exam title.
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Time limit in minutes.
    #[validate(range(min = 1, max = 600, message = "duration must be 1-600 minutes"))]
    pub duration_minutes: u32,
    /// Initial questions.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Fields for updating an existing exam.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateExam {
    /// New title (optional).
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    /// New description (optional).
    pub description: Option<String>,
    /// New time limit (optional).
    #[validate(range(min = 1, max = 600, message = "duration must be 1-600 minutes"))]
    pub duration_minutes: Option<u32>,
    /// New published flag (optional).
    pub published: Option<bool>,
    /// Replacement question list (optional).
    pub questions: Option<Vec<Question>>,
}

impl CreateExam {
    /// Validate field constraints, mapping failures into the unified error.
    pub fn check(&self) -> AppResult<()> {
        Validate::validate(self).map_err(|e| AppError::validation(format!("Invalid exam: {e}")))
    }
}

impl UpdateExam {
    /// Validate field constraints, mapping failures into the unified error.
    pub fn check(&self) -> AppResult<()> {
        Validate::validate(self)
            .map_err(|e| AppError::validation(format!("Invalid exam update: {e}")))
    }
}
