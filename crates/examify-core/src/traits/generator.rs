//! Question generator trait — the AI collaborator contract.
//!
//! The generator accepts validated input and returns typed output or a
//! described error. Prompt construction and provider plumbing are outside
//! this layer.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Request for AI-assisted question generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuestionsRequest {
    /// Topic to generate questions about.
    pub topic: String,
    /// Difficulty label (e.g., `"easy"`, `"medium"`, `"hard"`).
    pub difficulty: String,
    /// Number of questions requested.
    pub count: u32,
}

impl GenerateQuestionsRequest {
    /// Reject malformed requests before any remote call is attempted.
    pub fn validate(&self, max_count: u32) -> AppResult<()> {
        if self.topic.trim().is_empty() {
            return Err(AppError::validation("Topic cannot be empty"));
        }
        if self.count == 0 || self.count > max_count {
            return Err(AppError::validation(format!(
                "Question count must be between 1 and {max_count}"
            )));
        }
        Ok(())
    }
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    /// Question prompt text.
    pub prompt: String,
    /// Answer options.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub answer_index: usize,
}

/// Trait for AI question-generation backends.
#[async_trait]
pub trait QuestionGenerator: Send + Sync + fmt::Debug + 'static {
    /// Generate questions for a validated request.
    async fn generate(
        &self,
        request: &GenerateQuestionsRequest,
    ) -> AppResult<Vec<GeneratedQuestion>>;
}
