//! AI question generation service.

use std::sync::Arc;

use tracing::{info, warn};

use examify_audit::ActivityLogger;
use examify_core::config::ai::AiConfig;
use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::generator::{GenerateQuestionsRequest, QuestionGenerator};
use examify_entity::activity::ActivityAction;
use examify_entity::exam::Question;

use crate::context::RequestContext;

/// Wraps the AI collaborator behind a configuration gate.
///
/// Missing credentials are detected when the service is constructed and
/// logged; the error surfaces only when generation is invoked.
#[derive(Debug, Clone)]
pub struct QuestionService {
    generator: Option<Arc<dyn QuestionGenerator>>,
    audit: ActivityLogger,
    max_questions: u32,
}

impl QuestionService {
    /// Creates a new question service.
    pub fn new(
        generator: Option<Arc<dyn QuestionGenerator>>,
        audit: ActivityLogger,
        config: &AiConfig,
    ) -> Self {
        if generator.is_none() {
            warn!("AI credentials not configured; question generation is disabled");
        }
        Self {
            generator,
            audit,
            max_questions: config.max_questions,
        }
    }

    /// Generate questions for an exam topic.
    ///
    /// Rejects malformed requests before any remote call; fails with a
    /// `Configuration` error when the collaborator is unavailable.
    pub async fn generate(
        &self,
        ctx: &RequestContext,
        request: GenerateQuestionsRequest,
    ) -> AppResult<Vec<Question>> {
        request.validate(self.max_questions)?;

        let generator = self.generator.as_ref().ok_or_else(|| {
            AppError::configuration("AI question generation is not configured")
        })?;

        let generated = generator.generate(&request).await?;
        info!(
            topic = request.topic,
            count = generated.len(),
            "Generated questions"
        );

        self.audit
            .log_activity(ctx.activity(
                ActivityAction::Generate,
                "question_set",
                &request.topic,
            ))
            .await;

        Ok(generated.into_iter().map(Question::from).collect())
    }
}
