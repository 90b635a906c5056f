//! Exam service — CRUD over exams with audit and cache invalidation.

use serde_json::Value;
use tracing::info;

use examify_audit::ActivityLogger;
use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::types::document::{Document, server_timestamp};
use examify_core::types::path::CollectionPath;
use examify_entity::activity::ActivityAction;
use examify_entity::exam::{CreateExam, Exam, Question, UpdateExam};
use examify_query::{MutationOp, MutationRequest, QueryClient, QueryDescriptor, keys};

use crate::context::RequestContext;

/// Handles exam reads and mutations.
#[derive(Debug, Clone)]
pub struct ExamService {
    query: QueryClient,
    audit: ActivityLogger,
    exams: CollectionPath,
}

impl ExamService {
    /// Creates a new exam service.
    pub fn new(query: QueryClient, audit: ActivityLogger, exams: CollectionPath) -> Self {
        Self {
            query,
            audit,
            exams,
        }
    }

    /// Reads an exam by ID. A missing exam is `None`, not an error.
    pub async fn get_exam(&self, exam_id: &str) -> AppResult<Option<Exam>> {
        let descriptor =
            QueryDescriptor::document(keys::exam(exam_id), self.exams.doc(exam_id)?);
        let state = self.query.fetch_document::<Exam>(&descriptor).await;
        if let Some(error) = state.error {
            return Err(error);
        }
        Ok(state.data)
    }

    /// Reads the full exam listing.
    pub async fn list_exams(&self) -> AppResult<Vec<Exam>> {
        let descriptor = QueryDescriptor::collection(keys::exam_list(), self.exams.clone());
        let state = self.query.fetch_collection::<Exam>(&descriptor).await;
        if let Some(error) = state.error {
            return Err(error);
        }
        Ok(state.data.unwrap_or_default())
    }

    /// Creates an exam owned by the calling actor.
    pub async fn create_exam(&self, ctx: &RequestContext, create: CreateExam) -> AppResult<Exam> {
        create.check()?;

        let mut doc = Document::new();
        doc.insert("title".to_string(), Value::String(create.title.clone()));
        if let Some(description) = &create.description {
            doc.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        doc.insert(
            "duration_minutes".to_string(),
            Value::from(create.duration_minutes),
        );
        doc.insert("published".to_string(), Value::Bool(false));
        doc.insert("owner_id".to_string(), Value::String(ctx.actor_id.clone()));
        doc.insert(
            "questions".to_string(),
            serde_json::to_value(&create.questions)?,
        );
        doc.insert("created_at".to_string(), server_timestamp());
        doc.insert("updated_at".to_string(), server_timestamp());

        let outcome = self
            .query
            .mutate(MutationRequest {
                collection: self.exams.clone(),
                op: MutationOp::Create(doc),
                invalidate: vec![keys::exam_list()],
            })
            .await?;

        let exam = Self::decode_exam(outcome.document)?;
        info!(exam_id = exam.id, title = exam.title, "Created exam");
        self.audit
            .log_activity(ctx.activity(ActivityAction::Create, "exam", &exam.id))
            .await;
        Ok(exam)
    }

    /// Updates exam fields.
    pub async fn update_exam(
        &self,
        ctx: &RequestContext,
        exam_id: &str,
        update: UpdateExam,
    ) -> AppResult<Exam> {
        update.check()?;

        let mut fields = Document::new();
        if let Some(title) = &update.title {
            fields.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(description) = &update.description {
            fields.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        if let Some(duration_minutes) = update.duration_minutes {
            fields.insert(
                "duration_minutes".to_string(),
                Value::from(duration_minutes),
            );
        }
        if let Some(published) = update.published {
            fields.insert("published".to_string(), Value::Bool(published));
        }
        if let Some(questions) = &update.questions {
            fields.insert("questions".to_string(), serde_json::to_value(questions)?);
        }
        fields.insert("updated_at".to_string(), server_timestamp());

        let outcome = self
            .query
            .mutate(MutationRequest {
                collection: self.exams.clone(),
                op: MutationOp::Update {
                    id: exam_id.to_string(),
                    fields,
                },
                invalidate: vec![keys::exam(exam_id), keys::exam_list()],
            })
            .await?;

        self.audit
            .log_activity(ctx.activity(ActivityAction::Update, "exam", exam_id))
            .await;
        Self::decode_exam(outcome.document)
    }

    /// Appends questions to an exam, preserving existing ones.
    pub async fn append_questions(
        &self,
        ctx: &RequestContext,
        exam_id: &str,
        questions: Vec<Question>,
    ) -> AppResult<Exam> {
        if questions.is_empty() {
            return Err(AppError::validation("No questions to append"));
        }
        let exam = self
            .get_exam(exam_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Exam {exam_id} not found")))?;

        let mut combined = exam.questions;
        combined.extend(questions);
        self.update_exam(
            ctx,
            exam_id,
            UpdateExam {
                questions: Some(combined),
                ..UpdateExam::default()
            },
        )
        .await
    }

    /// Deletes an exam.
    pub async fn delete_exam(&self, ctx: &RequestContext, exam_id: &str) -> AppResult<()> {
        self.query
            .mutate(MutationRequest {
                collection: self.exams.clone(),
                op: MutationOp::Delete {
                    id: exam_id.to_string(),
                },
                invalidate: vec![keys::exam(exam_id), keys::exam_list()],
            })
            .await?;

        self.audit
            .log_activity(ctx.activity(ActivityAction::Delete, "exam", exam_id))
            .await;
        Ok(())
    }

    fn decode_exam(doc: Option<Document>) -> AppResult<Exam> {
        let doc = doc.ok_or_else(|| AppError::internal("Exam write returned no document"))?;
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}
