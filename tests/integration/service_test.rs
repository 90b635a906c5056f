//! End-to-end service flows over the wired context.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;

use examify::{AppConfig, AppContext, ErrorKind};
use examify_core::traits::generator::GenerateQuestionsRequest;
use examify_core::traits::{AuthProvider, ObjectStore};
use examify_entity::activity::ActivityAction;
use examify_entity::exam::CreateExam;
use examify_entity::profile::UpdateProfile;
use examify_service::RequestContext;

use crate::helpers::{ScriptedGenerator, put_doc, sign_in, test_app, wait_until};

#[tokio::test]
async fn profile_update_mirrors_into_auth_and_audits() {
    let app = test_app().await;
    let user = sign_in(&app).await;
    let ctx = RequestContext::for_user(&user);

    app.ctx.profiles.ensure_profile(&user).await.unwrap();
    let updated = app
        .ctx
        .profiles
        .update_profile(
            &ctx,
            &user.uid,
            UpdateProfile {
                display_name: Some("Alexis".to_string()),
                ..UpdateProfile::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("Alexis"));
    assert!(updated.updated_at.is_some());

    // Mirrored into the identity provider.
    let current = app.auth.current_user().await.unwrap();
    assert_eq!(current.display_name.as_deref(), Some("Alexis"));

    // Audited.
    let entries = app
        .ctx
        .audit
        .entries_for_entity("profile", &user.uid)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, ActivityAction::Update);
    assert_eq!(entries[0].actor_name, "Alex");
}

#[tokio::test]
async fn exam_crud_flow_keeps_reads_fresh() {
    let app = test_app().await;
    let user = sign_in(&app).await;
    let ctx = RequestContext::for_user(&user);

    let exam = app
        .ctx
        .exams
        .create_exam(
            &ctx,
            CreateExam {
                title: "Rust basics".to_string(),
                description: Some("Ownership and borrowing".to_string()),
                duration_minutes: 30,
                questions: Vec::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(exam.owner_id, user.uid);
    assert!(!exam.published);
    assert!(exam.created_at.is_some());

    // Listing is cached, then invalidated by the update below.
    let listed = app.ctx.exams.list_exams().await.unwrap();
    assert_eq!(listed.len(), 1);

    let updated = app
        .ctx
        .exams
        .update_exam(
            &ctx,
            &exam.id,
            examify_entity::exam::UpdateExam {
                published: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.published);

    let fetched = app.ctx.exams.get_exam(&exam.id).await.unwrap().unwrap();
    assert!(fetched.published);

    app.ctx.exams.delete_exam(&ctx, &exam.id).await.unwrap();
    assert!(app.ctx.exams.get_exam(&exam.id).await.unwrap().is_none());
    assert_eq!(app.ctx.exams.list_exams().await.unwrap().len(), 0);

    // One record per mutation.
    let entries = app
        .ctx
        .audit
        .entries_for_entity("exam", &exam.id)
        .await
        .unwrap();
    let actions: Vec<ActivityAction> = entries.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            ActivityAction::Delete,
            ActivityAction::Update,
            ActivityAction::Create
        ]
    );
}

#[tokio::test]
async fn avatar_flow_replaces_previous_object() {
    let app = test_app().await;
    let user = sign_in(&app).await;
    let ctx = RequestContext::for_user(&user);
    app.ctx.profiles.ensure_profile(&user).await.unwrap();

    let first = app
        .ctx
        .avatars
        .set_avatar(&ctx, "one.png", Bytes::from_static(&[0u8; 8]))
        .await
        .unwrap();
    assert_eq!(first, "memory://avatars/u1/one.png");
    let profile = app.ctx.profiles.get_profile(&user.uid).await.unwrap().unwrap();
    assert_eq!(profile.photo_url.as_deref(), Some(first.as_str()));

    let second = app
        .ctx
        .avatars
        .set_avatar(&ctx, "two.png", Bytes::from_static(&[1u8; 8]))
        .await
        .unwrap();
    assert_ne!(first, second);

    // The replaced object is cleaned up best-effort.
    assert!(!app.objects.exists("avatars/u1/one.png").await.unwrap());
    assert!(app.objects.exists("avatars/u1/two.png").await.unwrap());

    let current = app.auth.current_user().await.unwrap();
    assert_eq!(current.photo_url.as_deref(), Some(second.as_str()));
}

#[tokio::test]
async fn question_generation_requires_credentials() {
    let app = test_app().await;
    let user = sign_in(&app).await;
    let ctx = RequestContext::for_user(&user);

    let error = app
        .ctx
        .questions
        .generate(
            &ctx,
            GenerateQuestionsRequest {
                topic: "Rust".to_string(),
                difficulty: "easy".to_string(),
                count: 3,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn question_generation_flows_into_exams() {
    let mut config = AppConfig::default();
    config.ai.api_key = Some("test-key".to_string());
    let ctx_app = AppContext::builder(config)
        .with_generator(Arc::new(ScriptedGenerator))
        .build()
        .await
        .unwrap();

    let actor = RequestContext::new("u1", "Alex");
    let questions = ctx_app
        .questions
        .generate(
            &actor,
            GenerateQuestionsRequest {
                topic: "Rust".to_string(),
                difficulty: "medium".to_string(),
                count: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(questions.len(), 2);

    let exam = ctx_app
        .exams
        .create_exam(
            &actor,
            CreateExam {
                title: "Generated".to_string(),
                description: None,
                duration_minutes: 15,
                questions: Vec::new(),
            },
        )
        .await
        .unwrap();
    let extended = ctx_app
        .exams
        .append_questions(&actor, &exam.id, questions)
        .await
        .unwrap();
    assert_eq!(extended.questions.len(), 2);
}

#[tokio::test]
async fn invalid_generation_requests_fail_before_any_call() {
    let mut config = AppConfig::default();
    config.ai.api_key = Some("test-key".to_string());
    let ctx_app = AppContext::builder(config)
        .with_generator(Arc::new(ScriptedGenerator))
        .build()
        .await
        .unwrap();

    let actor = RequestContext::new("u1", "Alex");
    let error = ctx_app
        .questions
        .generate(
            &actor,
            GenerateQuestionsRequest {
                topic: "  ".to_string(),
                difficulty: "easy".to_string(),
                count: 3,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn settings_watch_observes_administration_changes() {
    let app = test_app().await;

    let settings = app.ctx.settings.get().await.unwrap();
    assert!(settings.enable_audit_logs);

    let mut watch = app.ctx.settings.watch().await.unwrap();
    wait_until(|| !watch.current().is_loading).await;

    // An external administration flow flips the flag.
    put_doc(&app.store, "settings/app", json!({"enable_audit_logs": false})).await;
    wait_until(|| {
        watch
            .current()
            .data
            .is_some_and(|s| !s.enable_audit_logs)
    })
    .await;
}
