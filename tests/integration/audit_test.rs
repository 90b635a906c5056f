//! Settings-gated audit logging behavior.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use examify_audit::ActivityLogger;
use examify_core::config::audit::AuditConfig;
use examify_entity::activity::{ActivityAction, NewActivityRecord};

use crate::helpers::{FailingReadStore, collection_len, put_doc, test_app};

fn record() -> NewActivityRecord {
    NewActivityRecord {
        actor_id: "u1".to_string(),
        actor_name: "Alex".to_string(),
        action: ActivityAction::Create,
        entity_type: "exam".to_string(),
        entity_id: "e1".to_string(),
    }
}

#[tokio::test]
async fn logs_exactly_one_record_when_settings_absent() {
    let app = test_app().await;
    app.ctx.audit.log_activity(record()).await;

    assert_eq!(collection_len(&app.store, "activity_logs").await, 1);
    let records = app.ctx.audit.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    // Server-assigned timestamp must be present and parseable.
    assert!(records[0].timestamp <= Utc::now() + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn logs_when_flag_is_explicitly_true() {
    let app = test_app().await;
    put_doc(&app.store, "settings/app", json!({"enable_audit_logs": true})).await;
    app.ctx.audit.log_activity(record()).await;
    assert_eq!(collection_len(&app.store, "activity_logs").await, 1);
}

#[tokio::test]
async fn skips_when_flag_is_false() {
    let app = test_app().await;
    put_doc(&app.store, "settings/app", json!({"enable_audit_logs": false})).await;
    app.ctx.audit.log_activity(record()).await;
    assert_eq!(collection_len(&app.store, "activity_logs").await, 0);
}

#[tokio::test]
async fn settings_read_failure_fails_open() {
    let store = Arc::new(FailingReadStore::new("settings/app"));
    let logger = ActivityLogger::from_config(store.clone(), &AuditConfig::default()).unwrap();

    logger.log_activity(record()).await;

    // The write is still attempted despite the failed settings read.
    assert_eq!(collection_len(store.inner(), "activity_logs").await, 1);
}

#[tokio::test]
async fn records_carry_monotonic_server_timestamps() {
    let app = test_app().await;
    for i in 0..5 {
        app.ctx
            .audit
            .log_activity(NewActivityRecord {
                entity_id: format!("e{i}"),
                ..record()
            })
            .await;
    }

    let records = app.ctx.audit.recent(10).await.unwrap();
    assert_eq!(records.len(), 5);
    let stamps: Vec<DateTime<Utc>> = records.iter().map(|r| r.timestamp).collect();
    // Newest first, strictly ordered.
    for pair in stamps.windows(2) {
        assert!(pair[0] > pair[1]);
    }
}
