use chrono::{Duration, Utc};
use synapse_core::models::{
    ConsolidationHistoryRecord, FactStatus, FactType, HeaLevel, LongTermFact, OperationalEvent,
    PendingFact, ScoreBreakdown,
};
use synapse_core::traits::{IEventSink, IFactStorage};
use synapse_core::SynapseError;
use synapse_storage::StorageEngine;

#[test]
fn pending_round_trip_and_status_filter() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = PendingFact::new("Sarah likes coffee", "s1", "chat");
    let mut b = PendingFact::new("Sarah works at a cafe", "s1", "chat");
    b.status = FactStatus::PendingReview;
    engine.insert_pending(&a).unwrap();
    engine.insert_pending(&b).unwrap();

    assert_eq!(engine.get_pending(&a.id).unwrap().unwrap(), a);
    let candidates = engine
        .pending_with_status(&[FactStatus::Pending, FactStatus::Approved], 10)
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, a.id);
    assert_eq!(engine.pending_count().unwrap(), 2);
}

#[test]
fn update_pending_persists_score_and_key() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut fact = PendingFact::new("Sarah likes coffee", "s1", "chat");
    engine.insert_pending(&fact).unwrap();

    fact.confidence_score = Some(4.2);
    fact.hier_key = Some("user.preferences.sarah.likes.coffee".into());
    fact.status = FactStatus::Consolidated;
    engine.update_pending(&fact).unwrap();

    let stored = engine.get_pending(&fact.id).unwrap().unwrap();
    assert_eq!(stored.confidence_score, Some(4.2));
    assert_eq!(stored.status, FactStatus::Consolidated);
}

#[test]
fn update_missing_pending_is_not_found() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let fact = PendingFact::new("never inserted", "s1", "chat");
    let err = engine.update_pending(&fact).unwrap_err();
    assert!(matches!(err, SynapseError::PendingFactNotFound { .. }));
}

#[test]
fn batch_puts_unscored_facts_before_held_ones() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let base = Utc::now() - Duration::hours(1);

    let mut held_early = PendingFact::new("held early", "s1", "chat");
    held_early.created_at = base;
    held_early.updated_at = base + Duration::minutes(30);
    held_early.confidence_score = Some(2.5);
    let mut held_late = PendingFact::new("held late", "s1", "chat");
    held_late.created_at = base + Duration::minutes(1);
    held_late.updated_at = base + Duration::minutes(10);
    held_late.confidence_score = Some(2.5);
    let mut fresh = PendingFact::new("fresh", "s1", "chat");
    fresh.created_at = base + Duration::minutes(50);
    fresh.updated_at = fresh.created_at;
    for f in [&held_early, &held_late, &fresh] {
        engine.insert_pending(f).unwrap();
    }

    let batch = engine.pending_with_status(&[FactStatus::Pending], 2).unwrap();
    let texts: Vec<&str> = batch.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(texts, vec!["fresh", "held late"]);
}

#[test]
fn settle_pending_writes_status_and_history_together() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut fact = PendingFact::new("Sarah likes coffee", "s1", "chat");
    engine.insert_pending(&fact).unwrap();
    fact.status = FactStatus::Consolidated;
    fact.confidence_score = Some(4.0);

    engine.settle_pending(&fact, &history_for(&fact.text)).unwrap();

    let stored = engine.get_pending(&fact.id).unwrap().unwrap();
    assert_eq!(stored.status, FactStatus::Consolidated);
    assert_eq!(engine.history(10).unwrap().len(), 1);
}

#[test]
fn settle_missing_pending_writes_no_history() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let fact = PendingFact::new("never inserted", "s1", "chat");
    let err = engine.settle_pending(&fact, &history_for(&fact.text)).unwrap_err();
    assert!(matches!(err, SynapseError::PendingFactNotFound { .. }));
    assert!(engine.history(10).unwrap().is_empty());
}

fn history_for(text: &str) -> ConsolidationHistoryRecord {
    ConsolidationHistoryRecord {
        fact_text: text.into(),
        from_level: 0,
        to_level: 3,
        score: ScoreBreakdown::from_dimensions(4.0, 4.0, 4.0),
        reason: "promoted".into(),
        session_id: "s1".into(),
        created_at: Utc::now(),
    }
}

#[test]
fn delete_settled_only_touches_session_settled_rows() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut done = PendingFact::new("done fact text", "s1", "chat");
    done.status = FactStatus::Consolidated;
    let open = PendingFact::new("open fact text", "s1", "chat");
    let mut other = PendingFact::new("other session", "s2", "chat");
    other.status = FactStatus::Rejected;
    for f in [&done, &open, &other] {
        engine.insert_pending(f).unwrap();
    }
    assert_eq!(engine.delete_settled_pending("s1").unwrap(), 1);
    assert!(engine.get_pending(&done.id).unwrap().is_none());
    assert!(engine.get_pending(&open.id).unwrap().is_some());
    assert!(engine.get_pending(&other.id).unwrap().is_some());
}

#[test]
fn modify_fact_creates_then_merges() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let key = "user.preferences.coffee";
    engine
        .modify_fact(key, &mut |existing| {
            assert!(existing.is_none());
            let mut fact = LongTermFact::new(key, FactType::Identity);
            fact.insert_at(HeaLevel::L3, "Sarah likes coffee");
            fact.weight = 0.6;
            Ok(fact)
        })
        .unwrap();
    let merged = engine
        .modify_fact(key, &mut |existing| {
            let mut fact = existing.expect("fact exists");
            fact.insert_at(HeaLevel::L2, "Sarah likes espresso");
            Ok(fact)
        })
        .unwrap();
    assert_eq!(merged.l3_value.len(), 2);
    assert_eq!(engine.get_fact(key).unwrap().unwrap(), merged);
    assert_eq!(engine.fact_count().unwrap(), 1);
}

#[test]
fn modify_fact_error_rolls_back() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let result = engine.modify_fact("user.x", &mut |_| {
        Err(SynapseError::InvalidInput("nope".into()))
    });
    assert!(result.is_err());
    assert!(engine.get_fact("user.x").unwrap().is_none());
}

#[test]
fn record_access_bumps_counts() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .modify_fact("user.a", &mut |_| Ok(LongTermFact::new("user.a", FactType::Identity)))
        .unwrap();
    engine.record_access(&["user.a".to_string()]).unwrap();
    engine.record_access(&["user.a".to_string(), "missing".to_string()]).unwrap();
    let fact = engine.get_fact("user.a").unwrap().unwrap();
    assert_eq!(fact.access_count, 2);
    assert!(fact.last_accessed.is_some());
}

#[test]
fn history_is_newest_first() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for (text, to_level) in [("first", 3u8), ("second", 0u8)] {
        engine
            .append_history(&ConsolidationHistoryRecord {
                fact_text: text.into(),
                from_level: 0,
                to_level,
                score: ScoreBreakdown::from_dimensions(3.0, 3.0, 3.0),
                reason: "test".into(),
                session_id: "s1".into(),
                created_at: Utc::now(),
            })
            .unwrap();
    }
    let history = engine.history(10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].fact_text, "second");
    assert_eq!(history[1].score.total, 3.0);
}

#[test]
fn events_are_stored_and_filtered() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .emit(&OperationalEvent::new("consolidation_run", serde_json::json!({"processed": 3})))
        .unwrap();
    engine
        .emit(&OperationalEvent::new("decay_run", serde_json::json!({"pruned": 1})))
        .unwrap();
    let all = engine.recent_events(None, 10).unwrap();
    assert_eq!(all.len(), 2);
    let runs = engine.recent_events(Some("consolidation_run"), 10).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].payload["processed"], 3);
}
