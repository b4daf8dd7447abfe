//! Catalog search, release workflow and pipeline runs through the public API.

use std::sync::Arc;
use std::time::Duration;

use edu_content::{
    ContentFilter, ContentGenerator, ContentRegistry, Difficulty, Selection, StageStatus,
    VersionHistory, VersionStatus,
};
use edu_core::RecordingNotifier;

fn filter_from_cli(query: &str, category: &str, difficulty: &str) -> ContentFilter {
    ContentFilter {
        query: query.to_string(),
        category: category.parse().unwrap(),
        difficulty: difficulty.parse().unwrap(),
    }
}

#[test]
fn test_query_ai_matches_whole_catalog() {
    let registry = ContentRegistry::sample();
    let found = registry.search(&filter_from_cli("AI", "all", "all"));
    assert_eq!(found.len(), 5);
}

#[test]
fn test_unmatched_query_is_empty() {
    let registry = ContentRegistry::sample();
    assert!(registry
        .search(&filter_from_cli("zzz-no-match", "all", "all"))
        .is_empty());
}

#[test]
fn test_archived_items_are_still_searchable() {
    let registry = ContentRegistry::sample();
    let found = registry.search(&filter_from_cli("", "AI Creative", "advanced"));
    assert_eq!(found.len(), 1);
    assert!(found[0].is_archived());
}

#[test]
fn test_cli_style_selection() {
    let filter = filter_from_cli("", "all", "Intermediate");
    assert_eq!(filter.category, Selection::All);
    assert_eq!(filter.difficulty, Selection::Only(Difficulty::Intermediate));

    let registry = ContentRegistry::sample();
    let ids: Vec<u32> = registry.search(&filter).iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_release_walkthrough() {
    let mut history = VersionHistory::sample();

    // review -> approved -> deployed
    assert_eq!(history.promote("v2.2.0").unwrap(), VersionStatus::Approved);
    assert_eq!(history.promote("v2.2.0").unwrap(), VersionStatus::Deployed);
    assert_eq!(
        history.get("v2.3.1").unwrap().status,
        VersionStatus::Archived
    );

    history.rollback("v2.3.1").unwrap();
    assert_eq!(history.deployed().unwrap().version, "v2.3.1");
    assert_eq!(
        history.get("v2.2.0").unwrap().status,
        VersionStatus::Archived
    );
}

#[test]
fn test_invalid_transition_message() {
    let mut history = VersionHistory::sample();
    let err = history.rollback("v2.3.0").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot roll back version v2.3.0 while it is approved"
    );
}

#[tokio::test(start_paused = true)]
async fn test_generator_runs_to_completion() {
    let notifier = RecordingNotifier::new();
    let mut generator = ContentGenerator::default()
        .with_delay(Duration::from_millis(100))
        .with_notifier(Arc::new(notifier.clone()));

    let mut completed = Vec::new();
    while let Some(stage) = generator.run().await {
        completed.push(stage.id);
    }

    assert_eq!(completed, vec!["slides", "templates", "tools"]);
    assert!(generator.pipeline().is_complete());
    assert!(generator
        .pipeline()
        .stages()
        .iter()
        .all(|s| s.status == StageStatus::Completed));

    // three completed runs plus the final no-op run, each with start + finish
    assert_eq!(notifier.count(), 8);
    assert_eq!(
        notifier.last().unwrap().message,
        "Nothing left to generate"
    );
}
