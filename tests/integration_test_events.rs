mod common;

use common::{new_event, TestApp};
use event_listing::domain::services::event_service::{
    create_event, delete_event, find_event_by_slug, list_events, save_event, similar_events,
};
use event_listing::error::AppError;
use std::time::Duration;

#[tokio::test]
async fn test_create_event_normalizes_fields() {
    let app = TestApp::new();

    let mut input = new_event("  Hello, World! 2025  ", &["rust"]);
    input.date = "2025-12-01T10:00:00Z".to_string();
    input.time = "9:05".to_string();
    input.venue = "  Main Hall ".to_string();

    let event = create_event(app.events(), input).await.unwrap();

    assert!(event.id.is_some());
    assert_eq!(event.title, "Hello, World! 2025");
    assert_eq!(event.slug, "hello-world-2025");
    assert_eq!(event.date, "2025-12-01");
    assert_eq!(event.time, "09:05");
    assert_eq!(event.venue, "Main Hall");
    assert_eq!(event.created_at, event.updated_at);

    let stored = find_event_by_slug(app.events(), "hello-world-2025").await.unwrap();
    assert_eq!(stored, event);
}

#[tokio::test]
async fn test_create_event_rejects_bad_time() {
    let app = TestApp::new();

    let mut input = new_event("Time Format", &["rust"]);
    input.time = "9:5".to_string();
    match create_event(app.events(), input).await {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid time format"),
        other => panic!("Expected format error, got {:?}", other),
    }

    let mut input = new_event("Time Range", &["rust"]);
    input.time = "24:00".to_string();
    match create_event(app.events(), input).await {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid time value"),
        other => panic!("Expected range error, got {:?}", other),
    }

    assert!(list_events(app.events()).await.unwrap().is_empty(), "Rejected events must not be persisted");
}

#[tokio::test]
async fn test_create_event_rejects_bad_date_and_empty_lists() {
    let app = TestApp::new();

    let mut input = new_event("Bad Date", &["rust"]);
    input.date = "someday".to_string();
    match create_event(app.events(), input).await {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid date format"),
        other => panic!("Expected date error, got {:?}", other),
    }

    let input = new_event("No Tags", &[]);
    assert!(matches!(create_event(app.events(), input).await, Err(AppError::Validation(_))));

    let mut input = new_event("No Agenda", &["rust"]);
    input.agenda.clear();
    assert!(matches!(create_event(app.events(), input).await, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_slug_collision_is_constraint_violation() {
    let app = TestApp::new();

    create_event(app.events(), new_event("Rust Meetup", &["rust"])).await.unwrap();
    let result = create_event(app.events(), new_event("rust   meetup!", &["rust"])).await;

    assert!(
        matches!(result, Err(AppError::ConstraintViolation(_))),
        "Duplicate slug must surface as a constraint violation, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_save_event_regenerates_slug_only_on_title_change() {
    let app = TestApp::new();

    let created = create_event(app.events(), new_event("Original Title", &["rust"])).await.unwrap();

    let mut edited = created.clone();
    edited.venue = "Annex".to_string();
    let saved = save_event(app.events(), edited).await.unwrap();
    assert_eq!(saved.slug, "original-title");
    assert_eq!(saved.venue, "Annex");
    assert_eq!(saved.created_at, created.created_at);
    assert!(saved.updated_at >= created.updated_at);

    let mut renamed = saved.clone();
    renamed.title = "Brand New Title".to_string();
    renamed.time = "7:45".to_string();
    let saved = save_event(app.events(), renamed).await.unwrap();
    assert_eq!(saved.slug, "brand-new-title");
    assert_eq!(saved.time, "07:45");

    assert!(matches!(
        find_event_by_slug(app.events(), "original-title").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_save_event_requires_existing_record() {
    let app = TestApp::new();

    let created = create_event(app.events(), new_event("Short Lived", &["rust"])).await.unwrap();
    let id = created.id.unwrap().to_hex();
    delete_event(app.events(), &id).await.unwrap();

    assert!(matches!(save_event(app.events(), created).await, Err(AppError::NotFound(_))));
    assert!(matches!(delete_event(app.events(), &id).await, Err(AppError::NotFound(_))));
    assert!(matches!(delete_event(app.events(), "not-an-id").await, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_list_events_newest_first() {
    let app = TestApp::new();

    for title in ["First", "Second", "Third"] {
        create_event(app.events(), new_event(title, &["rust"])).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let slugs: Vec<String> = list_events(app.events()).await.unwrap().into_iter().map(|e| e.slug).collect();
    assert_eq!(slugs, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_similar_events_share_tags_and_exclude_self() {
    let app = TestApp::new();

    create_event(app.events(), new_event("RustConf", &["rust", "systems"])).await.unwrap();
    create_event(app.events(), new_event("Systems Summit", &["systems"])).await.unwrap();
    create_event(app.events(), new_event("React Day", &["javascript"])).await.unwrap();

    let similar = similar_events(app.events(), "rustconf").await.unwrap();
    let slugs: Vec<&str> = similar.iter().map(|e| e.slug.as_str()).collect();

    assert_eq!(slugs, vec!["systems-summit"]);

    assert!(matches!(similar_events(app.events(), "missing").await, Err(AppError::NotFound(_))));
}
