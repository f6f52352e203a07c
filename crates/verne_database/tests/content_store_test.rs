//! Integration tests for the PostgreSQL content store.
//!
//! These tests require a running PostgreSQL database reachable via
//! `DATABASE_URL` with migrations applied, so they are ignored by default.
//! Run them with `cargo test -p verne_database -- --ignored`.

use verne_core::{
    ContentDraft, ContentKind, ContentMetadata, ContentPatch, FictionMetadata, ImageBlob,
    ImageMetadata,
};
use verne_database::{PgContentStore, build_pool, establish_connection, run_migrations};
use verne_interface::{ContentFilter, ContentStore, ImageLookup, PageRequest};

/// Create a test store, applying migrations first.
fn test_store() -> PgContentStore {
    let mut conn = establish_connection().expect("test database connection");
    run_migrations(&mut conn).expect("migrations should apply");
    PgContentStore::new(build_pool().expect("connection pool"))
}

fn fiction_draft(title: &str, year: Option<i32>) -> ContentDraft {
    let mut draft = ContentDraft::new(ContentKind::Fiction);
    draft.title = Some(title.to_string());
    draft.body = Some("The dome cracked at dawn and nobody noticed.".to_string());
    draft.setting_year = year;
    draft.metadata = ContentMetadata::Fiction(FictionMetadata {
        model: "test-model".to_string(),
        total_tokens: Some(42),
        word_count: 8,
    });
    draft
}

fn combined_draft(title: &str, year: Option<i32>) -> ContentDraft {
    let mut draft = ContentDraft::new(ContentKind::Combined);
    draft.title = Some(title.to_string());
    draft.body = Some("Captain Okafor watched the aurora.".to_string());
    draft.image = Some(ImageBlob::from_bytes(vec![0x89, 0x50, 0x4E, 0x47, 0x0D]));
    draft.setting_year = year;
    draft.metadata = ContentMetadata::Combined {
        fiction: FictionMetadata {
            model: "test-model".to_string(),
            total_tokens: None,
            word_count: 5,
        },
        image: ImageMetadata {
            model: "test-image-model".to_string(),
            prompt: "an aurora over a dome".to_string(),
        },
    };
    draft
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn save_then_get_round_trips() {
    let store = test_store();

    let saved = store.save(fiction_draft("Round Trip", Some(3101))).await.unwrap();
    assert!(!saved.id.is_empty());
    assert_eq!(saved.title, "Round Trip");
    assert!(saved.created_at <= saved.updated_at);

    let loaded = store.get(&saved.id).await.unwrap().unwrap();
    assert_eq!(loaded, saved);

    store.delete(&saved.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn saving_an_existing_id_overwrites_but_keeps_created_at() {
    let store = test_store();

    let first = store.save(fiction_draft("First Title", Some(3102))).await.unwrap();

    let mut second = fiction_draft("Second Title", Some(3102));
    second.id = Some(first.id.clone());
    let overwritten = store.save(second).await.unwrap();

    assert_eq!(overwritten.id, first.id);
    assert_eq!(overwritten.title, "Second Title");
    assert_eq!(overwritten.created_at, first.created_at);
    assert!(overwritten.updated_at >= first.updated_at);

    store.delete(&first.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn summaries_flag_images_without_carrying_payloads() {
    let store = test_store();
    let filter = ContentFilter::new().with_year(3103);

    let prose = store.save(fiction_draft("Prose Only", Some(3103))).await.unwrap();
    let illustrated = store.save(combined_draft("Illustrated", Some(3103))).await.unwrap();

    let page = store
        .list_summaries(&filter, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 2);

    let prose_summary = page.items.iter().find(|s| s.id == prose.id).unwrap();
    let illustrated_summary = page.items.iter().find(|s| s.id == illustrated.id).unwrap();
    assert!(!prose_summary.has_image);
    assert!(illustrated_summary.has_image);

    store.delete(&prose.id).await.unwrap();
    store.delete(&illustrated.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn image_lookup_distinguishes_no_image_from_not_found() {
    let store = test_store();

    let prose = store.save(fiction_draft("No Image", Some(3104))).await.unwrap();
    let illustrated = store.save(combined_draft("With Image", Some(3104))).await.unwrap();

    assert_eq!(store.image(&prose.id).await.unwrap(), ImageLookup::NoImage);
    assert_eq!(
        store.image("no-such-record").await.unwrap(),
        ImageLookup::NotFound
    );
    match store.image(&illustrated.id).await.unwrap() {
        ImageLookup::Found(blob) => assert!(!blob.is_empty()),
        other => panic!("expected image bytes, got {:?}", other),
    }

    store.delete(&prose.id).await.unwrap();
    store.delete(&illustrated.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn page_concatenation_reproduces_newest_first_order() {
    let store = test_store();
    let filter = ContentFilter::new().with_year(3105);

    let mut ids = Vec::new();
    for i in 0..5 {
        let saved = store
            .save(fiction_draft(&format!("Story {i}"), Some(3105)))
            .await
            .unwrap();
        ids.push(saved.id);
    }

    let full = store
        .list(&filter, &PageRequest::new(1, 100))
        .await
        .unwrap();
    assert_eq!(full.pagination.total, 5);

    let mut concatenated = Vec::new();
    for page_number in 1..=3 {
        let page = store
            .list(&filter, &PageRequest::new(page_number, 2))
            .await
            .unwrap();
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.has_next, page_number < 3);
        assert_eq!(page.pagination.has_prev, page_number > 1);
        concatenated.extend(page.items.into_iter().map(|r| r.id));
    }

    let full_ids: Vec<String> = full.items.into_iter().map(|r| r.id).collect();
    assert_eq!(concatenated, full_ids);

    for id in ids {
        store.delete(&id).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn update_applies_only_supplied_fields() {
    let store = test_store();

    let saved = store.save(fiction_draft("Before", Some(3106))).await.unwrap();
    let patch = ContentPatch {
        title: Some("After".to_string()),
        ..Default::default()
    };
    let updated = store.update(&saved.id, patch).await.unwrap().unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(updated.body, saved.body);
    assert_eq!(updated.setting_year, saved.setting_year);
    assert!(updated.updated_at >= saved.updated_at);

    let missing = store
        .update("no-such-record", ContentPatch::default())
        .await
        .unwrap();
    assert!(missing.is_none());

    store.delete(&saved.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn delete_returns_the_record_once() {
    let store = test_store();

    let saved = store.save(fiction_draft("Doomed", Some(3107))).await.unwrap();
    let deleted = store.delete(&saved.id).await.unwrap().unwrap();
    assert_eq!(deleted.id, saved.id);

    assert!(store.get(&saved.id).await.unwrap().is_none());
    assert!(store.delete(&saved.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database with migrations applied"]
async fn distinct_years_are_ascending_and_deduplicated() {
    let store = test_store();

    let a = store.save(fiction_draft("Y1", Some(3108))).await.unwrap();
    let b = store.save(fiction_draft("Y2", Some(3109))).await.unwrap();
    let c = store.save(fiction_draft("Y3", Some(3108))).await.unwrap();
    let d = store.save(fiction_draft("No Year", None)).await.unwrap();

    let years = store.distinct_years().await.unwrap();
    let ours: Vec<i32> = years
        .into_iter()
        .filter(|y| (3108..=3109).contains(y))
        .collect();
    assert_eq!(ours, vec![3108, 3109]);

    for id in [a.id, b.id, c.id, d.id] {
        store.delete(&id).await.unwrap();
    }
}
