use seenbox::{DeduplicatingStore, Key};
use seenbox_core::Record;
use seenbox_test::tracing::SpanCollector;
use seenbox_test::{MockBackend, paste};
use tracing::instrument::WithSubscriber;

#[tokio::test]
async fn is_saved_span_reports_cache_status() {
    let collector = SpanCollector::new();
    let backend = MockBackend::new();
    let store: DeduplicatingStore<Record, MockBackend> = DeduplicatingStore::new(backend);

    async {
        store.save(&paste("known")).await.unwrap();
        store.is_saved(&Key::new("known")).await.unwrap();
        store.is_saved(&Key::new("unknown")).await.unwrap();
    }
    .with_subscriber(collector.dispatch().clone())
    .await;

    assert_eq!(
        collector.field_values("seenbox.is_saved", "cache.status"),
        vec!["hit".to_string(), "miss".to_string()]
    );
    assert_eq!(
        collector.field_values("seenbox.is_saved", "key"),
        vec!["known".to_string(), "unknown".to_string()]
    );

    let saves = collector.spans_named("seenbox.save");
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].field("backend"), Some("mock"));
}
