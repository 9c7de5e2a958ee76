//! Span capture for asserting on gateway tracing output.
//!
//! Only spans whose name starts with `seenbox.` are kept.

use std::sync::{Arc, Mutex};

use tracing::Dispatch;
use tracing::span::{Attributes, Id, Record};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

const PREFIX: &str = "seenbox.";

/// Captured span information.
#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub id: u64,
    /// e.g. "seenbox.is_saved"
    pub name: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedSpan {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct SpanCaptureLayer {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

#[derive(Default)]
struct FieldVisitor {
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .push((field.name().to_string(), format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .push((field.name().to_string(), value.to_string()));
    }
}

impl<S> Layer<S> for SpanCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, _ctx: Context<'_, S>) {
        let metadata = attrs.metadata();
        if !metadata.name().starts_with(PREFIX) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);

        self.spans.lock().unwrap().push(CapturedSpan {
            id: id.into_u64(),
            name: metadata.name().to_string(),
            fields: visitor.fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span_ref) = ctx.span(id) else {
            return;
        };
        if !span_ref.metadata().name().starts_with(PREFIX) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        values.record(&mut visitor);

        let span_id = id.into_u64();
        let mut spans = self.spans.lock().unwrap();
        // Span ids are reused after close, so match the most recent one
        if let Some(captured) = spans.iter_mut().rev().find(|s| s.id == span_id) {
            for (key, value) in visitor.fields {
                if let Some(existing) = captured.fields.iter_mut().find(|(k, _)| k == &key) {
                    existing.1 = value;
                } else {
                    captured.fields.push((key, value));
                }
            }
        }
    }
}

/// Collector for captured spans.
#[derive(Clone)]
pub struct SpanCollector {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    dispatch: Dispatch,
}

impl Default for SpanCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanCollector {
    pub fn new() -> Self {
        let spans = Arc::new(Mutex::new(Vec::new()));
        let layer = SpanCaptureLayer {
            spans: spans.clone(),
        };
        let dispatch = Dispatch::new(Registry::default().with(layer));
        Self { spans, dispatch }
    }

    /// Dispatch to install with `tracing::dispatcher::with_default` or
    /// `WithSubscriber::with_subscriber`.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    pub fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }

    /// Values of `field` across every span called `name`, in creation order.
    pub fn field_values(&self, name: &str, field: &str) -> Vec<String> {
        self.spans_named(name)
            .iter()
            .filter_map(|s| s.field(field).map(String::from))
            .collect()
    }

    pub fn clear(&self) {
        self.spans.lock().unwrap().clear();
    }
}
