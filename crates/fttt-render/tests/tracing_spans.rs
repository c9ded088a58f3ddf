#![forbid(unsafe_code)]
#![cfg(feature = "tracing")]

//! Span instrumentation tests.
//!
//! Run with:
//!   cargo test -p fttt-render --features tracing --test tracing_spans

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fttt_core::{Board, Marker, NodeId};
use fttt_render::Renderer;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }
}

fn with_captured_spans<F: FnOnce()>(f: F) -> Vec<CapturedSpan> {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = SpanCapture {
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = spans.lock().unwrap().clone();
    captured
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn layout_and_render_spans_carry_geometry() {
    let spans = with_captured_spans(|| {
        let board = Board::uniform(3, 3, 1).unwrap();
        let renderer = Renderer::new(&board);
        let _ = renderer.render(&board);
    });

    let layout = spans
        .iter()
        .find(|s| s.name == "layout_compute")
        .expect("layout_compute span");
    assert_eq!(layout.fields.get("depth").map(String::as_str), Some("2"));
    assert_eq!(
        layout.fields.get("trailing_gutter").map(String::as_str),
        Some("true")
    );

    let render = spans
        .iter()
        .find(|s| s.name == "render")
        .expect("render span");
    assert_eq!(render.fields.get("width").map(String::as_str), Some("12"));
    assert_eq!(render.fields.get("height").map(String::as_str), Some("12"));
    assert_eq!(render.fields.get("x").map(String::as_str), Some("0"));
    assert_eq!(render.fields.get("y").map(String::as_str), Some("0"));
    assert_eq!(render.parent_name, None);
}

#[test]
fn render_into_span_records_origin() {
    let spans = with_captured_spans(|| {
        let board = Board::uniform(2, 2, 0).unwrap();
        let mut canvas = fttt_render::Canvas::new(8, 6);
        Renderer::new(&board).render_into(&board, &mut canvas, 3, 4);
    });

    let render = spans
        .iter()
        .find(|s| s.name == "render")
        .expect("render span");
    assert_eq!(render.fields.get("x").map(String::as_str), Some("3"));
    assert_eq!(render.fields.get("y").map(String::as_str), Some("4"));
    assert_eq!(
        render.fields.get("canvas_width").map(String::as_str),
        Some("8")
    );
    assert_eq!(
        render.fields.get("canvas_height").map(String::as_str),
        Some("6")
    );
}

#[test]
fn one_layout_serves_many_frames() {
    let spans = with_captured_spans(|| {
        let mut board = Board::uniform(3, 3, 0).unwrap();
        let renderer = Renderer::new(&board);
        for index in 0..3 {
            board
                .set(NodeId::ROOT, index, Marker::new('X').unwrap())
                .unwrap();
            let _ = renderer.render(&board);
        }
    });

    let count = |name: &str| spans.iter().filter(|s| s.name == name).count();
    assert_eq!(count("layout_compute"), 1);
    assert_eq!(count("render"), 3);
}

#[test]
fn winner_scans_are_lazy_and_cached() {
    let spans = with_captured_spans(|| {
        let mut board = Board::uniform(3, 3, 0).unwrap();
        let x = Marker::new('X').unwrap();
        for index in 0..3 {
            board.set(NodeId::ROOT, index, x).unwrap();
        }
        assert_eq!(board.root().winner(), Some(x));
        assert_eq!(board.root().winner(), Some(x));
    });

    let scans: Vec<_> = spans.iter().filter(|s| s.name == "scan_winner").collect();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].fields.get("node").map(String::as_str), Some("#0"));
}
