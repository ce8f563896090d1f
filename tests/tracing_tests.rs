//! Tests for tracing instrumentation.
//!
//! These tests verify that tracing spans and events are emitted correctly
//! when the tracing feature is enabled.

#![cfg(feature = "tracing")]

use kmerctx::cli::Args;
use kmerctx::config::Config;
use kmerctx::run::{count_kmer_contexts, run};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A simple layer that counts events at or above a minimum level.
struct EventCounter {
    count: Arc<AtomicUsize>,
    min_level: Level,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if event.metadata().level() <= &self.min_level {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_events(min_level: Level, f: impl FnOnce()) -> usize {
    let event_count = Arc::new(AtomicUsize::new(0));
    let layer = EventCounter {
        count: Arc::clone(&event_count),
        min_level,
    };

    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);

    event_count.load(Ordering::SeqCst)
}

#[test]
fn run_emits_info_events() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let args = Args {
        input: fixture_path("simple.fa"),
        output: dir.path().join("report.txt"),
        k: "4".to_string(),
        format: kmerctx::cli::OutputFormat::Text,
        order: kmerctx::cli::KmerOrder::FirstSeen,
        min_count: 1,
        uppercase: false,
        quiet: true,
    };
    let config = Config::new(&args).expect("should build config");

    let events = count_events(Level::INFO, || {
        run(&config).expect("should count k-mers");
    });

    // Start and completion events
    assert!(events >= 2, "should emit tracing events, got {events}");
}

#[test]
fn short_sequences_are_logged_at_debug() {
    // simple.fa holds one single-base record
    let events = count_events(Level::DEBUG, || {
        let _table = count_kmer_contexts(fixture_path("simple.fa"), 4).expect("should count k-mers");
    });

    assert!(events > 0, "should emit debug events for skipped sequences");
}
