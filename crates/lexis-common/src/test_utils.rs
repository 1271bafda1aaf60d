//! Test utilities and shared test helpers for lexis.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! the unit and integration tests of the other workspace crates.

use parking_lot::Mutex;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Once};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::{fmt as subscriber_fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may already own the global subscriber.
        let _ = subscriber_fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `<dir>/<locale>.json` with the given contents.
pub fn write_catalog(dir: &Path, locale: &str, contents: &str) {
    std::fs::write(dir.join(format!("{locale}.json")), contents)
        .expect("Failed to write catalog file");
}

/// One event recorded by [`EventCapture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level
    pub level: Level,
    /// Event target, usually the emitting module path
    pub target: String,
    /// Rendered `message` field
    pub message: String,
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

/// A `tracing` layer that records every event it sees.
///
/// Used to assert how many warnings or errors an operation emitted:
///
/// ```ignore
/// let capture = EventCapture::new();
/// capture.run(|| resolver.get_string("tenant", "missing"));
/// assert_eq!(capture.count(Level::ERROR), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with this capture installed as the thread's default subscriber.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    /// Snapshot of all recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events at exactly `level`.
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.events.lock().iter().filter(|e| e.level == level).count()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_capture_counts_by_level() {
        let capture = EventCapture::new();
        capture.run(|| {
            tracing::warn!(key = "a", "first warning");
            tracing::warn!("second warning");
            tracing::error!("an error");
            tracing::debug!("noise");
        });

        assert_eq!(capture.count(Level::WARN), 2);
        assert_eq!(capture.count(Level::ERROR), 1);
        assert_eq!(capture.count(Level::DEBUG), 1);
        assert_eq!(capture.events()[0].message, "first warning");

        capture.clear();
        assert!(capture.events().is_empty());
    }

    #[test]
    fn test_capture_is_thread_local() {
        let capture = EventCapture::new();
        capture.run(|| {
            std::thread::spawn(|| tracing::error!("elsewhere"))
                .join()
                .unwrap();
        });
        assert_eq!(capture.count(Level::ERROR), 0);
    }

    #[test]
    fn test_write_catalog() {
        let dir = create_temp_dir();
        write_catalog(dir.path(), "EN", r#"{"a":"b"}"#);
        let contents = std::fs::read_to_string(dir.path().join("EN.json")).unwrap();
        assert_eq!(contents, r#"{"a":"b"}"#);
    }
}
