use chanlog::{Level, LoggerFactory, log_debug, log_error, log_fatal, log_info, log_trace, log_warn};
use chanlog_config::ConfigSection;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("capture lock")).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().map_err(|e| io::Error::other(e.to_string()))?.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

#[test]
fn messages_below_threshold_are_dropped() {
    let factory = LoggerFactory::new();
    let face = factory.create("Face");

    let output = capture(|| {
        log_trace!(face, "trace-line");
        log_debug!(face, "debug-line");
        log_info!(face, "info-line {}", 1);
        log_warn!(face, "warn-line");
        log_error!(face, "error-line");
    });

    assert!(!output.contains("trace-line"));
    assert!(!output.contains("debug-line"));
    assert!(output.contains("info-line 1"));
    assert!(output.contains("warn-line"));
    assert!(output.contains("error-line"));
    assert!(output.contains("module=\"Face\""));
}

#[test]
fn reload_changes_what_passes() {
    let factory = LoggerFactory::new();
    let face = factory.create("Face");
    let log = ConfigSection::new().with_leaf("default_level", "INFO").with_leaf("Face", "ERROR");
    factory.on_config(&log, false, "reload").expect("valid section");

    let output = capture(|| {
        log_warn!(face, "quiet-now");
        log_fatal!(face, "still-loud");
    });

    assert_eq!(face.level(), Level::Error);
    assert!(!output.contains("quiet-now"));
    assert!(output.contains("still-loud"));
    assert!(output.contains("fatal=true"));
}

#[test]
fn none_silences_fatal_too() {
    let factory = LoggerFactory::new();
    factory.set_default_level(Level::None);
    let face = factory.create("Face");

    let output = capture(|| log_fatal!(&face, "never-printed"));

    assert!(!output.contains("never-printed"));
}
