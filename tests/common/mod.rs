//! Common test helpers and utilities shared across test suite.

use bibrelax::{record_from_json_str, record_from_value, RawRecord};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;

/// Unwraps a `json!` literal into a record.
///
/// Panics if the value is not a mapping.
#[allow(dead_code)]
pub fn record(value: Value) -> RawRecord {
    record_from_value(value).expect("test record must be a mapping")
}

/// A realistic relaxed RFC record that validates once normalized.
#[allow(dead_code)]
///
/// Uses most relaxed shapes: bare version and edition strings, typed
/// contacts, bare roles, single values for list fields.
pub fn relaxed_rfc_record() -> RawRecord {
    record_from_json_str(include_str!("../data/relaxed_rfc.json"))
        .expect("relaxed_rfc.json is a valid record")
}

/// A record with schema errors that normalization cannot fix.
#[allow(dead_code)]
pub fn malformed_record() -> RawRecord {
    record_from_json_str(include_str!("../data/malformed_item.json"))
        .expect("malformed_item.json is a valid record")
}

/// Builds a record with `n` relaxed contributors and `depth` levels of
/// nested relations, for load-style tests.
#[allow(dead_code)]
pub fn synthetic_record(n: usize, depth: usize) -> RawRecord {
    let contributors: Vec<Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "person": {
                    "name": {
                        "given": {"forename": [{"initial": "A"}]},
                        "surname": {"content": format!("Author{i}")}
                    },
                    "contact": {"type": "email", "value": format!("a{i}@example.org")}
                },
                "role": "author"
            })
        })
        .collect();

    let mut item = serde_json::json!({
        "id": format!("SYN-{depth}"),
        "version": "draft",
        "keyword": [{"content": "synthetic"}],
        "contributor": contributors,
    });
    if depth > 0 {
        item["relation"] = serde_json::json!([{
            "type": "includes",
            "bibitem": Value::Object(synthetic_record(n, depth - 1)),
        }]);
    }
    record(item)
}

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

struct SharedBufferGuard {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Write for SharedBufferGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .bytes
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBufferGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedBufferGuard {
            bytes: Arc::clone(&self.bytes),
        }
    }
}

/// Runs `f` on this thread and returns every warning it logged, one JSON
/// object per event (`level`, `target`, and `fields` with `message`).
#[allow(dead_code)]
pub fn capture_warnings<F: FnOnce()>(f: F) -> Vec<Value> {
    let buffer = SharedBuffer::default();
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::WARN)
        .with(fmt::layer().json().with_writer(buffer.clone()));
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.bytes.lock().expect("log buffer lock").clone();
    String::from_utf8(bytes)
        .expect("log output is UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each log line is a JSON event"))
        .collect()
}
