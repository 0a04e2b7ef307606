//! Structured JSON logger
//!
//! - One log line = one event, synchronous, no buffering
//! - Deterministic key ordering (event first, level second, fields sorted)
//! - Severity-gated per logger instance so an embedded engine stays quiet
//!   unless asked otherwise

use std::io::{self, Write};
use std::sync::Mutex;

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Per-operation detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, caller aborts
    Fatal = 4,
}

impl LogLevel {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

enum Sink {
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// A severity-gated structured logger writing one JSON line per event.
pub struct Logger {
    min_level: LogLevel,
    sink: Sink,
}

impl Logger {
    /// Creates a logger writing to stdout
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            sink: Sink::Stdout,
        }
    }

    /// Creates a logger writing to the given sink
    pub fn with_writer(min_level: LogLevel, writer: Box<dyn Write + Send>) -> Self {
        Self {
            min_level,
            sink: Sink::Writer(Mutex::new(writer)),
        }
    }

    /// Returns the minimum level this logger emits
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Log an event with the given level and fields.
    ///
    /// Events below the logger's minimum level are dropped before any
    /// formatting work happens.
    pub fn log(&self, level: LogLevel, event: Event, fields: &[(&str, &str)]) {
        if level < self.min_level {
            return;
        }
        let line = format_line(level, event, fields);
        match &self.sink {
            Sink::Stdout => {
                let mut out = io::stdout();
                let _ = out.write_all(line.as_bytes());
                let _ = out.flush();
            }
            Sink::Writer(writer) => {
                if let Ok(mut writer) = writer.lock() {
                    let _ = writer.write_all(line.as_bytes());
                    let _ = writer.flush();
                }
            }
        }
    }

    /// Log at TRACE level
    pub fn trace(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(LogLevel::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(LogLevel::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(LogLevel::Warn, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(LogLevel::Fatal, event, fields);
    }
}

/// Build one JSON log line with deterministic key ordering
fn format_line(level: LogLevel, event: Event, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);

    output.push_str("{\"event\":\"");
    output.push_str(event.as_str());
    output.push_str("\",\"level\":\"");
    output.push_str(level.as_str());
    output.push('"');

    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push_str(",\"");
        escape_json_string(&mut output, key);
        output.push_str("\":\"");
        escape_json_string(&mut output, value);
        output.push('"');
    }

    output.push_str("}\n");
    output
}

fn escape_json_string(output: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::sync::Arc;

    /// A writer handing every byte to a shared buffer
    #[derive(Clone)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn new() -> Self {
            SharedBuf(Arc::new(Mutex::new(Vec::new())))
        }

        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_log_json_format() {
        let line = format_line(LogLevel::Info, Event::QueryExecuted, &[("matched", "3")]);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "QUERY_COMPLETE");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["matched"], "3");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let line1 = format_line(
            LogLevel::Info,
            Event::QueryPlanned,
            &[("zebra", "1"), ("apple", "2"), ("mango", "3")],
        );
        let line2 = format_line(
            LogLevel::Info,
            Event::QueryPlanned,
            &[("apple", "2"), ("mango", "3"), ("zebra", "1")],
        );
        assert_eq!(line1, line2);

        let apple_pos = line1.find("apple").unwrap();
        let mango_pos = line1.find("mango").unwrap();
        let zebra_pos = line1.find("zebra").unwrap();
        assert!(apple_pos < mango_pos);
        assert!(mango_pos < zebra_pos);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let line = format_line(
            LogLevel::Warn,
            Event::KindMismatch,
            &[("detail", "expected \"int32\"\nline2")],
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["detail"], "expected \"int32\"\nline2");
    }

    #[test]
    fn test_log_one_line() {
        let line = format_line(LogLevel::Info, Event::IndexCreated, &[("a", "1"), ("b", "2")]);
        assert_eq!(line.chars().filter(|c| *c == '\n').count(), 1);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_severity_gating() {
        let buf = SharedBuf::new();
        let logger = Logger::with_writer(LogLevel::Warn, Box::new(buf.clone()));

        logger.trace(Event::QueryExecuted, &[]);
        logger.info(Event::IndexCreated, &[]);
        assert!(buf.contents().is_empty());

        logger.warn(Event::KindMismatch, &[("attribute", "len")]);
        logger.fatal(Event::KindMismatch, &[]);
        let contents = buf.contents();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("\"level\":\"WARN\""));
        assert!(contents.contains("\"level\":\"FATAL\""));
    }

    #[test]
    fn test_file_sink() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let handle = file.reopen().unwrap();

        let logger = Logger::with_writer(LogLevel::Trace, Box::new(handle));
        logger.info(Event::IndexCreated, &[("attribute", "len"), ("key", "0")]);

        let mut contents = String::new();
        file.reopen().unwrap().read_to_string(&mut contents).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(parsed["event"], "INDEX_CREATED");
        assert_eq!(parsed["attribute"], "len");
    }
}
