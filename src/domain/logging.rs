//! Process-wide structured logging. Call sites go through the `log_*` macros;
//! the sink and the clock are installed once at start-up by the outer layers.

use derive_more::Display;
use serde::Deserialize;
use std::fmt;
use std::sync::OnceLock;
use strum::EnumString;

/// Severity, ordered so that `level >= min_level` passes a filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, EnumString, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    #[strum(serialize = "trace")]
    Trace,
    #[display(fmt = "DEBUG")]
    #[strum(serialize = "debug")]
    Debug,
    #[default]
    #[display(fmt = " INFO")]
    #[strum(serialize = "info")]
    Info,
    #[display(fmt = " WARN")]
    #[strum(serialize = "warn")]
    Warn,
    #[display(fmt = "ERROR")]
    #[strum(serialize = "error")]
    Error,
}

/// Layer and unit that produced a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch, or a sequence number before a clock
    /// is installed.
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

/// Wall clock used to stamp entries.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
    fn format(&self, timestamp: u64) -> String;
}

/// Destination of log entries.
pub trait LogSink: Send + Sync {
    /// Checked before the message is formatted.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn write(&self, entry: &LogEntry);
}

static SINK: OnceLock<Box<dyn LogSink>> = OnceLock::new();
static CLOCK: OnceLock<Box<dyn Clock>> = OnceLock::new();

/// Install the process-wide sink. Later calls are ignored.
pub fn init_sink(sink: Box<dyn LogSink>) {
    let _ = SINK.set(sink);
}

pub fn init_clock(clock: Box<dyn Clock>) {
    let _ = CLOCK.set(clock);
}

pub fn clock() -> &'static dyn Clock {
    CLOCK.get().map(|clock| clock.as_ref()).unwrap_or(&SequenceClock)
}

fn sink() -> &'static dyn LogSink {
    SINK.get().map(|sink| sink.as_ref()).unwrap_or(&Discard)
}

/// Backend of the `log_*` macros.
pub fn emit(level: LogLevel, component: LogComponent, args: fmt::Arguments<'_>) {
    let sink = sink();
    if !sink.enabled(level) {
        return;
    }
    sink.write(&LogEntry { timestamp: clock().now_ms(), level, component, message: args.to_string() });
}

struct Discard;

impl LogSink for Discard {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn write(&self, _entry: &LogEntry) {}
}

/// Stand-in until a real clock is installed (native tests).
struct SequenceClock;

impl Clock for SequenceClock {
    fn now_ms(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        NEXT.fetch_add(1, Ordering::Relaxed)
    }

    fn format(&self, timestamp: u64) -> String {
        format!("#{:06}", timestamp)
    }
}

#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::emit($crate::domain::logging::LogLevel::Trace, $component, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::emit($crate::domain::logging::LogLevel::Debug, $component, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Info, $component, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Warn, $component, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Error, $component, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn levels_parse_case_insensitive() {
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("debug").unwrap(), LogLevel::Debug);
        assert!(LogLevel::from_str("loud").is_err());
        assert!(LogLevel::Error > LogLevel::Info);
    }

    #[test]
    fn component_display_carries_layer_prefix() {
        assert_eq!(LogComponent::Application("Lifecycle").to_string(), "APP:Lifecycle");
        assert_eq!(LogComponent::Infrastructure("Polygon").to_string(), "INF:Polygon");
    }

    #[test]
    fn sequence_clock_is_monotonic() {
        let first = SequenceClock.now_ms();
        assert!(SequenceClock.now_ms() > first);
        assert_eq!(SequenceClock.format(42), "#000042");
    }

    #[test]
    fn macros_resolve_at_crate_root() {
        crate::log_info!(LogComponent::Domain("Logging"), "info {}", 1);
        crate::log_warn!(LogComponent::Domain("Logging"), "warn {}", 2);
        crate::log_debug!(LogComponent::Domain("Logging"), "debug {}", 3);
        assert!(!sink().enabled(LogLevel::Error));
    }
}
