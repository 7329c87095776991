use crate::domain::logging::{Clock, LogEntry, LogLevel, LogSink};
use wasm_bindgen::JsValue;

/// Browser console sink. Each level goes to the matching console method so
/// devtools filtering keeps working.
pub struct ConsoleSink {
    min_level: LogLevel,
}

impl ConsoleSink {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

/// `[HH:MM:SS.mmm] LEVEL LAYER:Unit | message`
pub fn format_line(entry: &LogEntry, clock: &dyn Clock) -> String {
    format!("[{}] {} {} | {}", clock.format(entry.timestamp), entry.level, entry.component, entry.message)
}

impl LogSink for ConsoleSink {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn write(&self, entry: &LogEntry) {
        let line = JsValue::from(format_line(entry, &BrowserClock));
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }
}

/// `Date.now()` in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&JsValue::from_f64(timestamp as f64));
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logging::LogComponent;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            0
        }

        fn format(&self, timestamp: u64) -> String {
            format!("t{}", timestamp)
        }
    }

    #[test]
    fn line_layout() {
        let entry = LogEntry {
            timestamp: 7,
            level: LogLevel::Warn,
            component: LogComponent::Infrastructure("PolygonSocket"),
            message: "reconnecting in 4s".to_string(),
        };
        assert_eq!(format_line(&entry, &FixedClock), "[t7]  WARN INF:PolygonSocket | reconnecting in 4s");
    }

    #[test]
    fn sink_filters_below_min_level() {
        let sink = ConsoleSink::new(LogLevel::Warn);
        assert!(!sink.enabled(LogLevel::Info));
        assert!(sink.enabled(LogLevel::Warn));
        assert!(sink.enabled(LogLevel::Error));
        assert_eq!(sink.min_level(), LogLevel::Warn);
    }
}
