//! Line formatting and the [`ZeusLog`] facade.

use std::fmt;

use crate::sink::{ConsoleSink, LineSink};

/// Separator line framing a banner title.
pub const BANNER_SEPARATOR: &str = "[ZEUS] ==========================================";

/// Severity of a log line. Each maps to exactly one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Status and progress messages
    Info,
    /// Conditions worth a look that do not stop anything
    Warning,
    /// Failures reported by the caller; logging one does not alter control flow
    Error,
}

impl Severity {
    /// The bracketed tag that prefixes lines of this severity.
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Info => "[ZEUS]",
            Severity::Warning => "[ZEUS WARNING]",
            Severity::Error => "[ZEUS ERROR]",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Formats `message` as a single tagged line.
///
/// The message is passed through verbatim: no escaping, trimming or wrapping.
pub fn format_line(severity: Severity, message: &str) -> String {
    let tag = severity.tag();
    let mut line = String::with_capacity(tag.len() + 1 + message.len());
    line.push_str(tag);
    line.push(' ');
    line.push_str(message);
    line
}

/// The three lines of a banner: separator, tagged title, separator.
pub fn banner_lines(title: &str) -> [String; 3] {
    [
        BANNER_SEPARATOR.to_string(),
        format_line(Severity::Info, title),
        BANNER_SEPARATOR.to_string(),
    ]
}

/// Logging facade bound to a sink.
///
/// The facade holds no state besides its sink, so calls are independent:
/// the same input always produces the same lines.
#[derive(Debug, Clone, Default)]
pub struct ZeusLog<S = ConsoleSink> {
    sink: S,
}

impl ZeusLog<ConsoleSink> {
    /// Facade writing to standard output.
    pub const fn console() -> Self {
        Self { sink: ConsoleSink }
    }
}

impl<S: LineSink> ZeusLog<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emits `[ZEUS] <message>`.
    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Severity::Info, message.as_ref());
    }

    /// Emits `[ZEUS WARNING] <message>`.
    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(Severity::Warning, message.as_ref());
    }

    /// Emits `[ZEUS ERROR] <message>`.
    ///
    /// This only writes the line. Deciding whether to abort, retry or carry
    /// on stays with the caller.
    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(Severity::Error, message.as_ref());
    }

    /// Emits a three-line banner around `title` as one block.
    pub fn banner(&self, title: impl AsRef<str>) {
        self.sink
            .write_block(Severity::Info, &banner_lines(title.as_ref()));
    }

    fn emit(&self, severity: Severity, message: &str) {
        self.sink.write_line(severity, &format_line(severity, message));
    }
}

/// Emits `[ZEUS] <message>` on the console.
pub fn info(message: impl AsRef<str>) {
    ZeusLog::new(ConsoleSink).info(message);
}

/// Emits `[ZEUS WARNING] <message>` on the console.
pub fn warning(message: impl AsRef<str>) {
    ZeusLog::new(ConsoleSink).warning(message);
}

/// Emits `[ZEUS ERROR] <message>` on the console.
pub fn error(message: impl AsRef<str>) {
    ZeusLog::new(ConsoleSink).error(message);
}

/// Emits a banner around `title` on the console.
pub fn banner(title: impl AsRef<str>) {
    ZeusLog::new(ConsoleSink).banner(title);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn memory_log() -> ZeusLog<MemorySink> {
        ZeusLog::new(MemorySink::new())
    }

    #[test]
    fn test_severity_tags() {
        assert_eq!(Severity::Info.tag(), "[ZEUS]");
        assert_eq!(Severity::Warning.tag(), "[ZEUS WARNING]");
        assert_eq!(Severity::Error.tag(), "[ZEUS ERROR]");
        assert_eq!(Severity::Warning.to_string(), "[ZEUS WARNING]");
    }

    #[test]
    fn test_info_line() {
        let log = memory_log();
        log.info("Loaded 3 modules");
        assert_eq!(log.sink().lines(), vec!["[ZEUS] Loaded 3 modules"]);
    }

    #[test]
    fn test_warning_line() {
        let log = memory_log();
        log.warning("Deprecated config key");
        assert_eq!(log.sink().lines(), vec!["[ZEUS WARNING] Deprecated config key"]);
    }

    #[test]
    fn test_error_line() {
        let log = memory_log();
        log.error("Missing required file");
        assert_eq!(log.sink().lines(), vec!["[ZEUS ERROR] Missing required file"]);
    }

    #[test]
    fn test_empty_message_keeps_trailing_space() {
        let log = memory_log();
        log.info("");
        log.warning(String::new());
        log.error("");
        assert_eq!(
            log.sink().lines(),
            vec!["[ZEUS] ", "[ZEUS WARNING] ", "[ZEUS ERROR] "]
        );
    }

    #[test]
    fn test_banner_lines() {
        let log = memory_log();
        log.banner("Startup");

        let lines = log.sink().lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], BANNER_SEPARATOR);
        assert_eq!(lines[1], "[ZEUS] Startup");
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn test_banner_with_empty_title() {
        assert_eq!(banner_lines("")[1], "[ZEUS] ");
    }

    #[test]
    fn test_messages_pass_through_verbatim() {
        let log = memory_log();
        let message = "  tabs\tand\nnewlines [ZEUS ERROR] ünïcödé  ";
        log.info(message);
        assert_eq!(log.sink().lines(), vec![format!("[ZEUS] {message}")]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let log = memory_log();
        log.warning("same");
        log.warning("same");
        log.banner("twice");
        log.banner("twice");

        let lines = log.sink().lines();
        assert_eq!(lines[0], lines[1]);
        assert_eq!(lines[2..5], lines[5..8]);
    }

    #[test]
    fn test_format_line_matches_concatenation() {
        for message in ["", "a", "hello world", "[c=FF0000]red[/c]"] {
            assert_eq!(format_line(Severity::Info, message), format!("[ZEUS] {message}"));
            assert_eq!(
                format_line(Severity::Warning, message),
                format!("[ZEUS WARNING] {message}")
            );
            assert_eq!(
                format_line(Severity::Error, message),
                format!("[ZEUS ERROR] {message}")
            );
        }
    }

    #[test]
    fn test_console_free_functions() {
        info("free function info");
        warning("free function warning");
        error("free function error");
        banner("free function banner");
        ZeusLog::<ConsoleSink>::console().info("console facade");
    }
}
