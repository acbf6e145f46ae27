//! Console logging facade for the Zeus mission scripting framework.
//!
//! Every line written through this crate carries a fixed `[ZEUS]` tag,
//! optionally followed by a severity sub-tag. Output goes to a [`LineSink`],
//! which the host provides: the server console, the `tracing` subscriber,
//! or an in-memory buffer in tests.
//!
//! # Example
//!
//! ```rust
//! use zeus_log::{MemorySink, ZeusLog};
//!
//! let log = ZeusLog::new(MemorySink::new());
//! log.banner("Startup");
//! log.info("Loaded 3 modules");
//!
//! assert_eq!(log.sink().lines()[1], "[ZEUS] Startup");
//! ```

pub mod colors;
pub mod facade;
pub mod sink;

pub use colors::{COLOR_BLUE, COLOR_GREEN, COLOR_RED, COLOR_RESET, COLOR_YELLOW};
pub use facade::{
    banner, banner_lines, error, format_line, info, warning, Severity, ZeusLog, BANNER_SEPARATOR,
};
pub use sink::{ConsoleSink, LineSink, MemorySink, TracingSink, WriterSink};
