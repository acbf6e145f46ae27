//! Diagnostics subscriber setup and sink selection.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zeus_log::{ConsoleSink, LineSink, TracingSink, ZeusLog};

use crate::config::LoggingSettings;

/// Facade over whichever sink the configuration selected.
pub type HostLog = ZeusLog<Arc<dyn LineSink>>;

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let registry = tracing_subscriber::registry().with(filter);

    if settings.json_format {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()?;
    }

    Ok(())
}

/// Builds the facade for the configured sink name.
///
/// Unknown names fall back to the console; the config validator rejects them
/// before this is reached.
pub fn host_log(sink: &str) -> HostLog {
    let sink: Arc<dyn LineSink> = match sink {
        "tracing" => Arc::new(TracingSink),
        _ => Arc::new(ConsoleSink),
    };
    ZeusLog::new(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_log_accepts_every_sink() {
        for name in ["console", "tracing", "unknown"] {
            let log = host_log(name);
            log.info(format!("sink {name} ready"));
        }
    }

    #[test]
    fn test_logging_setup() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            json_format: false,
            sink: "console".to_string(),
        };

        // Only the first global init in the test binary can succeed.
        let _ = setup_logging(&settings);
        assert!(setup_logging(&settings).is_err());
    }
}
