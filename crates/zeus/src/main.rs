//! Zeus host entry point.
//!
//! Loads the host configuration, sets up logging, then validates the mod
//! manifest and discovers its script modules, reporting every step through
//! the `[ZEUS]` console facade.

mod cli;
mod config;
mod logging;

use tracing::{debug, info};
use zeus_log::{LineSink, ZeusLog};
use zeus_mod::{DiscoveryReport, ModManifest, ModuleLoader};

use cli::CliArgs;
use config::AppConfig;
use logging::{host_log, setup_logging, HostLog};

/// Main application struct holding the resolved configuration and the facade.
pub struct Application {
    config: AppConfig,
    log: HostLog,
}

impl Application {
    /// Loads and validates configuration, then initializes logging.
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = AppConfig::load_from_file(&args.config_path).await?;
        config.apply_overrides(&args);
        config.validate()?;

        setup_logging(&config.logging)?;
        debug!("Configuration loaded from {}", args.config_path.display());

        let log = host_log(&config.logging.sink);
        Ok(Self { config, log })
    }

    /// Loads the manifest and discovers its script modules.
    ///
    /// Manifest and discovery failures are reported as `[ZEUS ERROR]` lines
    /// before the error is handed back to the caller.
    pub async fn run(self) -> Result<DiscoveryReport, Box<dyn std::error::Error>> {
        let version = option_env!("CARGO_PKG_VERSION").unwrap_or("UNK");
        self.log.banner(format!("Zeus Framework v{version}"));

        let manifest_path = self.config.manifest_path();
        let manifest = match ModManifest::load_from_file(&manifest_path).await {
            Ok(manifest) => manifest,
            Err(e) => {
                let context = format!("Failed to load manifest {}", manifest_path.display());
                report_failure(&self.log, &context, &e);
                return Err(e.into());
            }
        };

        if let Err(e) = manifest.validate() {
            let context = format!("Invalid manifest {}", manifest_path.display());
            report_failure(&self.log, &context, &e);
            return Err(e.into());
        }

        self.log.info(format!(
            "{} by {} (requires {})",
            manifest.package.name,
            manifest.package.author,
            manifest.patch.required_addons.join(", ")
        ));

        let loader = ModuleLoader::new(manifest, self.config.root_dir(), self.log);
        let report = match loader.discover().await {
            Ok(report) => report,
            Err(e) => {
                report_failure(loader.log(), "Script discovery failed", &e);
                return Err(e.into());
            }
        };

        info!(
            "Discovery finished: {} files, {} missing directories",
            report.total_files(),
            report.missing_dirs().count()
        );
        Ok(report)
    }
}

/// Writes `<context>: <error>` as a `[ZEUS ERROR]` line.
fn report_failure<S: LineSink>(log: &ZeusLog<S>, context: &str, err: &dyn std::error::Error) {
    log.error(format!("{context}: {err}"));
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    match Application::new(args).await {
        Ok(app) => {
            if app.run().await.is_err() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            zeus_log::error(format!("Failed to start: {e}"));
            std::process::exit(1);
        }
    }

    Ok(())
}
