//! Mod package metadata and host-side script module discovery for Zeus.
//!
//! The package manifest describes what the game engine needs to load the
//! mod: the patch and its required addons, the mod entry itself, and which
//! script module directories belong to each engine phase. [`ModuleLoader`]
//! plays the host's part, resolving those directories and reporting what it
//! finds through the Zeus logging facade.

pub mod loader;
pub mod manifest;

pub use loader::{DiscoveryReport, ModuleLoader, PhaseReport, SCRIPT_EXTENSION};
pub use manifest::{ModInfo, ModManifest, PatchInfo, PreloadAddons, ScriptModules, ScriptPhase};

use std::path::PathBuf;

/// Errors raised while reading, validating or resolving a mod manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The manifest is not valid TOML or does not match the expected layout
    #[error("Manifest parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// The manifest could not be written back out
    #[error("Manifest serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A required text field is empty
    #[error("Manifest field '{0}' cannot be empty")]
    EmptyField(&'static str),
    /// The patch declares a version that is not a positive number
    #[error("Required version must be positive, got {0}")]
    InvalidVersion(f64),
    /// The same engine module is listed twice in the dependencies
    #[error("Duplicate dependency: {0}")]
    DuplicateDependency(String),
    /// A dependency does not name a known engine phase
    #[error("Unknown dependency '{0}'. Must be one of: Core, Game, World, Mission")]
    UnknownDependency(String),
    /// A dependency names a phase with no script module directories
    #[error("Dependency '{0}' declares no script module directories")]
    EmptyPhase(ScriptPhase),
    /// A script module path is blank
    #[error("Empty script module path in {0} phase")]
    EmptyModulePath(ScriptPhase),
    /// A script module path lies outside the mod directory
    #[error("Script module '{}' in {phase} phase is outside mod directory '{dir}'", .path.display())]
    ModuleOutsideDir {
        phase: ScriptPhase,
        path: PathBuf,
        dir: String,
    },
}
