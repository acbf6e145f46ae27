//! Mod package manifest.
//!
//! This module holds the declarative side of the mod: the patch entry the
//! engine resolves addons against, the mod registration, and the script
//! module directories for each engine phase. Manifests are stored as TOML.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::info;

use crate::ManifestError;

/// Engine phase a script module is compiled and loaded in.
///
/// Phases load in declaration order; modules of a later phase can see the
/// types of every earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScriptPhase {
    Core,
    Game,
    World,
    Mission,
}

impl ScriptPhase {
    /// All phases in engine load order.
    pub const ALL: [ScriptPhase; 4] = [
        ScriptPhase::Core,
        ScriptPhase::Game,
        ScriptPhase::World,
        ScriptPhase::Mission,
    ];

    /// Name used for this phase in the mod's dependency list.
    pub const fn dependency_name(self) -> &'static str {
        match self {
            ScriptPhase::Core => "Core",
            ScriptPhase::Game => "Game",
            ScriptPhase::World => "World",
            ScriptPhase::Mission => "Mission",
        }
    }

    /// Engine class that lists this phase's module directories.
    pub const fn engine_module(self) -> &'static str {
        match self {
            ScriptPhase::Core => "engineScriptModule",
            ScriptPhase::Game => "gameScriptModule",
            ScriptPhase::World => "worldScriptModule",
            ScriptPhase::Mission => "missionScriptModule",
        }
    }

    /// Conventional folder name for this phase under `<dir>/Scripts`.
    pub const fn script_folder(self) -> &'static str {
        match self {
            ScriptPhase::Core => "1_Core",
            ScriptPhase::Game => "3_Game",
            ScriptPhase::World => "4_World",
            ScriptPhase::Mission => "5_Mission",
        }
    }

    /// Looks a phase up by its dependency name.
    pub fn from_dependency_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.dependency_name() == name)
    }
}

impl fmt::Display for ScriptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dependency_name())
    }
}

/// Patch entry: what the mod requires from the base game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchInfo {
    /// Patch class name
    pub name: String,
    /// Addons that must be loaded before this one
    #[serde(default)]
    pub required_addons: Vec<String>,
    /// Minimum engine version
    #[serde(default = "default_required_version")]
    pub required_version: f64,
}

fn default_required_version() -> f64 {
    1.0
}

/// Addons the engine preloads together with the mod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreloadAddons {
    #[serde(default)]
    pub list: Vec<String>,
}

/// Mod registration as presented to the engine's mod list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModInfo {
    /// Display name
    pub name: String,
    /// Root directory of the mod inside the package
    pub dir: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub action: String,
    /// Input bindings file, relative to the package root
    #[serde(default)]
    pub inputs: Option<String>,
    #[serde(rename = "type", default = "default_mod_type")]
    pub kind: String,
    /// Preprocessor defines passed to the script compiler
    #[serde(default)]
    pub defines: Vec<String>,
    /// Engine script phases the mod hooks into
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// UI image set files
    #[serde(default)]
    pub image_sets: Vec<String>,
    /// UI widget style files
    #[serde(default)]
    pub widget_styles: Vec<String>,
}

fn default_mod_type() -> String {
    "mod".to_string()
}

/// Script module directories per engine phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptModules {
    #[serde(default)]
    pub core: Vec<String>,
    #[serde(default)]
    pub game: Vec<String>,
    #[serde(default)]
    pub world: Vec<String>,
    #[serde(default)]
    pub mission: Vec<String>,
}

impl ScriptModules {
    /// Directories declared for `phase`.
    pub fn for_phase(&self, phase: ScriptPhase) -> &[String] {
        match phase {
            ScriptPhase::Core => &self.core,
            ScriptPhase::Game => &self.game,
            ScriptPhase::World => &self.world,
            ScriptPhase::Mission => &self.mission,
        }
    }
}

/// Complete mod package manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModManifest {
    pub patch: PatchInfo,
    #[serde(default)]
    pub preload_addons: PreloadAddons,
    #[serde(rename = "mod")]
    pub package: ModInfo,
    #[serde(default)]
    pub modules: ScriptModules,
}

impl Default for ModManifest {
    fn default() -> Self {
        let dir = "Zeus".to_string();
        let module = |phase: ScriptPhase| vec![format!("{dir}/Scripts/{}", phase.script_folder())];

        Self {
            patch: PatchInfo {
                name: "Zeus_Scripts".to_string(),
                required_addons: vec!["DZ_Scripts".to_string()],
                required_version: 1.0,
            },
            preload_addons: PreloadAddons::default(),
            modules: ScriptModules {
                core: module(ScriptPhase::Core),
                game: module(ScriptPhase::Game),
                world: module(ScriptPhase::World),
                mission: module(ScriptPhase::Mission),
            },
            package: ModInfo {
                name: "Zeus".to_string(),
                dir: dir.clone(),
                author: "Zeus Development Team".to_string(),
                overview: "Advanced mission scripting and administrative framework for DayZ servers"
                    .to_string(),
                picture: String::new(),
                action: String::new(),
                inputs: Some(format!("{dir}/Scripts/Inputs.xml")),
                kind: default_mod_type(),
                defines: vec![],
                dependencies: vec![
                    ScriptPhase::Game.to_string(),
                    ScriptPhase::World.to_string(),
                    ScriptPhase::Mission.to_string(),
                ],
                image_sets: vec![],
                widget_styles: vec![],
            },
        }
    }
}

impl ModManifest {
    /// Parses a manifest from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the manifest as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads a manifest from a TOML file.
    ///
    /// If the file doesn't exist, writes the default Zeus manifest to `path`
    /// and returns it.
    pub async fn load_from_file(path: &Path) -> Result<Self, ManifestError> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            Self::from_toml_str(&content)
        } else {
            let manifest = ModManifest::default();
            tokio::fs::write(path, manifest.to_toml_string()?).await?;
            info!("Created default mod manifest: {}", path.display());
            Ok(manifest)
        }
    }

    /// Checks the manifest for consistency.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.patch.name.trim().is_empty() {
            return Err(ManifestError::EmptyField("patch.name"));
        }
        let version = self.patch.required_version;
        if version.is_nan() || version <= 0.0 {
            return Err(ManifestError::InvalidVersion(self.patch.required_version));
        }
        if self.package.name.trim().is_empty() {
            return Err(ManifestError::EmptyField("mod.name"));
        }
        if self.package.dir.trim().is_empty() {
            return Err(ManifestError::EmptyField("mod.dir"));
        }

        let mut seen = HashSet::new();
        for dependency in &self.package.dependencies {
            if !seen.insert(dependency.as_str()) {
                return Err(ManifestError::DuplicateDependency(dependency.clone()));
            }
            let phase = ScriptPhase::from_dependency_name(dependency)
                .ok_or_else(|| ManifestError::UnknownDependency(dependency.clone()))?;
            if self.modules.for_phase(phase).is_empty() {
                return Err(ManifestError::EmptyPhase(phase));
            }
        }

        for phase in ScriptPhase::ALL {
            for module in self.modules.for_phase(phase) {
                if module.trim().is_empty() {
                    return Err(ManifestError::EmptyModulePath(phase));
                }
                let path = PathBuf::from(module);
                let escapes = path.components().any(|component| {
                    matches!(
                        component,
                        Component::ParentDir | Component::RootDir | Component::Prefix(_)
                    )
                });
                if escapes || !path.starts_with(&self.package.dir) {
                    return Err(ManifestError::ModuleOutsideDir {
                        phase,
                        path,
                        dir: self.package.dir.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Module directories grouped by phase, in engine load order.
    ///
    /// Phases without any directories are left out.
    pub fn load_plan(&self) -> Vec<(ScriptPhase, Vec<PathBuf>)> {
        ScriptPhase::ALL
            .into_iter()
            .filter_map(|phase| {
                let dirs = self.modules.for_phase(phase);
                if dirs.is_empty() {
                    None
                } else {
                    Some((phase, dirs.iter().map(PathBuf::from).collect()))
                }
            })
            .collect()
    }
}
