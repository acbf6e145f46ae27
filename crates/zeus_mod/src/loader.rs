//! Host-side discovery of script modules.
//!
//! The engine compiles every script file found under a phase's module
//! directories. [`ModuleLoader`] performs that lookup against a package root
//! on disk and reports progress through the Zeus logging facade, so server
//! operators see the same `[ZEUS]` lines the mod itself writes.

use std::path::{Path, PathBuf};

use tracing::debug;
use zeus_log::{LineSink, ZeusLog};

use crate::manifest::{ModManifest, ScriptPhase};
use crate::ManifestError;

/// File extension of engine script sources.
pub const SCRIPT_EXTENSION: &str = "c";

/// What discovery found for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: ScriptPhase,
    /// Script files, sorted, as paths under the package root
    pub files: Vec<PathBuf>,
    /// Declared directories that do not exist under the package root
    pub missing: Vec<PathBuf>,
}

/// Result of a discovery run, one entry per non-empty phase in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub phases: Vec<PhaseReport>,
}

impl DiscoveryReport {
    pub fn total_files(&self) -> usize {
        self.phases.iter().map(|phase| phase.files.len()).sum()
    }

    pub fn missing_dirs(&self) -> impl Iterator<Item = &PathBuf> {
        self.phases.iter().flat_map(|phase| phase.missing.iter())
    }

    pub fn phase(&self, phase: ScriptPhase) -> Option<&PhaseReport> {
        self.phases.iter().find(|report| report.phase == phase)
    }
}

/// Resolves a manifest's script modules against a package root.
pub struct ModuleLoader<S: LineSink> {
    manifest: ModManifest,
    root: PathBuf,
    log: ZeusLog<S>,
}

impl<S: LineSink> ModuleLoader<S> {
    pub fn new(manifest: ModManifest, root: impl Into<PathBuf>, log: ZeusLog<S>) -> Self {
        Self {
            manifest,
            root: root.into(),
            log,
        }
    }

    pub fn manifest(&self) -> &ModManifest {
        &self.manifest
    }

    pub fn log(&self) -> &ZeusLog<S> {
        &self.log
    }

    /// Walks every phase in load order and collects its script files.
    ///
    /// A declared directory that does not exist is reported as a warning and
    /// recorded in the report; it does not stop discovery.
    pub async fn discover(&self) -> Result<DiscoveryReport, ManifestError> {
        self.log.banner(format!("{} loading", self.manifest.package.name));

        let mut report = DiscoveryReport::default();
        for (phase, dirs) in self.manifest.load_plan() {
            let mut phase_report = PhaseReport {
                phase,
                files: Vec::new(),
                missing: Vec::new(),
            };

            for dir in dirs {
                let absolute = self.root.join(&dir);
                let is_dir = tokio::fs::metadata(&absolute)
                    .await
                    .map(|metadata| metadata.is_dir())
                    .unwrap_or(false);
                if !is_dir {
                    self.log.warning(format!(
                        "Script module directory not found: {} ({})",
                        dir.display(),
                        phase.engine_module()
                    ));
                    phase_report.missing.push(dir);
                    continue;
                }

                for file in collect_scripts(&absolute).await? {
                    let relative = file.strip_prefix(&self.root).unwrap_or(&file).to_path_buf();
                    debug!("Found {} script: {}", phase, relative.display());
                    phase_report.files.push(relative);
                }
            }

            phase_report.files.sort();
            self.log.info(format!(
                "{} phase: {} script file(s) in {}",
                phase,
                phase_report.files.len(),
                phase.engine_module()
            ));
            report.phases.push(phase_report);
        }

        self.log.info(format!(
            "Discovered {} script file(s) across {} phase(s)",
            report.total_files(),
            report.phases.len()
        ));
        Ok(report)
    }
}

/// Recursively lists script files under `dir`.
async fn collect_scripts(dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&current).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == SCRIPT_EXTENSION) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zeus_log::MemorySink;

    async fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "// script").await.unwrap();
    }

    fn loader(root: &Path) -> ModuleLoader<MemorySink> {
        ModuleLoader::new(ModManifest::default(), root, ZeusLog::new(MemorySink::new()))
    }

    #[tokio::test]
    async fn test_discovers_scripts_in_phase_order() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "Zeus/Scripts/1_Core/Zeus/ZeusLog.c").await;
        touch(root.path(), "Zeus/Scripts/3_Game/Zeus/Admin.c").await;
        touch(root.path(), "Zeus/Scripts/3_Game/Zeus/Admin.txt").await;
        touch(root.path(), "Zeus/Scripts/4_World/Spawner.c").await;
        touch(root.path(), "Zeus/Scripts/5_Mission/Mission.c").await;
        touch(root.path(), "Zeus/Scripts/5_Mission/Ui/Menu.c").await;

        let loader = loader(root.path());
        let report = loader.discover().await.unwrap();

        assert_eq!(report.total_files(), 5);
        assert_eq!(report.missing_dirs().count(), 0);
        let phases: Vec<_> = report.phases.iter().map(|p| p.phase).collect();
        assert_eq!(phases, ScriptPhase::ALL.to_vec());

        let mission = report.phase(ScriptPhase::Mission).unwrap();
        assert_eq!(
            mission.files,
            vec![
                PathBuf::from("Zeus/Scripts/5_Mission/Mission.c"),
                PathBuf::from("Zeus/Scripts/5_Mission/Ui/Menu.c"),
            ]
        );

        assert_eq!(
            loader.log().sink().lines(),
            vec![
                "[ZEUS] ==========================================",
                "[ZEUS] Zeus loading",
                "[ZEUS] ==========================================",
                "[ZEUS] Core phase: 1 script file(s) in engineScriptModule",
                "[ZEUS] Game phase: 1 script file(s) in gameScriptModule",
                "[ZEUS] World phase: 1 script file(s) in worldScriptModule",
                "[ZEUS] Mission phase: 2 script file(s) in missionScriptModule",
                "[ZEUS] Discovered 5 script file(s) across 4 phase(s)",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_directories_are_warnings() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "Zeus/Scripts/1_Core/Zeus/ZeusLog.c").await;

        let loader = loader(root.path());
        let report = loader.discover().await.unwrap();

        assert_eq!(report.total_files(), 1);
        let missing: Vec<_> = report.missing_dirs().cloned().collect();
        assert_eq!(
            missing,
            vec![
                PathBuf::from("Zeus/Scripts/3_Game"),
                PathBuf::from("Zeus/Scripts/4_World"),
                PathBuf::from("Zeus/Scripts/5_Mission"),
            ]
        );

        let warnings: Vec<_> = loader
            .log()
            .sink()
            .lines()
            .into_iter()
            .filter(|line| line.starts_with("[ZEUS WARNING]"))
            .collect();
        assert_eq!(warnings.len(), 3);
        assert_eq!(
            warnings[0],
            "[ZEUS WARNING] Script module directory not found: Zeus/Scripts/3_Game (gameScriptModule)"
        );
    }

    #[tokio::test]
    async fn test_module_path_naming_a_file_is_missing() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "Zeus/Scripts/1_Core/A.c").await;
        touch(root.path(), "Zeus/Scripts/3_Game").await;

        let loader = loader(root.path());
        let report = loader.discover().await.unwrap();

        let game = report.phase(ScriptPhase::Game).unwrap();
        assert!(game.files.is_empty());
        assert_eq!(game.missing, vec![PathBuf::from("Zeus/Scripts/3_Game")]);
    }

    #[tokio::test]
    async fn test_empty_phases_are_skipped() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "Zeus/Scripts/1_Core/A.c").await;

        let mut manifest = ModManifest::default();
        manifest.package.dependencies.clear();
        manifest.modules.game.clear();
        manifest.modules.world.clear();
        manifest.modules.mission.clear();

        let loader = ModuleLoader::new(manifest, root.path(), ZeusLog::new(MemorySink::new()));
        let report = loader.discover().await.unwrap();

        assert_eq!(report.phases.len(), 1);
        assert!(report.phase(ScriptPhase::Game).is_none());
    }
}
