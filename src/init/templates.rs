//! Template sources.
//!
//! The default template is compiled into the binary and written to a
//! temporary directory before synchronization, so a relocated binary still
//! scaffolds projects. A directory on disk can replace it.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::{Config, DevflowError, Result};

/// Environment variable that overrides the template directory.
pub const TEMPLATE_DIR_ENV: &str = "DEVFLOW_TEMPLATE_DIR";

/// A file of the bundled template.
#[derive(Debug, Clone, Copy)]
pub struct BundledFile {
    /// Path relative to the template root, `/`-separated
    pub path: &'static str,
    pub content: &'static str,
}

macro_rules! bundled {
    ($path:literal) => {
        BundledFile { path: $path, content: include_str!(concat!("../../assets/template/", $path)) }
    };
}

/// Every file under `assets/template`.
pub const BUNDLED_TEMPLATE: &[BundledFile] = &[
    bundled!(".devflow/README.md"),
    bundled!(".devflow/bootstrap/session-start.md"),
    bundled!(".devflow/history/.gitkeep"),
    bundled!(".devflow/preset.json"),
    bundled!(".devflow/queue/.gitkeep"),
    bundled!(".devflow/reports/.gitkeep"),
    bundled!(".devflow/state.json"),
    bundled!(".devflow/steps/.keep"),
];

/// Where setup copies from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template compiled into the binary
    Bundled,
    /// A template directory on disk
    Directory(PathBuf),
}

impl TemplateSource {
    /// Make the template available as a directory.
    ///
    /// A directory source is returned as is; a missing directory surfaces
    /// later as `TemplateNotFound`.
    pub fn prepare(&self) -> Result<PreparedTemplate> {
        match self {
            Self::Directory(root) => Ok(PreparedTemplate { root: root.clone(), _extracted: None }),
            Self::Bundled => {
                let dir = tempfile::Builder::new()
                    .prefix("devflow-template-")
                    .tempdir()
                    .map_err(|e| DevflowError::io("create directory", std::env::temp_dir(), e))?;
                extract_bundled_template(dir.path())?;
                tracing::debug!(path = %dir.path().display(), "Extracted bundled template");
                Ok(PreparedTemplate { root: dir.path().to_path_buf(), _extracted: Some(dir) })
            }
        }
    }
}

/// A template directory ready to synchronize from.
///
/// An extracted bundled template is deleted when this is dropped.
#[derive(Debug)]
pub struct PreparedTemplate {
    root: PathBuf,
    _extracted: Option<TempDir>,
}

impl PreparedTemplate {
    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Write the bundled template under `dir`.
pub fn extract_bundled_template(dir: &Path) -> Result<()> {
    for file in BUNDLED_TEMPLATE {
        let target = dir.join(file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DevflowError::io("create directory", parent, e))?;
        }
        std::fs::write(&target, file.content).map_err(|e| DevflowError::io("write", &target, e))?;
    }
    Ok(())
}

/// Pick the template: explicit override, then config, then the bundled one.
pub fn resolve_template_source(explicit: Option<&Path>, config: &Config) -> TemplateSource {
    if let Some(path) = explicit {
        return TemplateSource::Directory(path.to_path_buf());
    }

    if let Some(root) = &config.template.root {
        return TemplateSource::Directory(root.clone());
    }

    TemplateSource::Bundled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PresetRecord, SessionState};
    use walkdir::WalkDir;

    fn bundled(path: &str) -> &'static str {
        BUNDLED_TEMPLATE.iter().find(|f| f.path == path).unwrap().content
    }

    #[test]
    fn test_bundled_template_matches_assets() {
        let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("template");
        let mut on_disk: Vec<String> = WalkDir::new(&assets)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(&assets).unwrap();
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect();
        on_disk.sort();

        let embedded: Vec<String> = BUNDLED_TEMPLATE.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(embedded, on_disk);

        for file in BUNDLED_TEMPLATE {
            assert_eq!(std::fs::read_to_string(assets.join(file.path)).unwrap(), file.content);
        }
    }

    #[test]
    fn test_prepared_bundled_template_is_self_contained() {
        let prepared = TemplateSource::Bundled.prepare().unwrap();
        let root = prepared.path().to_path_buf();

        assert!(!root.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(root.join(".devflow").join("state.json").is_file());
        assert!(root.join(".devflow").join("steps").join(".keep").is_file());

        drop(prepared);
        assert!(!root.exists());
    }

    #[test]
    fn test_directory_source_is_used_as_is() {
        let prepared = TemplateSource::Directory(PathBuf::from("/my/template")).prepare().unwrap();
        assert_eq!(prepared.path(), Path::new("/my/template"));
    }

    #[test]
    fn test_resolution_order() {
        let mut config = Config::default();
        assert_eq!(resolve_template_source(None, &config), TemplateSource::Bundled);

        config.template.root = Some(PathBuf::from("/from/config"));
        assert_eq!(
            resolve_template_source(None, &config),
            TemplateSource::Directory(PathBuf::from("/from/config"))
        );

        assert_eq!(
            resolve_template_source(Some(Path::new("/explicit")), &config),
            TemplateSource::Directory(PathBuf::from("/explicit"))
        );
    }

    #[test]
    fn test_bundled_records_match_defaults() {
        let state: SessionState = serde_json::from_str(bundled(".devflow/state.json")).unwrap();
        assert_eq!(state, SessionState::default());

        let preset: PresetRecord = serde_json::from_str(bundled(".devflow/preset.json")).unwrap();
        assert_eq!(preset, PresetRecord::initial());
    }
}
