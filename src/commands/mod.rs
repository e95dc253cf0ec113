pub mod build;
pub mod check;
pub mod compile;
pub mod init;
pub mod watch;

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::config::{self, Config, MANIFEST_FILE};

/// Represents the type of target we're working with
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A guiforge project (manifest path)
    Project(String),
    /// A single screen document
    SingleFile(String),
}

/// Detect whether the target is a project directory or a single screen file
pub fn detect_target(target: &str) -> Target {
    if target.ends_with(".json") {
        return Target::SingleFile(target.to_string());
    }

    let path = Path::new(target);
    if path.is_dir() {
        return Target::Project(path.join(MANIFEST_FILE).to_string_lossy().into_owned());
    }

    // Anything else is taken as a manifest path
    Target::Project(target.to_string())
}

/// Run `f` from the directory holding `manifest_path`, with its config loaded.
///
/// The previous working directory is restored afterwards, whether `f`
/// succeeded or not.
pub fn in_project<T>(manifest_path: &str, f: impl FnOnce(&Config, &Path) -> Result<T>) -> Result<T> {
    let manifest_path = Path::new(manifest_path);
    let original_dir = env::current_dir()?;

    let project_dir = match manifest_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => absolute(&original_dir, dir),
        _ => original_dir.clone(),
    };

    if project_dir != original_dir {
        env::set_current_dir(&project_dir)
            .context(format!("Failed to change to directory: {}", project_dir.display()))?;
    }

    let manifest_file = manifest_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(MANIFEST_FILE);

    let result = config::load_config(manifest_file)
        .context(format!(
            "Failed to load {}. Are you in a guiforge project directory?",
            manifest_file
        ))
        .and_then(|config| f(&config, &project_dir));

    if project_dir != original_dir {
        env::set_current_dir(&original_dir)?;
    }

    result
}

fn absolute(base: &Path, dir: &Path) -> PathBuf {
    if dir.is_relative() {
        base.join(dir)
    } else {
        dir.to_path_buf()
    }
}

/// Path relative to where the user ran the command, for display
pub fn display_path(project_dir: &Path, path: &Path) -> PathBuf {
    let full = absolute(project_dir, path);
    match env::current_dir() {
        Ok(cwd) => full.strip_prefix(&cwd).map(Path::to_path_buf).unwrap_or(full),
        Err(_) => full,
    }
}
