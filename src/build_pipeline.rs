use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::generator;
use crate::project::{self, ScreenFile};

/// Represents the result of a build operation
#[derive(Debug)]
pub struct BuildResult {
    /// Files written this run
    pub files_generated: usize,
    /// Files whose generated content was already on disk
    pub files_fresh: usize,
    /// Stale classes deleted because no screen generates them anymore
    pub files_removed: usize,
    pub output_dir: PathBuf,
    pub errors: Vec<BuildError>,
}

#[derive(Debug)]
pub struct BuildError {
    pub file: PathBuf,
    pub message: String,
}

/// Core build pipeline - used by build and watch commands
///
/// # Arguments
/// * `config` - Parsed guiforge.toml configuration
/// * `clean` - If true, remove and recreate output directory
///
/// # Returns
/// BuildResult with generated/fresh counts and any per-screen errors
pub fn execute_build(config: &Config, clean: bool) -> Result<BuildResult> {
    let output_dir = Path::new(&config.build.output_dir);

    // 1. Clean output directory if requested
    if clean && output_dir.exists() {
        fs::remove_dir_all(output_dir).context("Failed to clean output directory")?;
    }
    fs::create_dir_all(output_dir).context("Failed to create output directory")?;

    // 2. Discover and parse screen documents
    let paths = project::discover_files(Path::new(&config.build.screens_dir))
        .context("Failed to discover screen files")?;

    let mut errors = Vec::new();
    let mut screens = Vec::new();
    let mut load_failed = false;
    for path in paths {
        match project::load_screen(&path) {
            Ok(screen) => screens.push(ScreenFile { path, screen }),
            Err(e) => {
                load_failed = true;
                errors.push(BuildError {
                    file: path,
                    message: format!("{:#}", e),
                })
            }
        }
    }

    // 3. Every screen can be the target of another screen's OPEN_SCREEN
    let refs = project::screen_refs(&screens);

    // 4. Generate each screen
    let mut files_generated = 0;
    let mut files_fresh = 0;
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();
    let mut expected: HashSet<PathBuf> = HashSet::new();

    for file in &screens {
        if let Some(first) = claimed.get(file.class_name()) {
            errors.push(BuildError {
                file: file.path.clone(),
                message: format!(
                    "class `{}` is already generated from {}",
                    file.class_name(),
                    first.display()
                ),
            });
            continue;
        }
        claimed.insert(file.class_name().to_string(), file.path.clone());
        expected.insert(project::output_path(config, file.class_name()));

        match generate_file(file, &refs, config) {
            Ok(true) => files_generated += 1,
            Ok(false) => files_fresh += 1,
            Err(e) => errors.push(BuildError {
                file: file.path.clone(),
                message: format!("{:#}", e),
            }),
        }
    }

    // 5. Prune classes of renamed or deleted screens. A screen that failed to
    // load may still own one of them, so nothing is pruned in that case.
    let files_removed = if load_failed {
        0
    } else {
        prune_stale(output_dir, &expected)?
    };

    Ok(BuildResult {
        files_generated,
        files_fresh,
        files_removed,
        output_dir: output_dir.to_path_buf(),
        errors,
    })
}

/// Generate one screen. Returns false when the output was already current.
fn generate_file(file: &ScreenFile, refs: &[generator::ScreenRef], config: &Config) -> Result<bool> {
    let screen = &file.screen;
    let java = generator::generate_in_package(
        &screen.elements,
        &screen.settings,
        refs,
        config.java.package.as_deref(),
    )?;

    let output_path = project::output_path(config, file.class_name());
    if is_fresh(&output_path, &java) {
        tracing::debug!(path = %output_path.display(), "output unchanged, skipping write");
        return Ok(false);
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).context(format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output_path, &java).context(format!("Failed to write {}", output_path.display()))?;
    tracing::info!(source = %file.path.display(), output = %output_path.display(), "generated screen");

    Ok(true)
}

/// Delete generated `.java` files under `output_dir` that are not in `expected`
fn prune_stale(output_dir: &Path, expected: &HashSet<PathBuf>) -> Result<usize> {
    let stale: Vec<PathBuf> = WalkDir::new(output_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("java"))
        .filter(|p| !expected.contains(p))
        .collect();

    for path in &stale {
        fs::remove_file(path).context(format!("Failed to remove stale {}", path.display()))?;
        tracing::info!(path = %path.display(), "removed stale screen class");
    }
    Ok(stale.len())
}

/// Whether `path` already holds exactly `content`
fn is_fresh(path: &Path, content: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(existing) => hash_content(&existing) == hash_content(content),
        Err(_) => false,
    }
}

/// Generate SHA256 hash of content
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
