use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::generator::{Screen, ScreenRef};

#[derive(Debug, Clone)]
pub struct ScreenFile {
    pub path: PathBuf, // screens/main.json
    pub screen: Screen,
}

impl ScreenFile {
    pub fn class_name(&self) -> &str {
        &self.screen.settings.class_name
    }
}

/// Discover all .json screen documents under `dir`, sorted by path
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        anyhow::bail!(
            "Screens directory '{}' not found. Are you in a guiforge project root?",
            dir.display()
        );
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();

    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered screen files");
    Ok(files)
}

/// Parse one persisted screen.
///
/// The editor stores each screen as `<id>.json`, so a document without an id
/// takes its file stem.
pub fn load_screen(path: &Path) -> Result<Screen> {
    let content = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
    let mut screen: Screen =
        serde_json::from_str(&content).context(format!("Failed to parse screen {}", path.display()))?;

    if screen.id.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            screen.id = stem.to_string();
        }
    }
    Ok(screen)
}

/// Load every screen in a directory, failing on the first bad document
pub fn load_screen_dir(dir: &Path) -> Result<Vec<ScreenFile>> {
    discover_files(dir)?
        .into_iter()
        .map(|path| {
            let screen = load_screen(&path)?;
            Ok(ScreenFile { path, screen })
        })
        .collect()
}

pub fn screen_refs(files: &[ScreenFile]) -> Vec<ScreenRef> {
    files.iter().map(|f| ScreenRef::from(&f.screen)).collect()
}

/// Where a generated class lands: `<output_dir>/<package path>/<ClassName>.java`
pub fn output_path(config: &Config, class_name: &str) -> PathBuf {
    let mut path = PathBuf::from(&config.build.output_dir);
    if let Some(package) = &config.java.package {
        for segment in package.split('.') {
            path.push(segment);
        }
    }
    path.push(format!("{}.java", class_name));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildConfig, JavaConfig, ProjectConfig};
    use tempfile::TempDir;

    fn make_test_config(package: Option<&str>) -> Config {
        Config {
            project: ProjectConfig {
                name: "test-menus".to_string(),
                version: "0.1.0".to_string(),
            },
            java: JavaConfig {
                package: package.map(str::to_string),
            },
            build: BuildConfig::default(),
        }
    }

    #[test]
    fn test_output_path_follows_package() {
        let config = make_test_config(Some("com.example.menus"));
        assert_eq!(
            output_path(&config, "MainMenu"),
            PathBuf::from("build/generated/com/example/menus/MainMenu.java")
        );
    }

    #[test]
    fn test_output_path_without_package() {
        let config = make_test_config(None);
        assert_eq!(output_path(&config, "MainMenu"), PathBuf::from("build/generated/MainMenu.java"));
    }

    #[test]
    fn test_discover_only_json_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("nested/c.json"), "{}").unwrap();

        let files = discover_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "nested/c.json"]);
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(discover_files(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_screen_id_defaults_to_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"settings": {"className": "SettingsScreen"}}"#).unwrap();

        let screen = load_screen(&path).unwrap();
        assert_eq!(screen.id, "settings");
        assert_eq!(screen.settings.class_name, "SettingsScreen");
    }

    #[test]
    fn test_bad_json_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_screen(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }
}
