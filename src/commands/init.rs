use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

const MANIFEST_TEMPLATE: &str = include_str!("../../templates/guiforge.toml");
const MAIN_SCREEN_TEMPLATE: &str = include_str!("../../templates/screens/main.json");
const GITIGNORE_TEMPLATE: &str = include_str!("../../templates/.gitignore");

pub fn execute(project_name: &str) -> Result<()> {
    let project_path = Path::new(project_name);

    // Check if directory already exists
    if project_path.exists() {
        anyhow::bail!("Directory '{}' already exists", project_name);
    }

    fs::create_dir_all(project_path.join("screens")).context("Failed to create project directories")?;

    let manifest_content = MANIFEST_TEMPLATE
        .replace("{{PROJECT_NAME}}", project_name)
        .replace("{{PACKAGE_SEGMENT}}", &package_segment(project_name));

    fs::write(project_path.join("guiforge.toml"), manifest_content).context("Failed to write guiforge.toml")?;

    fs::write(project_path.join("screens/main.json"), MAIN_SCREEN_TEMPLATE)
        .context("Failed to write screens/main.json")?;

    fs::write(project_path.join(".gitignore"), GITIGNORE_TEMPLATE).context("Failed to write .gitignore")?;

    println!("     {} screen project `{}`", "Created".green().bold(), project_name);

    Ok(())
}

/// Project name as one Java package segment: snake_case, ASCII only, never
/// a keyword and never starting with a digit (`2048-menus` becomes `_2048_menus`)
fn package_segment(name: &str) -> String {
    let mut segment: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let leads_ok = segment.starts_with(|c: char| c.is_ascii_lowercase() || c == '_');
    if !leads_ok || !crate::generator::is_java_identifier(&segment) {
        segment.insert(0, '_');
    }
    segment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_segment() {
        assert_eq!(package_segment("My Menus"), "my_menus");
        assert_eq!(package_segment("cool-mod"), "cool_mod");
        assert_eq!(package_segment("2048-menus"), "_2048_menus");
        assert_eq!(package_segment("caf\u{e9}.ui"), "caf__ui");
        assert_eq!(package_segment(""), "_");
        assert_eq!(package_segment("class"), "_class");
    }

    #[test]
    fn test_scaffold_package_always_validates() {
        for name in ["simple", "2048-menus", "With Spaces", "dots.and-dashes", "\u{fc}ber", "class"] {
            let manifest = MANIFEST_TEMPLATE
                .replace("{{PROJECT_NAME}}", name)
                .replace("{{PACKAGE_SEGMENT}}", &package_segment(name));
            let config = crate::config::parse_config(&manifest)
                .unwrap_or_else(|e| panic!("manifest for {:?} rejected: {}", name, e));
            assert!(config.java.package.is_some());
        }
    }

    #[test]
    fn test_bundled_screen_parses() {
        let screen: crate::generator::Screen = serde_json::from_str(MAIN_SCREEN_TEMPLATE).unwrap();
        assert!(!screen.elements.is_empty());
        assert!(crate::generator::validate(&screen.elements, &screen.settings).is_ok());
    }
}
