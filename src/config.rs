use anyhow::Result;
use serde::Deserialize;
use std::fs;

pub const MANIFEST_FILE: &str = "guiforge.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub java: JavaConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct JavaConfig {
    /// Package declared at the top of every generated class
    pub package: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_screens_dir")]
    pub screens_dir: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            screens_dir: default_screens_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_screens_dir() -> String {
    "screens".to_string()
}

fn default_output_dir() -> String {
    "build/generated".to_string()
}

/// Load and parse guiforge.toml configuration file
pub fn load_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!("could not find `{}` in current directory", path)
        } else {
            anyhow::anyhow!("failed to read `{}`: {}", path, e)
        }
    })?;

    let config = parse_config(&content).map_err(|e| anyhow::anyhow!("failed to parse `{}`: {}", path, e))?;
    tracing::debug!(path, project = %config.project.name, "loaded manifest");
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    if let Some(package) = &config.java.package {
        validate_package_name(package)?;
    }

    Ok(config)
}

/// Validate Java package name format
pub fn validate_package_name(package: &str) -> Result<()> {
    for (i, part) in package.split('.').enumerate() {
        let mut chars = part.chars();
        let Some(first_char) = chars.next() else {
            anyhow::bail!("Invalid Java package name '{}'. Part {} is empty", package, i + 1);
        };

        if !first_char.is_ascii_lowercase() && first_char != '_' {
            anyhow::bail!(
                "Invalid Java package name '{}'. Part '{}' must start with a lowercase letter",
                package,
                part
            );
        }

        if let Some(ch) = chars.find(|ch| !ch.is_ascii_lowercase() && !ch.is_ascii_digit() && *ch != '_') {
            anyhow::bail!(
                "Invalid Java package name '{}'. Part '{}' contains invalid character '{}'",
                package,
                part,
                ch
            );
        }

        if !crate::generator::is_java_identifier(part) {
            anyhow::bail!("Invalid Java package name '{}'. '{}' is a reserved word", package, part);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_package_name_valid() {
        assert!(validate_package_name("com.example.gui").is_ok());
        assert!(validate_package_name("com.example.my_mod").is_ok());
        assert!(validate_package_name("screens").is_ok());
        assert!(validate_package_name("net.mod123.client").is_ok());
    }

    #[test]
    fn test_validate_package_name_invalid() {
        // Starts with uppercase
        assert!(validate_package_name("Com.example.gui").is_err());

        // Contains invalid characters
        assert!(validate_package_name("com.example.my-mod").is_err());
        assert!(validate_package_name("com.example.my mod").is_err());

        // Empty part
        assert!(validate_package_name("com..gui").is_err());

        // Reserved word
        assert!(validate_package_name("com.new.gui").is_err());
    }

    #[test]
    fn test_minimal_manifest_uses_defaults() {
        let config = parse_config("[project]\nname = \"menus\"\n").unwrap();
        assert_eq!(config.project.name, "menus");
        assert_eq!(config.project.version, "0.1.0");
        assert_eq!(config.java.package, None);
        assert_eq!(config.build.screens_dir, "screens");
        assert_eq!(config.build.output_dir, "build/generated");
    }

    #[test]
    fn test_full_manifest() {
        let config = parse_config(
            r#"
[project]
name = "menus"
version = "1.2.0"

[java]
package = "com.example.menus"

[build]
screens_dir = "ui"
output_dir = "src/main/java"
"#,
        )
        .unwrap();
        assert_eq!(config.java.package.as_deref(), Some("com.example.menus"));
        assert_eq!(config.build.screens_dir, "ui");
        assert_eq!(config.build.output_dir, "src/main/java");
    }

    #[test]
    fn test_bad_package_is_rejected() {
        let result = parse_config("[project]\nname = \"x\"\n[java]\npackage = \"Com.Example\"\n");
        assert!(result.is_err());
    }
}
