use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::validate_package_name;
use crate::generator::{self, McVersion, ModLoader, Screen, ScreenRef};
use crate::project;

/// Command-line overrides for a single compile
#[derive(Debug, Default, Clone)]
pub struct CompileOptions {
    pub loader: Option<String>,
    pub mc_version: Option<String>,
    pub class_name: Option<String>,
    pub package: Option<String>,
    /// Directory of sibling screens, used to resolve OPEN_SCREEN targets
    pub screens: Option<String>,
}

/// Compile one screen document to Java (print to stdout)
pub fn execute(file_path: &str, options: &CompileOptions) -> Result<()> {
    let java = compile_file(file_path, options)?;
    print!("{}", java);
    // Status goes to stderr so stdout stays pasteable Java
    eprintln!("    {} {}", "Compiled".green().bold(), file_path);
    Ok(())
}

pub fn compile_file(file_path: &str, options: &CompileOptions) -> Result<String> {
    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {}", file_path);
    }

    let mut screen = project::load_screen(path)?;
    apply_overrides(&mut screen, options)?;

    if let Some(package) = &options.package {
        validate_package_name(package)?;
    }

    let mut refs: Vec<ScreenRef> = match &options.screens {
        Some(dir) => {
            let siblings = project::load_screen_dir(Path::new(dir))
                .context(format!("Failed to load sibling screens from {}", dir))?;
            project::screen_refs(&siblings)
        }
        None => Vec::new(),
    };
    // The compiled screen wins over a stale sibling copy of itself
    refs.retain(|r| r.id != screen.id);
    refs.push(ScreenRef::from(&screen));

    let java = generator::generate_in_package(
        &screen.elements,
        &screen.settings,
        &refs,
        options.package.as_deref(),
    )
    .context(format!("Failed to generate {}", file_path))?;

    Ok(java)
}

fn apply_overrides(screen: &mut Screen, options: &CompileOptions) -> Result<()> {
    let settings = &mut screen.settings;

    if let Some(loader) = &options.loader {
        settings.loader = ModLoader::parse(loader).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown loader '{}'. Expected one of: fabric, forge, neoforge, quilt, lwjgl2",
                loader
            )
        })?;
    }

    if let Some(version) = &options.mc_version {
        settings.version = McVersion::parse(version).ok_or_else(|| {
            let known: Vec<&str> = McVersion::ALL.iter().map(|v| v.as_str()).collect();
            anyhow::anyhow!("Unknown version '{}'. Expected one of: {}", version, known.join(", "))
        })?;
    }

    if let Some(class_name) = &options.class_name {
        settings.class_name = class_name.clone();
    }

    Ok(())
}
