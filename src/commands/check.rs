use anyhow::Result;
use colored::Colorize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::commands::{detect_target, in_project, Target};
use crate::generator::document::ActionKind;
use crate::generator::{self, Screen, ScreenRef};
use crate::project::{self, ScreenFile};

/// Validate screen documents without generating anything
pub fn execute(target: &str) -> Result<()> {
    match detect_target(target) {
        Target::Project(manifest_path) => execute_project(&manifest_path),
        Target::SingleFile(file_path) => execute_single_file(&file_path),
    }
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub errors: Vec<(PathBuf, String)>,
    pub warnings: Vec<(PathBuf, String)>,
}

fn execute_project(manifest_path: &str) -> Result<()> {
    let start = Instant::now();

    let report = in_project(manifest_path, |config, _| {
        let mut report = CheckReport::default();
        let mut screens = Vec::new();
        for path in project::discover_files(Path::new(&config.build.screens_dir))? {
            match project::load_screen(&path) {
                Ok(screen) => screens.push(ScreenFile { path, screen }),
                Err(e) => report.errors.push((path, format!("{:#}", e))),
            }
        }
        check_screens(&screens, &mut report);
        Ok(report)
    })?;

    print_report(&report, start)
}

fn execute_single_file(file_path: &str) -> Result<()> {
    let start = Instant::now();
    let path = PathBuf::from(file_path);
    let screen = project::load_screen(&path)?;

    let mut report = CheckReport::default();
    check_screens(&[ScreenFile { path, screen }], &mut report);
    print_report(&report, start)
}

/// Check every screen against itself and against its siblings
pub fn check_screens(screens: &[ScreenFile], report: &mut CheckReport) {
    let refs = project::screen_refs(screens);
    let mut classes: HashMap<&str, &Path> = HashMap::new();

    for file in screens {
        report.checked += 1;

        if let Some(first) = classes.insert(file.class_name(), file.path.as_path()) {
            report.errors.push((
                file.path.clone(),
                format!("class `{}` is also generated from {}", file.class_name(), first.display()),
            ));
        }

        if let Err(e) = generator::validate(&file.screen.elements, &file.screen.settings) {
            report.errors.push((file.path.clone(), e.to_string()));
        }

        for warning in unresolved_targets(&file.screen, &refs) {
            report.warnings.push((file.path.clone(), warning));
        }
    }
}

/// OPEN_SCREEN actions pointing at screens that do not exist
fn unresolved_targets(screen: &Screen, refs: &[ScreenRef]) -> Vec<String> {
    screen
        .elements
        .iter()
        .flat_map(|el| [el.events.on_click.as_ref(), el.events.on_change.as_ref()])
        .flatten()
        .filter(|action| action.kind == Some(ActionKind::OpenScreen))
        .filter(|action| !refs.iter().any(|r| r.id == action.value))
        .map(|action| format!("OPEN_SCREEN target `{}` does not match any screen id", action.value))
        .collect()
}

fn print_report(report: &CheckReport, start: Instant) -> Result<()> {
    for (path, warning) in &report.warnings {
        eprintln!("{} {} - {}", "warning:".yellow().bold(), path.display(), warning);
    }

    if !report.errors.is_empty() {
        eprintln!(
            "{} check failed with {} error(s)",
            "error:".red().bold(),
            report.errors.len()
        );
        for (path, message) in &report.errors {
            eprintln!("  {} - {}", path.display(), message);
        }
        anyhow::bail!("Check failed");
    }

    println!(
        "    {} {} screen(s) in {:.2}s",
        "Checked".green().bold(),
        report.checked,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
