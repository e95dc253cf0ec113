use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::build_pipeline::{self, BuildResult};
use crate::commands::{detect_target, display_path, in_project, Target};

pub fn execute(target: &str, clean: bool) -> Result<()> {
    match detect_target(target) {
        Target::Project(manifest_path) => execute_project(&manifest_path, clean),
        Target::SingleFile(file_path) => {
            anyhow::bail!(
                "`build` works on projects; use `guiforge compile {}` for a single screen",
                file_path
            )
        }
    }
}

fn execute_project(manifest_path: &str, clean: bool) -> Result<()> {
    let start = Instant::now();

    let (result, name, project_dir) = in_project(manifest_path, |config, project_dir| {
        let result = build_pipeline::execute_build(config, clean)?;
        Ok((result, config.project.name.clone(), project_dir.to_path_buf()))
    })?;

    report_errors(&result)?;

    println!(
        "   {} `{}`: {} screen(s) generated, {} fresh, in {:.2}s ({})",
        "Generated".green().bold(),
        name,
        result.files_generated,
        result.files_fresh,
        start.elapsed().as_secs_f64(),
        display_path(&project_dir, &result.output_dir).display()
    );
    if result.files_removed > 0 {
        println!(
            "    {} {} stale class(es)",
            "Removed".yellow().bold(),
            result.files_removed
        );
    }

    Ok(())
}

/// Print per-file errors and fail if there were any
pub fn report_errors(result: &BuildResult) -> Result<()> {
    if result.errors.is_empty() {
        return Ok(());
    }

    eprintln!(
        "{} build failed with {} error(s)",
        "error:".red().bold(),
        result.errors.len()
    );
    for error in &result.errors {
        eprintln!("  {} - {}", error.file.display(), error.message);
    }
    anyhow::bail!("Build failed")
}
