use anyhow::Result;
use colored::Colorize;
use notify::{Event, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::build_pipeline;
use crate::commands::build::report_errors;
use crate::commands::{detect_target, in_project, Target};
use crate::config::{self, Config};

/// Editors often save in several steps; events this close together are one change
const DEBOUNCE: Duration = Duration::from_millis(150);

pub fn execute(target: &str) -> Result<()> {
    match detect_target(target) {
        Target::Project(manifest_path) => execute_project(&manifest_path),
        Target::SingleFile(file_path) => {
            anyhow::bail!("`watch` works on projects, not single screens ({})", file_path)
        }
    }
}

fn execute_project(manifest_path: &str) -> Result<()> {
    in_project(manifest_path, |config, _| {
        let manifest_file = Path::new(manifest_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(config::MANIFEST_FILE)
            .to_string();

        // 1. Initial build
        match run_build(config) {
            Ok(_) => println!("{}", "   Watching for changes...".green().bold()),
            Err(e) => {
                eprintln!("{} initial build failed: {}", "error:".red().bold(), e);
                eprintln!("Watching anyway (will retry on file changes)...");
            }
        }

        // 2. Set up file watcher
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        })?;

        watcher.watch(Path::new(&config.build.screens_dir), RecursiveMode::Recursive)?;
        watcher.watch(Path::new(&manifest_file), RecursiveMode::NonRecursive)?;

        // 3. Watch loop; ends when the watcher goes away or the process is interrupted
        while let Ok(event) = rx.recv() {
            if !should_rebuild(&event, &manifest_file) {
                continue;
            }

            // Swallow the rest of a burst of events
            while rx.recv_timeout(DEBOUNCE).is_ok() {}

            let changed_file = event
                .paths
                .first()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or("file");
            println!("\nChange detected in {}", changed_file);

            // A manifest edit may move directories or the package, so reload it
            let rebuilt = if changed_file == manifest_file {
                config::load_config(&manifest_file).and_then(|fresh| run_build(&fresh))
            } else {
                run_build(config)
            };

            match rebuilt {
                Ok(_) => println!("   {}", "Finished".green().bold()),
                Err(e) => eprintln!("{} build failed: {}", "error:".red().bold(), e),
            }
        }

        Ok(())
    })
}

fn run_build(config: &Config) -> Result<()> {
    // Incremental: unchanged outputs are left alone
    let result = build_pipeline::execute_build(config, false)?;
    report_errors(&result)
}

fn should_rebuild(event: &Event, manifest_file: &str) -> bool {
    use notify::EventKind::*;

    match event.kind {
        Modify(_) | Create(_) | Remove(_) => event.paths.iter().any(|p| {
            p.extension().map_or(false, |ext| ext == "json")
                || p.file_name().map_or(false, |name| name == manifest_file)
        }),
        _ => false,
    }
}
