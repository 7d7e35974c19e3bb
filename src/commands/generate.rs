//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::Path;
use std::time::Duration;

use crate::generator::Generator;
use crate::Crewpost;

/// Load the catalog and write the static site
pub fn run(crewpost: &Crewpost) -> Result<()> {
    let start = std::time::Instant::now();

    let loaded = crewpost.load_catalog();
    tracing::info!(
        "Loaded {} articles ({} rejected)",
        loaded.catalog.len(),
        loaded.rejected.len()
    );

    if !loaded.rejected.is_empty() {
        for err in &loaded.rejected {
            tracing::error!("{}", err);
        }
        if crewpost.config.strict {
            anyhow::bail!(
                "{} article file(s) rejected; fix them or set `strict: false`",
                loaded.rejected.len()
            );
        }
    }

    let generator = Generator::new(crewpost)?;
    let pages = generator.generate(&loaded.catalog)?;

    let duration = start.elapsed();
    tracing::info!("Generated {} pages in {:.2}s", pages, duration.as_secs_f64());

    Ok(())
}

/// Watch the source directory and config file, regenerating on change.
///
/// `on_regenerate` is called after every successful regeneration. Blocks
/// until the watcher shuts down.
pub fn watch(crewpost: &Crewpost, mut on_regenerate: impl FnMut()) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if crewpost.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&crewpost.source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", crewpost.source_dir);
    }

    let config_path = crewpost.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(&e.path))
                    .collect();

                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits change paths and options, so reload it too
                let current = match Crewpost::new(&crewpost.base_dir) {
                    Ok(current) => current,
                    Err(e) => {
                        tracing::error!("Failed to reload config: {}", e);
                        continue;
                    }
                };

                match run(&current) {
                    Ok(()) => on_regenerate(),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}

/// Editor and VCS noise does not trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}
