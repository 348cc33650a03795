//! Watch-mode orchestration.
//!
//! Watches the dev source folder (and the config file) and recompiles the
//! dev target into the installed-client theme folders on every change.
//! Events are handled one at a time with no debouncing; a burst of editor
//! saves just produces a few extra rebuilds with last-write-wins on the
//! output file.

use crate::compile::{Mode, assemble, theme_file_name, write_artifact};
use crate::config::ThemeConfig;
use crate::utils::path::expand_path;
use crate::utils::platform::{self, Client};
use crate::{debug, log, logger};
use anyhow::{Context, Result, bail};
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Run the `dev` command until interrupted.
pub fn run_dev(mut config: ThemeConfig, bd_folder: Option<PathBuf>) -> Result<()> {
    let bd_override = bd_folder.map(|path| expand_path(&path));

    let destinations = resolve_destinations(&config, bd_override.as_deref())?;
    for dest in &destinations {
        if !dest.exists() {
            bail!(
                "directory does not exist: {}",
                logger::code(dest.display())
            );
        }
    }

    let watch_dir = config
        .dev
        .target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("src"));
    if !watch_dir.exists() {
        bail!(
            "directory does not exist: {}",
            logger::code(watch_dir.display())
        );
    }

    // Sync channel bridge: notify delivers events from its own thread,
    // the loop below drains them one at a time.
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })
    .context("failed to create file watcher")?;

    watcher
        .watch(&watch_dir, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", watch_dir.display()))?;
    if config.config_path.exists() {
        watcher
            .watch(&config.config_path, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", config.config_path.display()))?;
    }

    log!("watch"; "watching {} for changes...", logger::code(watch_dir.display()));
    for dest in &destinations {
        log!("watch"; "writing to {}", logger::code(dest.display()));
    }

    for result in rx {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                log!("watch"; "notify error: {err}");
                continue;
            }
        };
        if !is_change(&event.kind) {
            continue;
        }

        // A config change reloads before rebuilding; on a broken config the
        // previous one stays active so the loop keeps working.
        if event.paths.iter().any(|path| *path == config.config_path) {
            match ThemeConfig::load(&config.config_path) {
                Ok(reloaded) => {
                    config = reloaded;
                    debug!("watch"; "config reloaded");
                }
                Err(err) => {
                    logger::status_error("config reload failed", &err.to_string());
                    continue;
                }
            }
        }

        // Destinations re-resolve each round: a reload may have toggled
        // vencord.dev or moved a theme folder.
        match resolve_destinations(&config, bd_override.as_deref()) {
            Ok(destinations) => rebuild(&config, &destinations),
            Err(err) => logger::status_error("cannot resolve theme folders", &err.to_string()),
        }
    }

    Ok(())
}

/// Compile the dev target once and write it to every destination.
fn rebuild(config: &ThemeConfig, destinations: &[PathBuf]) {
    let start = Instant::now();

    let contents = match assemble(config, &config.dev.target, Mode::Dev) {
        Ok(contents) => contents,
        Err(err) => {
            logger::status_error("build failed", &err.to_string());
            return;
        }
    };

    let file_name = theme_file_name(config, Mode::Dev);
    let mut written = 0usize;
    for dest in destinations {
        match write_artifact(&file_name, &contents, dest) {
            Ok(_) => written += 1,
            Err(err) => logger::status_error("write failed", &err.to_string()),
        }
    }

    if written > 0 {
        logger::status_success(&format!(
            "built {} in {}ms",
            file_name,
            start.elapsed().as_millis()
        ));
    }
}

/// Resolve the theme folders the dev artifact is written to.
///
/// The BetterDiscord folder comes from the CLI override, then the config,
/// then platform discovery. An explicit dev output pair and the Vencord
/// folder (when `vencord.dev` is set) are added on top.
fn resolve_destinations(config: &ThemeConfig, bd_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    let bd = match (bd_override, &config.bd_theme_folder) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => path.clone(),
        (None, None) => platform::theme_folder(Client::BetterDiscord)?,
    };

    let mut destinations = vec![bd];

    if let Some(extra) = &config.dev.extra_output {
        destinations.push(extra.clone());
    }

    if config.vencord_dev {
        let vencord = match &config.vencord_theme_folder {
            Some(path) => path.clone(),
            None => platform::theme_folder(Client::Vencord)?,
        };
        destinations.push(vencord);
    }

    Ok(destinations)
}

/// File events worth a rebuild; access/metadata noise is skipped.
const fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}
