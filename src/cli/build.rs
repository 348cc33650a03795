//! One-shot build orchestration.
//!
//! Compiles the dist, base and addon targets in sequence. Targets are
//! isolated from each other: a failing target is logged and the remaining
//! targets are still attempted. Write failures never flip the exit code;
//! anything else does.

use crate::compile::{BuildError, Mode, compile};
use crate::config::ThemeConfig;
use crate::log;
use anyhow::{Result, bail};

/// Run the `build` command: dist, base, then every addon.
pub fn run_build(config: &ThemeConfig) -> Result<()> {
    let mut failed = false;

    failed |= report(compile(
        config,
        &config.dist.target,
        &config.dist.output,
        Mode::Dist,
    ));
    failed |= report(compile(
        config,
        &config.base.target,
        &config.base.output,
        Mode::Base,
    ));

    for addon in &config.addons {
        failed |= report(compile(config, &addon.target, &addon.output, Mode::Addon));
    }

    if failed {
        bail!("build finished with errors");
    }
    Ok(())
}

/// Log a per-target error; returns whether it counts as a failure.
fn report(result: Result<(), BuildError>) -> bool {
    match result {
        Ok(()) => false,
        Err(err) => {
            log!("error"; "{err}");
            // write failures are reported but do not fail the build
            !err.is_write()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;

    #[test]
    fn test_build_compiles_all_targets() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("dist.scss"), ".a {\n  color: red;\n}\n").unwrap();
        fs::write(src.join("base.scss"), ".b {\n  color: blue;\n}\n").unwrap();
        fs::write(src.join("_hsl.scss"), ".c {\n  color: green;\n}\n").unwrap();

        let mut config = test_parse_config("");
        config.dist.target = src.join("dist.scss");
        config.dist.output = dir.path().join("dist");
        config.base.target = src.join("base.scss");
        config.base.output = dir.path().join("dist");
        config.addons = vec![crate::config::Addon {
            target: src.join("_hsl.scss"),
            output: dir.path().join("dist").join("HSL.css"),
            name: "HSL".into(),
            dist: false,
            dev: false,
        }];

        run_build(&config).unwrap();

        let dist = dir.path().join("dist");
        assert!(dist.join("Test.theme.css").exists());
        assert!(dist.join("Test.css").exists());
        assert!(dist.join("HSL.css").exists());
    }

    #[test]
    fn test_missing_dist_target_fails_but_siblings_still_build() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("base.scss"), ".b {\n  color: blue;\n}\n").unwrap();

        let mut config = test_parse_config("");
        config.dist.target = src.join("missing.scss");
        config.dist.output = dir.path().join("dist");
        config.base.target = src.join("base.scss");
        config.base.output = dir.path().join("dist");

        assert!(run_build(&config).is_err());
        // the base target was still attempted and written
        assert!(dir.path().join("dist").join("Test.css").exists());
    }
}
