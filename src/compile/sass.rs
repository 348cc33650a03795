//! SCSS compilation and vendor prefixing.
//!
//! `grass` (a pure Rust implementation of dart-sass) compiles the entry
//! file; `lightningcss` re-prints the result against explicit browser
//! targets, adding vendor prefixes where the targets require them. The
//! consuming clients are Electron builds, so the target list centers on
//! Chromium with Safari/Firefox kept for users who preview in a browser.

use super::BuildError;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use std::path::Path;

/// Compile an SCSS entry file to expanded CSS.
///
/// The charset directive grass emits for non-ASCII output is stripped:
/// theme files start with the metadata block, never `@charset`.
pub fn compile_file(path: &Path) -> Result<String, BuildError> {
    let load_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let options = grass::Options::default()
        .style(grass::OutputStyle::Expanded)
        .load_paths(&[load_dir, Path::new(".")]);

    let css = grass::from_path(path, &options).map_err(|err| BuildError::Sass {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(strip_charset(&css).to_string())
}

/// Remove a leading `@charset "UTF-8";` directive.
fn strip_charset(css: &str) -> &str {
    css.strip_prefix("@charset \"UTF-8\";\n")
        .or_else(|| css.strip_prefix("@charset \"UTF-8\";"))
        .unwrap_or(css)
}

/// Re-print CSS with vendor prefixes for the configured browser targets.
pub fn autoprefix(css: &str) -> Result<String, BuildError> {
    let stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|err| BuildError::Css(err.to_string()))?;

    let targets = Targets {
        browsers: Some(browser_targets()),
        ..Targets::default()
    };
    let result = stylesheet
        .to_css(PrinterOptions {
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|err| BuildError::Css(err.to_string()))?;

    Ok(result.code)
}

/// Browser versions prefixes are generated for.
///
/// Versions are encoded as `major << 16 | minor << 8 | patch`.
fn browser_targets() -> Browsers {
    Browsers {
        chrome: Some(108 << 16),
        edge: Some(108 << 16),
        firefox: Some(115 << 16),
        safari: Some((15 << 16) | (6 << 8)),
        ios_saf: Some((15 << 16) | (6 << 8)),
        ..Browsers::default()
    }
}
