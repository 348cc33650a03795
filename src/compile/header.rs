//! Metadata block and `@import` URL generation.
//!
//! The metadata block is the `/** ... */` comment installed clients parse
//! to list, credit and update a theme. Theme-setting variables render as
//! `@var` lines with a type-specific encoding.

use super::BuildError;
use crate::config::{Github, Meta, ThemeConfig, ThemeVar};
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

/// Recognized CSS color tokens for `color` variable defaults.
static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|(?:rgb|rgba|hsl|hsla)\(.+\))$",
    )
    .expect("color token pattern is valid")
});

/// Render the metadata comment block.
///
/// One `@{key}` line per populated meta field (render order is fixed by
/// [`Meta::pairs`]), then one `@var` line per theme-setting variable.
pub fn render_meta(meta: &Meta) -> Result<String, BuildError> {
    let mut block = String::from("/**\n");

    for (key, value) in meta.pairs() {
        let _ = writeln!(block, " * @{key} {value}");
    }
    for var in &meta.vars {
        let _ = writeln!(block, " * @var {}", render_var(var)?);
    }

    block.push_str("*/\n\n");
    Ok(block)
}

/// Encode one variable declaration.
fn render_var(var: &ThemeVar) -> Result<String, BuildError> {
    Ok(match var {
        ThemeVar::Text {
            name,
            label,
            hint,
            default,
        } => format!("text {name} {} {default}", quote_label(label, hint)),

        ThemeVar::Color {
            name,
            label,
            hint,
            default,
        } => {
            if !COLOR_TOKEN.is_match(default.trim()) {
                return Err(BuildError::InvalidColorDefault {
                    name: name.clone(),
                    value: default.clone(),
                });
            }
            format!("color {name} {} {default}", quote_label(label, hint))
        }

        ThemeVar::Checkbox {
            name,
            label,
            hint,
            default,
        } => format!(
            "checkbox {name} {} {}",
            quote_label(label, hint),
            u8::from(*default)
        ),

        ThemeVar::Number {
            name,
            label,
            hint,
            default,
            min,
            max,
            step,
            units,
        } => format!(
            "number {name} {} {}",
            quote_label(label, hint),
            numeric_payload(*default, *min, *max, *step, units.as_deref())
        ),

        ThemeVar::Range {
            name,
            label,
            hint,
            default,
            min,
            max,
            step,
            units,
        } => format!(
            "range {name} {} {}",
            quote_label(label, hint),
            numeric_payload(*default, *min, *max, *step, units.as_deref())
        ),

        ThemeVar::Select {
            name,
            label,
            hint,
            options,
        } => {
            let entries: Vec<String> = options
                .iter()
                .map(|option| {
                    let star = if option.default { "*" } else { "" };
                    format!("\"{}{}\": \"{}\"", option.label, star, option.value)
                })
                .collect();
            format!(
                "select {name} {} {{ {} }}",
                quote_label(label, hint),
                entries.join(", ")
            )
        }
    })
}

/// `"label"` or `"label:hint"`.
fn quote_label(label: &str, hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!("\"{label}:{hint}\""),
        None => format!("\"{label}\""),
    }
}

/// `[default, min, max, step]`, with `, "units"` appended when set.
fn numeric_payload(default: f64, min: f64, max: f64, step: f64, units: Option<&str>) -> String {
    match units {
        Some(units) => format!("[{default}, {min}, {max}, {step}, \"{units}\"]"),
        None => format!("[{default}, {min}, {max}, {step}]"),
    }
}

// ============================================================================
// Import URLs
// ============================================================================

/// Build the published `@import` line for a file on GitHub pages.
///
/// The profile is lower-cased and space-stripped (GitHub pages hostnames
/// are case-insensitive but the convention is lowercase); repo and file
/// names only have spaces stripped.
pub fn import_line(github: &Github, file_name: &str) -> String {
    let profile = github.profile.to_lowercase().replace(' ', "");
    let repo = github.repo.replace(' ', "");
    let file = file_name.replace(' ', "");
    format!("@import url('https://{profile}.github.io/{repo}/{file}.css');")
}

/// The base-import line of a dist theme file.
///
/// `base_import` in the config overrides the generated GitHub pages URL.
pub fn base_import_line(config: &ThemeConfig) -> String {
    match &config.base_import {
        Some(url) => format!("@import url('{url}');"),
        None => import_line(&config.github, &config.file_name),
    }
}
