//! Target, addon and import descriptors.
//!
//! The config file accepts shorthand forms (a bare string, a
//! `[target, output]` pair) next to full tables. Each shorthand is
//! resolved once at load time into a single canonical shape; everything
//! downstream of the config loader only ever sees the canonical types.

use crate::utils::path::{expand_path, normalize_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Build targets (dist / base / dev)
// ============================================================================

/// Raw form of a build target descriptor.
///
/// `"src/dist.scss"` supplies the target only; `["src/dist.scss", "out"]`
/// supplies target and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSpec {
    Simple(PathBuf),
    Pair(PathBuf, PathBuf),
}

impl TargetSpec {
    /// Resolve into absolute target/output paths.
    ///
    /// Relative paths are resolved against the current working directory;
    /// the bare-string form falls back to the caller's default output.
    pub fn resolve(&self, default_output: &Path) -> ResolvedTarget {
        match self {
            Self::Simple(target) => ResolvedTarget {
                target: normalize_path(target),
                output: normalize_path(default_output),
            },
            Self::Pair(target, output) => ResolvedTarget {
                target: normalize_path(target),
                output: normalize_path(output),
            },
        }
    }
}

/// Canonical (target, output) pair, both absolute.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub target: PathBuf,
    pub output: PathBuf,
}

/// Canonical dev target.
///
/// The dev output is a theme folder discovered at run time, so only an
/// explicitly configured extra destination is kept here.
#[derive(Debug, Clone)]
pub struct DevTarget {
    pub target: PathBuf,
    /// Extra destination from the `["src/dev.scss", "/path"]` pair form.
    pub extra_output: Option<PathBuf>,
}

impl DevTarget {
    pub fn from_spec(spec: Option<TargetSpec>, default_target: &Path) -> Self {
        match spec {
            None => Self {
                target: normalize_path(default_target),
                extra_output: None,
            },
            Some(TargetSpec::Simple(target)) => Self {
                target: normalize_path(&target),
                extra_output: None,
            },
            Some(TargetSpec::Pair(target, output)) => Self {
                target: normalize_path(&target),
                extra_output: Some(expand_path(&output)),
            },
        }
    }
}

// ============================================================================
// Addons
// ============================================================================

/// Raw form of an addon descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddonSpec {
    /// `["src/addons/_hsl.scss", "dist/BottomHSL.css"]`
    Pair(PathBuf, PathBuf),
    /// Full table with flags.
    Detailed {
        target: PathBuf,
        #[serde(default)]
        output: Option<PathBuf>,
        #[serde(default)]
        name: Option<String>,
        /// Add the addon's published import to the dist theme file.
        #[serde(default)]
        dist: bool,
        /// Merge the addon into the dev artifact.
        #[serde(default)]
        dev: bool,
    },
}

impl AddonSpec {
    /// Resolve into the canonical addon shape.
    pub fn resolve(self) -> Addon {
        match self {
            Self::Pair(target, output) => {
                let name = file_stem(&output);
                Addon {
                    target: normalize_path(&target),
                    output: normalize_path(&output),
                    name,
                    dist: false,
                    dev: false,
                }
            }
            Self::Detailed {
                target,
                output,
                name,
                dist,
                dev,
            } => {
                let name = name
                    .or_else(|| output.as_deref().map(file_stem))
                    .unwrap_or_else(|| file_stem(&target));
                let output = output
                    .map(|o| normalize_path(&o))
                    .unwrap_or_else(|| normalize_path(Path::new("dist")).join(format!("{name}.css")));
                Addon {
                    target: normalize_path(&target),
                    output,
                    name,
                    dist,
                    dev,
                }
            }
        }
    }
}

/// Canonical addon: absolute target, absolute output (final segment is the
/// produced file name), display name used for generated imports.
#[derive(Debug, Clone)]
pub struct Addon {
    pub target: PathBuf,
    pub output: PathBuf,
    pub name: String,
    pub dist: bool,
    pub dev: bool,
}

/// Final path segment without extension or a leading underscore.
///
/// SCSS partials are conventionally named `_addon.scss`; the underscore is
/// not part of the addon's name.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .map(|stem| stem.trim_start_matches('_').to_string())
        .unwrap_or_default()
}

// ============================================================================
// External imports
// ============================================================================

/// Raw form of an external stylesheet import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportSpec {
    /// Bare URL, included in dist only.
    Url(String),
    /// Table form; `dev` defaults to true.
    Detailed {
        url: String,
        #[serde(default = "default_true")]
        dev: bool,
    },
}

fn default_true() -> bool {
    true
}

impl ImportSpec {
    pub fn resolve(self) -> Import {
        match self {
            Self::Url(url) => Import { url, dev: false },
            Self::Detailed { url, dev } => Import { url, dev },
        }
    }
}

/// Canonical external import.
#[derive(Debug, Clone)]
pub struct Import {
    pub url: String,
    /// Also include the import in the dev artifact.
    pub dev: bool,
}

// ============================================================================
// GitHub pages location
// ============================================================================

/// Raw `[github]` section; both fields default from `meta`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSection {
    pub profile: Option<String>,
    pub repo: Option<String>,
}

/// Canonical GitHub pages location the published base file is served from.
#[derive(Debug, Clone)]
pub struct Github {
    pub profile: String,
    pub repo: String,
}
