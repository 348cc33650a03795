//! Configuration management for `themec.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── descriptor   # target/addon/import shorthand forms + canonical shapes
//! ├── error        # ConfigError
//! ├── meta         # [meta] table and validation
//! ├── vars         # [[meta.vars]] theme-setting variables
//! └── mod.rs       # ThemeConfig (this file)
//! ```
//!
//! The file is deserialized into a raw shape that accepts every shorthand
//! the config format allows, then resolved once into a canonical,
//! absolute-pathed, validated [`ThemeConfig`]. Downstream code never sees
//! a shorthand form.

pub mod descriptor;
pub mod error;
pub mod meta;
pub mod vars;

pub use descriptor::{Addon, DevTarget, Github, Import, ResolvedTarget};
pub use error::ConfigError;
pub use meta::Meta;
pub use vars::{SelectOption, ThemeVar};

use descriptor::{AddonSpec, GithubSection, ImportSpec, TargetSpec};

use crate::log;
use crate::utils::path::{expand_path, normalize_path};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, looked up in the current working directory.
pub const CONFIG_FILE: &str = "themec.toml";

// ============================================================================
// raw configuration (deserialization shape)
// ============================================================================

/// Raw deserialization shape of `themec.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawConfig {
    meta: Option<Meta>,

    /// Overrides `meta.name` for produced file names.
    file_name: Option<String>,

    /// SCSS file compiled into the root-variables section of theme files.
    root: Option<PathBuf>,
    /// Default dev target when `dev` is not configured.
    main: Option<PathBuf>,

    github: GithubSection,
    /// Overrides the generated base `@import` URL.
    base_import: Option<String>,

    dist: Option<TargetSpec>,
    base: Option<TargetSpec>,
    dev: Option<TargetSpec>,

    addons: Vec<AddonSpec>,
    imports: Vec<ImportSpec>,

    betterdiscord: BetterDiscordSection,
    vencord: VencordSection,
}

/// `[betterdiscord]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct BetterDiscordSection {
    theme_folder: Option<PathBuf>,
}

/// `[vencord]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct VencordSection {
    theme_folder: Option<PathBuf>,
    /// Also write the dev artifact to the Vencord themes folder.
    dev: bool,
}

// ============================================================================
// canonical configuration
// ============================================================================

/// Fully resolved configuration, read-only after load.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Absolute path to the loaded config file.
    pub config_path: PathBuf,

    pub meta: Meta,
    /// Base name of produced files (`{file_name}.theme.css`, `{file_name}.css`).
    pub file_name: String,

    /// Root-variables SCSS entry, absolute.
    pub root: Option<PathBuf>,

    pub github: Github,
    pub base_import: Option<String>,

    pub dist: ResolvedTarget,
    pub base: ResolvedTarget,
    pub dev: DevTarget,

    pub addons: Vec<Addon>,
    pub imports: Vec<Import>,

    /// Configured BetterDiscord themes folder, tilde-expanded.
    pub bd_theme_folder: Option<PathBuf>,
    /// Configured Vencord themes folder, tilde-expanded.
    pub vencord_theme_folder: Option<PathBuf>,
    /// Also write the dev artifact to the Vencord themes folder.
    pub vencord_dev: bool,
}

impl ThemeConfig {
    /// Load and resolve configuration from a config file path.
    ///
    /// Fails before any compilation can start: a missing file, malformed
    /// TOML, a missing/incomplete `meta` table and invalid variable
    /// declarations are all load errors. Unknown fields only warn.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (raw, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::warn_unknown_fields(&ignored, path);
        }

        Self::resolve(raw, normalize_path(path))
    }

    /// Parse and resolve configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        Self::resolve(raw, PathBuf::new())
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(RawConfig, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let raw = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((raw, ignored))
    }

    /// Warn about unknown fields without failing the load.
    fn warn_unknown_fields(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Resolve the raw shape into canonical form, validating `meta`.
    fn resolve(raw: RawConfig, config_path: PathBuf) -> Result<Self, ConfigError> {
        let meta = raw.meta.ok_or(ConfigError::MissingMeta)?;
        meta.validate()?;

        let file_name = raw.file_name.unwrap_or_else(|| meta.name.clone());

        let github = Github {
            profile: raw.github.profile.unwrap_or_else(|| meta.author.clone()),
            repo: raw.github.repo.unwrap_or_else(|| meta.name.clone()),
        };

        let dist = raw
            .dist
            .unwrap_or_else(|| TargetSpec::Simple(PathBuf::from("src/dist.scss")))
            .resolve(Path::new("dist"));
        let base = raw
            .base
            .unwrap_or_else(|| TargetSpec::Simple(PathBuf::from("src/base.scss")))
            .resolve(Path::new("dist"));

        let default_dev = raw.main.unwrap_or_else(|| PathBuf::from("src/dev.scss"));
        let dev = DevTarget::from_spec(raw.dev, &default_dev);

        Ok(Self {
            config_path,
            meta,
            file_name,
            root: raw.root.as_deref().map(normalize_path),
            github,
            base_import: raw.base_import,
            dist,
            base,
            dev,
            addons: raw.addons.into_iter().map(AddonSpec::resolve).collect(),
            imports: raw.imports.into_iter().map(ImportSpec::resolve).collect(),
            bd_theme_folder: raw.betterdiscord.theme_folder.as_deref().map(expand_path),
            vencord_theme_folder: raw.vencord.theme_folder.as_deref().map(expand_path),
            vencord_dev: raw.vencord.dev,
        })
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with the minimal required `[meta]` fields.
///
/// `extra` comes first so top-level keys stay top-level; the `[meta]`
/// header afterwards is a plain super-table definition, which TOML allows
/// even when `extra` already declared `[[meta.vars]]`.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> ThemeConfig {
    let content = format!(
        "{extra}\n[meta]\nname = \"Test\"\nauthor = \"Tester\"\nversion = \"1.0.0\"\n\
         description = \"Test theme\"\nsource = \"https://github.com/tester/test\"\n"
    );
    ThemeConfig::from_str(&content).unwrap()
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result = ThemeConfig::from_str("[meta\nname = \"X\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_meta_table() {
        let result = ThemeConfig::from_str("dist = \"src/dist.scss\"");
        assert!(matches!(result, Err(ConfigError::MissingMeta)));
    }

    #[test]
    fn test_missing_meta_version_listed() {
        let result = ThemeConfig::from_str(
            "[meta]\nname = \"X\"\nauthor = \"Y\"\ndescription = \"Z\"\nsource = \"https://s\"",
        );
        match result {
            Err(ConfigError::MissingMetaFields { fields }) => {
                assert_eq!(fields, vec!["version"]);
            }
            other => panic!("expected MissingMetaFields, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.file_name, "Test");
        assert_eq!(config.github.profile, "Tester");
        assert_eq!(config.github.repo, "Test");
        assert!(config.dist.target.ends_with("src/dist.scss"));
        assert!(config.dist.output.ends_with("dist"));
        assert!(config.base.target.ends_with("src/base.scss"));
        assert!(config.dev.target.ends_with("src/dev.scss"));
        assert!(config.dev.extra_output.is_none());
        assert!(config.addons.is_empty());
        assert!(config.imports.is_empty());
        assert!(config.root.is_none());
        assert!(!config.vencord_dev);
    }

    #[test]
    fn test_main_is_the_dev_fallback() {
        let config = test_parse_config("main = \"src/theme.scss\"");
        assert!(config.dev.target.ends_with("src/theme.scss"));

        // an explicit dev descriptor wins over main
        let config = test_parse_config("main = \"src/theme.scss\"\ndev = \"src/dev.scss\"");
        assert!(config.dev.target.ends_with("src/dev.scss"));
    }

    #[test]
    fn test_descriptor_forms() {
        let config = test_parse_config(
            "dist = [\"src/dist/index.scss\", \"out\"]\n\
             base = \"src/base/index.scss\"\n\
             imports = [\n  \"https://example.com/a.css\",\n  { url = \"https://example.com/b.css\", dev = true },\n]\n\
             [[addons]]\ntarget = \"src/addons/_hsl.scss\"\noutput = \"dist/HSL.css\"\ndist = true\n",
        );
        assert!(config.dist.target.ends_with("src/dist/index.scss"));
        assert!(config.dist.output.ends_with("out"));
        assert!(config.base.output.ends_with("dist"));
        assert_eq!(config.imports.len(), 2);
        assert!(!config.imports[0].dev);
        assert!(config.imports[1].dev);
        assert_eq!(config.addons.len(), 1);
        assert!(config.addons[0].dist);
        assert_eq!(config.addons[0].name, "HSL");
    }

    #[test]
    fn test_file_name_override() {
        let config = test_parse_config("file_name = \"Custom\"");
        assert_eq!(config.file_name, "Custom");
        // meta.name untouched
        assert_eq!(config.meta.name, "Test");
    }

    #[test]
    fn test_select_without_default_rejected() {
        let result = ThemeConfig::from_str(
            "[meta]\nname = \"X\"\nauthor = \"Y\"\nversion = \"1\"\ndescription = \"Z\"\nsource = \"https://s\"\n\
             [[meta.vars]]\ntype = \"select\"\nname = \"font\"\nlabel = \"Font\"\n\
             options = [{ label = \"A\", value = \"a\" }]\n",
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[meta]\nname = \"X\"\nauthor = \"Y\"\nversion = \"1\"\n\
                       description = \"Z\"\nsource = \"https://s\"\n[unknown_section]\nfield = \"value\"";
        let (_, ignored) = ThemeConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[meta]\nname = \"X\"\nauthor = \"Y\"\nversion = \"1\"\n\
                       description = \"Z\"\nsource = \"https://s\"\nfile_name = \"F\"";
        let (_, ignored) = ThemeConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }
}
