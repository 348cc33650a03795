//! Compile orchestration.
//!
//! One call of [`compile`] takes a (target, output, mode) triple through
//! the whole pipeline: SCSS compilation, vendor prefixing, import
//! extraction, artifact assembly and the disk write. The dev loop uses
//! [`assemble`] directly so one artifact can be written to several theme
//! folders.

pub mod header;
pub mod imports;
pub mod sass;

pub use imports::{SplitCss, split_imports};

use crate::config::ThemeConfig;
use crate::utils::path::strip_spaces;
use crate::{log, logger};
use std::path::{Path, PathBuf};
use std::time::Instant;
use std::{fs, io};
use thiserror::Error;

/// Per-target build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot find the target file `{}`", .0.display())]
    TargetNotFound(PathBuf),

    #[error("sass compilation failed for `{}`: {}", .path.display(), .message)]
    Sass { path: PathBuf, message: String },

    #[error("css post-processing failed: {0}")]
    Css(String),

    #[error("`{name}` has an invalid color default `{value}` (expected hex, rgb() or hsl())")]
    InvalidColorDefault { name: String, value: String },

    #[error("failed to write `{}`", .0.display())]
    Write(PathBuf, #[source] io::Error),
}

impl BuildError {
    /// Write failures are logged but never flip the process exit code.
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write(..))
    }
}

/// What kind of artifact a compilation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// End-user theme file: metadata block + base import + body.
    Dist,
    /// Local theme file written into installed-client theme folders.
    Dev,
    /// Standalone addon stylesheet, named by its output path.
    Addon,
    /// The published base stylesheet the dist file imports.
    Base,
}

impl Mode {
    /// Theme-producing modes carry the metadata block.
    pub const fn is_theme(self) -> bool {
        matches!(self, Self::Dist | Self::Dev)
    }
}

/// Compile one target and write the artifact to `output`.
pub fn compile(
    config: &ThemeConfig,
    target: &Path,
    output: &Path,
    mode: Mode,
) -> Result<(), BuildError> {
    let start = Instant::now();
    log!("build"; "building {} file...", logger::code(target.display()));

    let contents = assemble(config, target, mode)?;
    let (dir, css_segment) = output_parts(output, mode);
    let file_name = artifact_name(config, mode, css_segment, output)?;
    write_artifact(&file_name, &contents, &dir)?;

    log!(
        "success";
        "built {} in {}ms",
        logger::code(&file_name),
        start.elapsed().as_millis()
    );
    Ok(())
}

/// Assemble the artifact contents for one target.
///
/// Theme modes produce metadata + imports + root variables + body; `Base`
/// and `Addon` produce the stylesheet itself with its imports lifted back
/// on top.
pub fn assemble(config: &ThemeConfig, target: &Path, mode: Mode) -> Result<String, BuildError> {
    let prefixed = compile_prefixed(target)?;
    let SplitCss {
        css: mut body,
        mut imports,
    } = split_imports(&prefixed);

    match mode {
        Mode::Dist => {
            for import in &config.imports {
                imports.push(format!("@import url('{}');", import.url));
            }
            // addons published next to the theme get their import generated
            for addon in config.addons.iter().filter(|a| a.dist) {
                imports.push(header::import_line(&config.github, &addon.name));
            }
        }
        Mode::Dev => {
            for import in config.imports.iter().filter(|i| i.dev) {
                imports.push(format!(
                    "@import url('{}');",
                    import.url.to_lowercase().replace(' ', "")
                ));
            }
            // dev-flagged addons are merged straight into the artifact
            for addon in config.addons.iter().filter(|a| a.dev) {
                let split = split_imports(&compile_prefixed(&addon.target)?);
                imports.extend(split.imports);
                body.push('\n');
                body.push_str(&split.css);
            }
        }
        Mode::Addon | Mode::Base => {}
    }

    let root_css = match &config.root {
        Some(root) if mode.is_theme() => Some(compile_prefixed(root)?),
        _ => None,
    };

    let mut file = String::new();
    if mode.is_theme() {
        file.push_str(&header::render_meta(&config.meta)?);
    }
    if mode == Mode::Dist {
        file.push_str(&header::base_import_line(config));
        file.push_str("\n\n");
    }
    if !imports.is_empty() {
        file.push_str(&imports.join("\n"));
        file.push_str("\n\n");
    }
    if let Some(root_css) = root_css {
        file.push_str(root_css.trim_end());
        file.push_str("\n\n");
    }
    file.push_str(&body);
    if !file.ends_with('\n') {
        file.push('\n');
    }

    Ok(file)
}

/// Produced file name for a theme mode (spaces stripped at write time).
pub fn theme_file_name(config: &ThemeConfig, mode: Mode) -> String {
    if mode.is_theme() {
        format!("{}.theme.css", config.file_name)
    } else {
        format!("{}.css", config.file_name)
    }
}

/// Write an artifact into `dir`, creating the directory tree as needed.
///
/// Spaces are stripped from the file name; installed clients key themes by
/// file name and a space would fork the identity.
pub fn write_artifact(file_name: &str, contents: &str, dir: &Path) -> Result<PathBuf, BuildError> {
    fs::create_dir_all(dir).map_err(|err| BuildError::Write(dir.to_path_buf(), err))?;

    let path = dir.join(strip_spaces(file_name));
    fs::write(&path, contents).map_err(|err| BuildError::Write(path.clone(), err))?;
    Ok(path)
}

/// Compile + prefix one SCSS file, checking existence first.
fn compile_prefixed(path: &Path) -> Result<String, BuildError> {
    if !path.exists() {
        return Err(BuildError::TargetNotFound(path.to_path_buf()));
    }
    let css = sass::compile_file(path)?;
    sass::autoprefix(&css)
}

/// Split an output path into (directory, trailing `*.css` segment).
///
/// For addon outputs a non-`.css` final segment is still the file name
/// (the caller names addon files verbatim); for theme outputs it is part
/// of the directory.
fn output_parts(output: &Path, mode: Mode) -> (PathBuf, Option<String>) {
    let segment = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    match segment {
        Some(name) if name.ends_with(".css") => (
            output.parent().unwrap_or_else(|| Path::new("")).to_path_buf(),
            Some(name),
        ),
        Some(name) if mode == Mode::Addon => (output.to_path_buf(), Some(name)),
        _ => (output.to_path_buf(), None),
    }
}

/// Resolve the artifact file name for a mode.
fn artifact_name(
    config: &ThemeConfig,
    mode: Mode,
    css_segment: Option<String>,
    output: &Path,
) -> Result<String, BuildError> {
    match mode {
        Mode::Dist | Mode::Dev | Mode::Base => Ok(theme_file_name(config, mode)),
        // addon files are named by the caller, verbatim
        Mode::Addon => css_segment.ok_or_else(|| {
            BuildError::Write(
                output.to_path_buf(),
                io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    /// Minimal project layout: returns (tempdir, config) with the dist
    /// target pointing at a real SCSS file.
    fn project() -> (TempDir, ThemeConfig) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("dist.scss"), ".btn {\n  color: red;\n}\n").unwrap();

        let mut config = test_parse_config("");
        config.dist.target = src.join("dist.scss");
        config.dist.output = dir.path().join("dist");
        (dir, config)
    }

    #[test]
    fn test_dist_compile_writes_theme_file() {
        let (dir, config) = project();
        compile(&config, &config.dist.target, &config.dist.output, Mode::Dist).unwrap();

        let theme = fs::read_to_string(dir.path().join("dist").join("Test.theme.css")).unwrap();
        assert!(theme.starts_with("/**\n"));
        assert!(theme.contains(" * @name Test\n"));
        assert!(theme.contains("@import url('https://tester.github.io/Test/Test.css');"));
        assert!(theme.contains(".btn"));
    }

    #[test]
    fn test_base_compile_has_no_header() {
        let (dir, config) = project();
        compile(&config, &config.dist.target, &config.dist.output, Mode::Base).unwrap();

        let base = fs::read_to_string(dir.path().join("dist").join("Test.css")).unwrap();
        assert!(!base.contains("@name"));
        assert!(base.contains(".btn"));
    }

    #[test]
    fn test_missing_target_does_not_create_output_dir() {
        let (dir, config) = project();
        let missing = dir.path().join("src").join("nope.scss");
        let output = dir.path().join("never");

        let result = compile(&config, &missing, &output, Mode::Dist);
        assert!(matches!(result, Err(BuildError::TargetNotFound(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_addon_name_taken_verbatim_from_output() {
        let (dir, mut config) = project();
        config.file_name = "Ignored".into();
        let output = dir.path().join("dist").join("BottomHSL.css");

        compile(&config, &config.dist.target.clone(), &output, Mode::Addon).unwrap();
        let addon = fs::read_to_string(dir.path().join("dist").join("BottomHSL.css")).unwrap();
        // no metadata, no .theme suffix
        assert!(!addon.contains("@name"));
    }

    #[test]
    fn test_spaces_stripped_from_file_name() {
        let (dir, mut config) = project();
        config.file_name = "Cool Theme".into();

        compile(&config, &config.dist.target.clone(), &config.dist.output.clone(), Mode::Dist)
            .unwrap();
        assert!(dir.path().join("dist").join("CoolTheme.theme.css").exists());
    }

    #[test]
    fn test_sibling_addon_written_after_first_fails() {
        let (dir, config) = project();
        let missing = dir.path().join("src").join("missing.scss");
        let first_out = dir.path().join("dist").join("First.css");
        let second_out = dir.path().join("dist").join("Second.css");

        assert!(compile(&config, &missing, &first_out, Mode::Addon).is_err());
        compile(&config, &config.dist.target.clone(), &second_out, Mode::Addon).unwrap();
        assert!(second_out.exists());
        assert!(!first_out.exists());
    }

    #[test]
    fn test_dev_assembly_includes_dev_imports_lowercased() {
        let (_dir, mut config) = project();
        config.imports = vec![
            crate::config::Import {
                url: "https://example.com/Skip Me.css".into(),
                dev: false,
            },
            crate::config::Import {
                url: "https://example.com/Dev Only.css".into(),
                dev: true,
            },
        ];

        let contents = assemble(&config, &config.dist.target.clone(), Mode::Dev).unwrap();
        assert!(contents.contains("@import url('https://example.com/devonly.css');"));
        assert!(!contents.contains("Skip Me"));
    }

    #[test]
    fn test_dev_assembly_merges_dev_addons() {
        let (dir, mut config) = project();
        let addon_src = dir.path().join("src").join("_glow.scss");
        fs::write(&addon_src, ".glow {\n  filter: blur(2px);\n}\n").unwrap();
        config.addons = vec![crate::config::Addon {
            target: addon_src,
            output: dir.path().join("dist").join("glow.css"),
            name: "glow".into(),
            dist: false,
            dev: true,
        }];

        let contents = assemble(&config, &config.dist.target.clone(), Mode::Dev).unwrap();
        assert!(contents.contains(".glow"));
        // main body still present
        assert!(contents.contains(".btn"));
    }

    #[test]
    fn test_dist_assembly_generates_addon_imports() {
        let (dir, mut config) = project();
        config.addons = vec![crate::config::Addon {
            target: dir.path().join("src").join("dist.scss"),
            output: dir.path().join("dist").join("BottomHSL.css"),
            name: "BottomHSL".into(),
            dist: true,
            dev: false,
        }];

        let contents = assemble(&config, &config.dist.target.clone(), Mode::Dist).unwrap();
        assert!(contents.contains("@import url('https://tester.github.io/Test/BottomHSL.css');"));
    }

    #[test]
    fn test_root_variables_rendered_between_imports_and_body() {
        let (dir, mut config) = project();
        let root = dir.path().join("src").join("root.scss");
        fs::write(&root, ":root {\n  --accent: #5865f2;\n}\n").unwrap();
        config.root = Some(root);

        let contents = assemble(&config, &config.dist.target.clone(), Mode::Dev).unwrap();
        let root_pos = contents.find("--accent").unwrap();
        let body_pos = contents.find(".btn").unwrap();
        assert!(root_pos < body_pos);
    }
}
