//! Theme-setting variable declarations.
//!
//! Installed clients expose these as user-tweakable settings; each variable
//! becomes one `@var` line in the generated metadata block. Declared as
//! `[[meta.vars]]` tables with a `type` tag:
//!
//! ```toml
//! [[meta.vars]]
//! type = "color"
//! name = "accent"
//! label = "Accent colour"
//! default = "#5865f2"
//!
//! [[meta.vars]]
//! type = "select"
//! name = "font"
//! label = "Font"
//! options = [
//!     { label = "Inter", value = "'Inter'", default = true },
//!     { label = "System", value = "sans-serif" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// One user-facing theme setting.
///
/// Never mutated after load; rendering happens in `compile::header`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ThemeVar {
    Text {
        name: String,
        label: String,
        #[serde(default)]
        hint: Option<String>,
        default: String,
    },
    Color {
        name: String,
        label: String,
        #[serde(default)]
        hint: Option<String>,
        default: String,
    },
    Checkbox {
        name: String,
        label: String,
        #[serde(default)]
        hint: Option<String>,
        default: bool,
    },
    Number {
        name: String,
        label: String,
        #[serde(default)]
        hint: Option<String>,
        default: f64,
        min: f64,
        max: f64,
        step: f64,
        #[serde(default)]
        units: Option<String>,
    },
    Range {
        name: String,
        label: String,
        #[serde(default)]
        hint: Option<String>,
        default: f64,
        min: f64,
        max: f64,
        step: f64,
        #[serde(default)]
        units: Option<String>,
    },
    Select {
        name: String,
        label: String,
        #[serde(default)]
        hint: Option<String>,
        options: Vec<SelectOption>,
    },
}

impl ThemeVar {
    /// Variable name as referenced from SCSS.
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. }
            | Self::Color { name, .. }
            | Self::Checkbox { name, .. }
            | Self::Number { name, .. }
            | Self::Range { name, .. }
            | Self::Select { name, .. } => name,
        }
    }
}

/// One entry of a `select` variable's option list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    /// Marks the option preselected in the client settings UI.
    #[serde(default)]
    pub default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_deserialization() {
        let var: ThemeVar = toml::from_str(
            "type = \"color\"\nname = \"accent\"\nlabel = \"Accent\"\ndefault = \"#fff\"",
        )
        .unwrap();
        assert!(matches!(var, ThemeVar::Color { .. }));
        assert_eq!(var.name(), "accent");
    }

    #[test]
    fn test_numeric_var_units_optional() {
        let var: ThemeVar = toml::from_str(
            "type = \"range\"\nname = \"radius\"\nlabel = \"Radius\"\ndefault = 8.0\nmin = 0.0\nmax = 24.0\nstep = 1.0",
        )
        .unwrap();
        match var {
            ThemeVar::Range { units, .. } => assert!(units.is_none()),
            other => panic!("expected range, got {other:?}"),
        }
    }

    #[test]
    fn test_select_options() {
        let var: ThemeVar = toml::from_str(
            "type = \"select\"\nname = \"font\"\nlabel = \"Font\"\noptions = [\n  { label = \"Inter\", value = \"'Inter'\", default = true },\n  { label = \"System\", value = \"sans-serif\" },\n]",
        )
        .unwrap();
        match var {
            ThemeVar::Select { options, .. } => {
                assert_eq!(options.len(), 2);
                assert!(options[0].default);
                assert!(!options[1].default);
            }
            other => panic!("expected select, got {other:?}"),
        }
    }
}
