//! Theme metadata (`[meta]` table).
//!
//! The five required fields are what installed clients need to list and
//! update a theme; everything else is optional garnish rendered into the
//! metadata block when present.

use super::error::ConfigError;
use super::vars::ThemeVar;
use serde::{Deserialize, Serialize};

/// Required metadata field names, in render order.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "author", "version", "description", "source"];

/// Theme metadata rendered into the `/** ... */` header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub name: String,
    pub author: String,
    pub version: String,
    pub description: String,
    /// The open-source location of the theme files.
    pub source: String,

    pub invite: Option<String>,
    pub donate: Option<String>,
    pub patreon: Option<String>,
    pub website: Option<String>,
    pub author_id: Option<String>,

    /// Theme-setting variable declarations.
    pub vars: Vec<ThemeVar>,
}

impl Meta {
    /// Names of required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("author", &self.author),
            ("version", &self.version),
            ("description", &self.description),
            ("source", &self.source),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    /// Validate required fields and variable declarations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::MissingMetaFields { fields: missing });
        }

        for var in &self.vars {
            if let ThemeVar::Select { name, options, .. } = var {
                let defaults = options.iter().filter(|o| o.default).count();
                if defaults != 1 {
                    return Err(ConfigError::Validation(format!(
                        "select variable `{name}` must have exactly one default option (found {defaults})"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Populated (key, value) pairs in render order.
    ///
    /// Keys use the client's casing (`authorId`), not the TOML field name.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs: Vec<(&'static str, &str)> = vec![
            ("name", &self.name),
            ("author", &self.author),
            ("version", &self.version),
            ("description", &self.description),
            ("source", &self.source),
        ];

        let optional: [(&'static str, &Option<String>); 5] = [
            ("invite", &self.invite),
            ("donate", &self.donate),
            ("patreon", &self.patreon),
            ("website", &self.website),
            ("authorId", &self.author_id),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                pairs.push((key, value));
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_meta() -> Meta {
        Meta {
            name: "CoolTheme".into(),
            author: "Tester".into(),
            version: "1.0.0".into(),
            description: "A cool theme".into(),
            source: "https://github.com/tester/cool-theme".into(),
            ..Meta::default()
        }
    }

    #[test]
    fn test_missing_fields_none() {
        assert!(full_meta().missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_lists_exactly_the_absent_ones() {
        let mut meta = full_meta();
        meta.version = String::new();
        assert_eq!(meta.missing_fields(), vec!["version"]);

        meta.source = "  ".into();
        assert_eq!(meta.missing_fields(), vec!["version", "source"]);
    }

    #[test]
    fn test_pairs_skips_unset_optionals() {
        let mut meta = full_meta();
        let keys: Vec<_> = meta.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, REQUIRED_FIELDS.to_vec());

        meta.website = Some("https://example.com".into());
        meta.author_id = Some("1234567890".into());
        let keys: Vec<_> = meta.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "author",
                "version",
                "description",
                "source",
                "website",
                "authorId"
            ]
        );
    }

    #[test]
    fn test_validate_select_defaults() {
        use super::super::vars::SelectOption;

        let mut meta = full_meta();
        meta.vars.push(ThemeVar::Select {
            name: "font".into(),
            label: "Font".into(),
            hint: None,
            options: vec![
                SelectOption {
                    label: "Inter".into(),
                    value: "'Inter'".into(),
                    default: false,
                },
                SelectOption {
                    label: "System".into(),
                    value: "sans-serif".into(),
                    default: false,
                },
            ],
        });

        // zero defaults rejected
        assert!(meta.validate().is_err());

        // exactly one accepted
        if let Some(ThemeVar::Select { options, .. }) = meta.vars.first_mut() {
            options[0].default = true;
        }
        assert!(meta.validate().is_ok());

        // two rejected
        if let Some(ThemeVar::Select { options, .. }) = meta.vars.first_mut() {
            options[1].default = true;
        }
        assert!(meta.validate().is_err());
    }
}
