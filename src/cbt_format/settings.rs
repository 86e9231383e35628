//! # Format Settings
//!
//! The format file tells the engine how to decode the values of each column.
//! It is YAML with three levels of settings, most specific first:
//!
//! 1. **Column**: `families.<family>.columns.<qualifier>` (or top-level
//!    `columns.<qualifier>` for families the file does not mention)
//! 2. **Family**: `families.<family>.default_encoding` / `default_type`
//! 3. **Global**: `default_encoding` / `default_type`
//!
//! An empty or missing value inherits from the level above (see
//! [`override_with`]).
//!
//! ```yaml
//! default_encoding: hex
//! protocol_buffer_definitions: [addressbook.proto]
//! protocol_buffer_paths: [protos]
//! columns:
//!   person: { encoding: proto, type: tutorial.Person }
//! families:
//!   counters:
//!     default_encoding: BigEndian
//!     default_type: int64
//!     columns:
//!       ratio: { type: float64 }
//! ```
//!
//! Parsing is strict: unknown keys at any level are rejected so typos show up
//! instead of silently falling back to defaults.

use crate::error::{FormatError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnFormat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub encoding: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub type_name: String,
}

impl ColumnFormat {
    pub fn new(encoding: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
            type_name: type_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyFormat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_encoding: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: IndexMap<String, ColumnFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol_buffer_definitions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol_buffer_paths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_encoding: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: IndexMap<String, ColumnFormat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub families: IndexMap<String, FamilyFormat>,
}

impl FormatSettings {
    /// Reads settings from the YAML file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FormatError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings = Self::from_yaml(&content).map_err(|e| FormatError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            path = %path.display(),
            columns = settings.columns.len(),
            families = settings.families.len(),
            "parsed format file"
        );
        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// An explicit null (`~`, `null` or no value at all) reads the same as a
/// missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returns `value` unless it is empty, in which case `base` is inherited.
pub fn override_with<'a>(base: &'a str, value: &'a str) -> &'a str {
    if value.is_empty() {
        base
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{testdata, TestEnv};

    #[test]
    fn test_override_with() {
        assert_eq!(override_with("hex", ""), "hex");
        assert_eq!(override_with("hex", "json"), "json");
        assert_eq!(override_with("", ""), "");
    }

    #[test]
    fn test_load_full_settings() {
        let settings = FormatSettings::load(testdata("settings.yml")).unwrap();

        assert_eq!(settings.default_encoding, "HEX");
        assert_eq!(settings.default_type, "");
        assert_eq!(
            settings.protocol_buffer_definitions,
            vec!["MyProto.proto", "MyOtherProto.proto"]
        );
        assert_eq!(
            settings.protocol_buffer_paths,
            vec!["mycode/stuff", "/home/user/dev/othercode/"]
        );
        assert_eq!(settings.columns["col3"], ColumnFormat::new("P", "person"));
        assert_eq!(settings.columns["col4"], ColumnFormat::new("P", "hobby"));

        let family1 = &settings.families["family1"];
        assert_eq!(family1.default_encoding, "BigEndian");
        assert_eq!(family1.default_type, "INT64");
        assert_eq!(
            family1.columns["address"],
            ColumnFormat::new("PROTO", "tutorial.Person")
        );

        let family2 = &settings.families["family2"];
        assert_eq!(family2.default_encoding, "");
        assert_eq!(family2.columns["col1"], ColumnFormat::new("B", "INT32"));
        assert_eq!(family2.columns["col2"], ColumnFormat::new("L", "INT16"));

        assert_eq!(
            settings.families["family3"].columns["proto_col"],
            ColumnFormat::new("PROTO", "MyProtoMessageType")
        );
    }

    #[test]
    fn test_document_order_is_kept() {
        let settings = FormatSettings::load(testdata("settings.yml")).unwrap();
        let families: Vec<&str> = settings.families.keys().map(String::as_str).collect();
        assert_eq!(families, vec!["family1", "family2", "family3"]);
        let columns: Vec<&str> = settings.families["family2"]
            .columns
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(columns, vec!["col1", "col2", "address"]);
    }

    #[test]
    fn test_null_values_are_empty() {
        let settings = FormatSettings::from_yaml(
            "default_encoding: ~\n\
             default_type:\n\
             protocol_buffer_definitions: null\n\
             columns:\n  \
             c1:\n    \
             encoding: hex\n    \
             type: ~\n\
             families:\n  \
             f1:\n    \
             default_encoding: null\n    \
             columns: ~\n",
        )
        .unwrap();
        assert_eq!(settings.default_encoding, "");
        assert_eq!(settings.default_type, "");
        assert!(settings.protocol_buffer_definitions.is_empty());
        assert_eq!(settings.columns["c1"], ColumnFormat::new("hex", ""));
        assert_eq!(settings.families["f1"], FamilyFormat::default());
    }

    #[test]
    fn test_unknown_top_level_key() {
        let err = FormatSettings::load(testdata("unknown_key.yml")).unwrap_err();
        assert!(matches!(err, FormatError::ConfigParse { .. }));
        assert!(err.to_string().contains("colums"));
    }

    #[test]
    fn test_unknown_nested_key() {
        let env = TestEnv::new();
        let path = env.format_file(
            "nested.yml",
            "families:\n  f1:\n    default_encodin: hex\n",
        );
        assert!(matches!(
            FormatSettings::load(path),
            Err(FormatError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let env = TestEnv::new();
        let err = FormatSettings::load(env.root.join("absent.yml")).unwrap_err();
        match err {
            FormatError::ConfigParse { path, .. } => assert!(path.ends_with("absent.yml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file_is_default() {
        let env = TestEnv::new();
        let path = env.format_file("empty.yml", "\n");
        assert_eq!(FormatSettings::load(path).unwrap(), FormatSettings::default());
    }

    #[test]
    fn test_inline_yaml() {
        let settings = FormatSettings::from_yaml(
            "default_encoding: B\ndefault_type: int16\ncolumns:\n  c1: {encoding: hex}\n",
        )
        .unwrap();
        assert_eq!(settings.default_encoding, "B");
        assert_eq!(settings.columns["c1"], ColumnFormat::new("hex", ""));
    }
}
