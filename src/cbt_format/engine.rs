//! # Formatting Engine
//!
//! [`ValueFormatting`] owns everything needed to turn cell values into text:
//! the parsed settings, the protobuf message types, and a cache holding one
//! [`ValueFormatter`] per `(family, qualifier)` pair.
//!
//! ## Lifecycle
//!
//! 1. **Setup** ([`ValueFormatting::setup`] or [`ValueFormatting::from_settings`]):
//!    parse the format file, compile protobuf definitions, validate every
//!    declared column. All I/O happens here.
//! 2. **Formatting** ([`ValueFormatting::format`]): per cell, look up or build
//!    the column's formatter and apply it. No I/O.
//!
//! Settings and message types never change after setup. The cache only
//! grows: the first formatter stored for a column is the one used for the
//! rest of the engine's life. Errors are never cached, so a bad value does
//! not affect later cells of the same column.
//!
//! The engine is `Send + Sync`; concurrent callers may race to build the
//! same formatter, in which case both build identical values and one wins.

use crate::encoding::{BinaryType, ByteOrder, Encoding};
use crate::error::{FormatError, Result};
use crate::formatters::ValueFormatter;
use crate::resolve::{self, ResolvedFormat};
use crate::schema::MessageTypes;
use crate::settings::FormatSettings;
use dashmap::DashMap;
use std::path::Path;
use tracing::{debug, trace};

type ColumnKey = (String, String);

#[derive(Debug, Default)]
pub struct ValueFormatting {
    settings: FormatSettings,
    message_types: MessageTypes,
    formatters: DashMap<ColumnKey, ValueFormatter>,
}

impl ValueFormatting {
    /// Builds an engine from the format file at `path`, or from empty
    /// settings when no path (or an empty one) is given.
    pub fn setup(path: Option<&Path>) -> Result<Self> {
        let settings = match path.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => FormatSettings::load(path)?,
            None => FormatSettings::default(),
        };
        Self::from_settings(settings)
    }

    /// Loads the protobuf definitions named in `settings` and validates every
    /// declared column.
    pub fn from_settings(settings: FormatSettings) -> Result<Self> {
        let message_types = MessageTypes::load(
            &settings.protocol_buffer_definitions,
            &settings.protocol_buffer_paths,
        )?;
        resolve::validate_columns(&settings, &message_types)?;
        debug!(
            message_types = message_types.len(),
            "value formatting ready"
        );
        Ok(Self {
            settings,
            message_types,
            formatters: DashMap::new(),
        })
    }

    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    pub fn message_types(&self) -> &MessageTypes {
        &self.message_types
    }

    /// Formats `value` stored in `column` (`family:qualifier`).
    ///
    /// Every line of the output is prefixed with `indent` and the result ends
    /// with exactly one newline.
    pub fn format(&self, indent: &str, family: &str, column: &str, value: &[u8]) -> Result<String> {
        let qualifier = split_column(family, column)?;
        let formatter = self.formatter(family, qualifier)?;
        let text = formatter
            .format(value)
            .map_err(|e| FormatError::decode(column, e))?;
        Ok(indent_block(indent, &text))
    }

    /// Returns the cached formatter for `family:qualifier`, building and
    /// caching it on first use.
    pub fn formatter(&self, family: &str, qualifier: &str) -> Result<ValueFormatter> {
        let key = (family.to_string(), qualifier.to_string());
        if let Some(cached) = self.formatters.get(&key) {
            trace!(family, qualifier, "formatter cache hit");
            return Ok(cached.clone());
        }

        let resolved = resolve::resolve(&self.settings, &self.message_types, family, qualifier)?;
        let built = self.build(&resolved)?;
        debug!(family, qualifier, formatter = %built.label(), "built value formatter");

        let stored = self.formatters.entry(key).or_insert(built);
        Ok(stored.value().clone())
    }

    /// Number of columns with a cached formatter.
    pub fn cached_formatters(&self) -> usize {
        self.formatters.len()
    }

    fn build(&self, resolved: &ResolvedFormat) -> Result<ValueFormatter> {
        let formatter = match resolved.encoding {
            Encoding::BigEndian => ValueFormatter::Binary {
                order: ByteOrder::Big,
                ty: BinaryType::parse(&resolved.type_name)?,
            },
            Encoding::LittleEndian => ValueFormatter::Binary {
                order: ByteOrder::Little,
                ty: BinaryType::parse(&resolved.type_name)?,
            },
            Encoding::ProtocolBuffer => {
                let descriptor = self
                    .message_types
                    .get(&resolved.type_name)
                    .cloned()
                    .ok_or_else(|| FormatError::InvalidTypeForEncoding {
                        type_name: resolved.type_name.clone(),
                        encoding: "ProtocolBuffer".to_string(),
                    })?;
                ValueFormatter::Protobuf(descriptor)
            }
            Encoding::Hex => ValueFormatter::Hex,
            Encoding::Json => ValueFormatter::Json,
            Encoding::None => ValueFormatter::Raw,
        };
        Ok(formatter)
    }
}

/// Splits `family:qualifier` and checks the family matches.
fn split_column<'a>(family: &str, column: &'a str) -> Result<&'a str> {
    let Some((prefix, qualifier)) = column.split_once(':') else {
        return Err(FormatError::MalformedColumnName {
            column: column.to_string(),
            reason: "column name doesn't include family and column".to_string(),
        });
    };
    if prefix != family {
        return Err(FormatError::MalformedColumnName {
            column: column.to_string(),
            reason: format!(
                "family, {}, and column family, {}, don't match",
                family, prefix
            ),
        });
    }
    Ok(qualifier)
}

/// Prefixes each line of `text` with `indent` and terminates the block with
/// a single newline.
fn indent_block(indent: &str, text: &str) -> String {
    let body = text.trim_end_matches('\n');
    let mut out = String::with_capacity(body.len() + indent.len() + 1);
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(indent);
        out.push_str(line);
    }
    out.push('\n');
    out
}
