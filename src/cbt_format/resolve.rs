//! # Resolution and Validation
//!
//! Picks the effective encoding and type for a column and checks that the
//! pair makes sense.
//!
//! Precedence, most specific first:
//!
//! - family listed under `families`: family column override, then family
//!   defaults, then global defaults. Top-level `columns` are **not**
//!   consulted for such a family, even when the family does not list the
//!   column.
//! - family not listed: top-level column override, then global defaults.

use crate::encoding::{BinaryType, Encoding};
use crate::error::{FormatError, Result};
use crate::schema::MessageTypes;
use crate::settings::{override_with, FormatSettings};

/// A validated encoding/type pair for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFormat {
    pub encoding: Encoding,
    /// Lower-cased binary type, protobuf message name, or whatever was
    /// configured for encodings that take no type.
    pub type_name: String,
}

/// Returns the configured (encoding, type) strings for `family:qualifier`.
pub fn column_encoding_type<'a>(
    settings: &'a FormatSettings,
    family: &str,
    qualifier: &str,
) -> (&'a str, &'a str) {
    let default_encoding = settings.default_encoding.as_str();
    let default_type = settings.default_type.as_str();

    if let Some(fam) = settings.families.get(family) {
        let family_encoding = override_with(default_encoding, &fam.default_encoding);
        let family_type = override_with(default_type, &fam.default_type);
        return match fam.columns.get(qualifier) {
            Some(col) => (
                override_with(family_encoding, &col.encoding),
                override_with(family_type, &col.type_name),
            ),
            None => (family_encoding, family_type),
        };
    }

    match settings.columns.get(qualifier) {
        Some(col) => (
            override_with(default_encoding, &col.encoding),
            override_with(default_type, &col.type_name),
        ),
        None => (default_encoding, default_type),
    }
}

/// Checks that `encoding` is known and that `type_name` suits it.
///
/// Protobuf columns without a type use the qualifier as the message name.
pub fn validate_format(
    types: &MessageTypes,
    qualifier: &str,
    encoding: &str,
    type_name: &str,
) -> Result<ResolvedFormat> {
    let parsed = Encoding::parse(encoding)?;
    let type_name = match parsed {
        Encoding::BigEndian | Encoding::LittleEndian => {
            if type_name.is_empty() {
                return Err(FormatError::MissingTypeForEncoding {
                    encoding: encoding.to_string(),
                });
            }
            BinaryType::parse(type_name).map_err(|_| FormatError::InvalidTypeForEncoding {
                type_name: type_name.to_string(),
                encoding: encoding.to_string(),
            })?;
            type_name.to_lowercase()
        }
        Encoding::ProtocolBuffer => {
            let type_name = override_with(qualifier, type_name);
            if !types.contains(type_name) {
                return Err(FormatError::InvalidTypeForEncoding {
                    type_name: type_name.to_string(),
                    encoding: encoding.to_string(),
                });
            }
            type_name.to_string()
        }
        Encoding::Hex | Encoding::Json | Encoding::None => type_name.to_string(),
    };
    Ok(ResolvedFormat {
        encoding: parsed,
        type_name,
    })
}

/// Resolves and validates the format of `family:qualifier`.
pub fn resolve(
    settings: &FormatSettings,
    types: &MessageTypes,
    family: &str,
    qualifier: &str,
) -> Result<ResolvedFormat> {
    let (encoding, type_name) = column_encoding_type(settings, family, qualifier);
    validate_format(types, qualifier, encoding, type_name)
}

/// Validates every column declared in `settings`, reporting all problems at
/// once rather than stopping at the first.
pub fn validate_columns(settings: &FormatSettings, types: &MessageTypes) -> Result<()> {
    let default_encoding = settings.default_encoding.as_str();
    let default_type = settings.default_type.as_str();

    let mut problems = Vec::new();
    for (qualifier, col) in &settings.columns {
        if let Err(e) = validate_format(
            types,
            qualifier,
            override_with(default_encoding, &col.encoding),
            override_with(default_type, &col.type_name),
        ) {
            problems.push(format!("{}: {}", qualifier, e));
        }
    }

    for (family, fam) in &settings.families {
        let family_encoding = override_with(default_encoding, &fam.default_encoding);
        let family_type = override_with(default_type, &fam.default_type);
        for (qualifier, col) in &fam.columns {
            if let Err(e) = validate_format(
                types,
                qualifier,
                override_with(family_encoding, &col.encoding),
                override_with(family_type, &col.type_name),
            ) {
                problems.push(format!("{}:{}: {}", family, qualifier, e));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(FormatError::InvalidFormats { problems })
    }
}
