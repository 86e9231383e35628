use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("invalid encoding: {0}")]
    UnknownEncoding(String),

    #[error("unknown binary type: {0}")]
    UnknownType(String),

    #[error("no type specified for encoding: {encoding}")]
    MissingTypeForEncoding { encoding: String },

    #[error("invalid type: {type_name} for encoding: {encoding}")]
    InvalidTypeForEncoding { type_name: String, encoding: String },

    /// Every column that failed setup-time validation, one line each.
    #[error("bad encoding and types:\n{}", .problems.join("\n"))]
    InvalidFormats { problems: Vec<String> },

    #[error("couldn't parse format file {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("couldn't load protocol buffer definitions: {0}")]
    SchemaParse(#[from] protox::Error),

    #[error("{reason}")]
    MalformedColumnName { column: String, reason: String },

    #[error("data size, {len}, isn't a multiple of element size, {width}")]
    ByteLengthMismatch { len: usize, width: usize },

    #[error("couldn't deserialize bytes to protobuffer message: {0}")]
    ProtoDecode(String),

    #[error("invalid JSON value: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A decoder rejected the value stored in `column`.
    #[error("{column}: {source}")]
    Decode {
        column: String,
        #[source]
        source: Box<FormatError>,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub(crate) fn decode(column: impl Into<String>, source: FormatError) -> Self {
        FormatError::Decode {
            column: column.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
