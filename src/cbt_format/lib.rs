//! # cbt-format Architecture
//!
//! cbt-format turns the raw bytes stored in wide-column table cells into
//! readable text. Which decoding a cell gets is decided per column by a YAML
//! format file; the same engine backs the `lookup`/`read` row printing and
//! the offline `cbt-format` binary.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, reads row dumps, installs logging      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Rendering (row.rs)                                         │
//! │  - Row layout: separator, key, sorted cells, timestamps     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (engine.rs)                                         │
//! │  - Setup: settings + schema + validation                    │
//! │  - Per-column formatter cache, indentation                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Resolution and decoders (resolve.rs, formatters/)          │
//! │  - Which encoding/type applies to a column                  │
//! │  - Pure bytes → text functions                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Column Resolution
//!
//! For a cell in `family:qualifier` the encoding and type are picked from,
//! highest precedence first:
//!
//! 1. the family's `columns` entry for the qualifier
//! 2. the family's `default_encoding` / `default_type`
//! 3. the top-level `columns` entry (only when the family is not listed)
//! 4. the top-level `default_encoding` / `default_type`
//!
//! A protobuf column without a type uses the qualifier as the message name.
//!
//! ## No I/O After Setup
//!
//! Reading the format file and compiling `.proto` definitions happen once in
//! [`engine::ValueFormatting::setup`]. Formatting afterwards is pure and the
//! engine can be shared between threads.
//!
//! ## Module Overview
//!
//! - [`engine`]: `ValueFormatting`, the entry point
//! - [`row`]: row printing
//! - [`settings`]: the format file model
//! - [`resolve`]: encoding/type resolution and validation
//! - [`schema`]: protobuf message type registry
//! - [`encoding`]: encoding and binary type names
//! - [`formatters`]: the decoders
//! - [`error`]: Error types
//! - `cli`: argument parsing and row dump input for the binary (not part of the lib API)

pub mod encoding;
pub mod engine;
pub mod error;
pub mod formatters;
pub mod resolve;
pub mod row;
pub mod schema;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::ValueFormatting;
pub use error::{FormatError, Result};
pub use row::{ReadItem, Row};
