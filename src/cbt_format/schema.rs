//! # Protocol-Buffer Message Types
//!
//! Message types are looked up by the `type` given for a protobuf column.
//! Lookups are case-insensitive and accept either the bare message name
//! (`person`) or the package-qualified one (`tutorial.person`).
//!
//! Only top-level messages of the listed definition files are registered.
//! Imported files, including the well-known types that ship with protobuf,
//! are compiled so references resolve but do not add names of their own.

use crate::error::Result;
use prost_reflect::MessageDescriptor;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MessageTypes {
    types: HashMap<String, MessageDescriptor>,
}

impl MessageTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `definitions`, resolving imports against `search_paths`.
    ///
    /// With no search paths the working directory is searched. An empty
    /// definition list yields an empty registry.
    pub fn load<P: AsRef<Path>>(definitions: &[P], search_paths: &[P]) -> Result<Self> {
        let mut registry = Self::new();
        if definitions.is_empty() {
            return Ok(registry);
        }

        let includes: Vec<PathBuf> = if search_paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            search_paths.iter().map(|p| p.as_ref().to_path_buf()).collect()
        };

        let mut compiler = protox::Compiler::new(includes)?;
        compiler.include_imports(false);
        compiler.open_files(definitions.iter().map(|p| p.as_ref()))?;

        let pool = compiler.descriptor_pool();
        for file in compiler.file_descriptor_set().file {
            let Some(file) = pool.get_file_by_name(file.name()) else {
                continue;
            };
            let package = file.package_name().to_string();
            for message in file.messages() {
                registry.insert(&package, message);
            }
        }

        debug!(
            files = definitions.len(),
            keys = registry.len(),
            "registered protocol buffer message types"
        );
        Ok(registry)
    }

    /// Registers `message` under its bare name and, when `package` is not
    /// empty, under `package.name` too.
    pub fn insert(&mut self, package: &str, message: MessageDescriptor) {
        if !package.is_empty() {
            let qualified = format!("{}.{}", package, message.name()).to_lowercase();
            self.types.insert(qualified, message.clone());
        }
        self.types.insert(message.name().to_lowercase(), message);
    }

    pub fn get(&self, name: &str) -> Option<&MessageDescriptor> {
        self.types.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.types.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of distinct message types, counting each once regardless of
    /// how many names it is registered under.
    pub fn message_count(&self) -> usize {
        self.types
            .values()
            .map(|m| m.full_name())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use crate::test_utils::{testdata, testdata_dir};

    #[test]
    fn test_load_registers_short_and_qualified_names() {
        let types = MessageTypes::load(
            &[PathBuf::from("addressbook.proto"), PathBuf::from("club.proto")],
            &[testdata_dir(), testdata("protoincludes")],
        )
        .unwrap();

        assert_eq!(
            types.keys(),
            vec![
                "addressbook",
                "equipment",
                "person",
                "tutorial.addressbook",
                "tutorial.person",
            ]
        );
    }

    #[test]
    fn test_message_count_ignores_aliases() {
        let types =
            MessageTypes::load(&[PathBuf::from("addressbook.proto")], &[testdata_dir()]).unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(types.message_count(), 2);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let types =
            MessageTypes::load(&[PathBuf::from("addressbook.proto")], &[testdata_dir()]).unwrap();
        assert!(types.contains("Person"));
        assert!(types.contains("TUTORIAL.PERSON"));
        assert_eq!(
            types.get("tutorial.Person").unwrap().full_name(),
            "tutorial.Person"
        );
        assert!(!types.contains("Person.PhoneNumber"));
    }

    #[test]
    fn test_imported_messages_are_not_registered() {
        let types = MessageTypes::load(
            &[PathBuf::from("club.proto")],
            &[testdata_dir(), testdata("protoincludes")],
        )
        .unwrap();
        assert!(types.contains("equipment"));
        assert!(!types.contains("venue"));
    }

    #[test]
    fn test_empty_definitions() {
        let none: [PathBuf; 0] = [];
        let types = MessageTypes::load(&none, &none).unwrap();
        assert!(types.is_empty());
    }

    #[test]
    fn test_missing_definition_file() {
        let err = MessageTypes::load(&[PathBuf::from("nope.proto")], &[testdata_dir()]).unwrap_err();
        assert!(matches!(err, FormatError::SchemaParse(_)));
    }

    #[test]
    fn test_unresolvable_import() {
        // club.proto imports a file that only exists under protoincludes/
        let err = MessageTypes::load(&[PathBuf::from("club.proto")], &[testdata_dir()]).unwrap_err();
        assert!(matches!(err, FormatError::SchemaParse(_)));
    }

    #[test]
    fn test_malformed_definition() {
        let err =
            MessageTypes::load(&[PathBuf::from("broken.proto")], &[testdata_dir()]).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("couldn't load protocol buffer definitions"));
    }
}
