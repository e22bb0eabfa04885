//! Tool catalog
//!
//! The catalog is a JSON array of tool descriptor records loaded once at
//! startup. The registry keeps the records in source order for discovery and
//! indexes them by name for dispatch. It is never mutated after load, so it
//! can be read from any number of concurrent requests without locking.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One invocable capability advertised to callers.
///
/// Only `name` is interpreted by the dispatch engine. Every other field of
/// the catalog record (description, input schema, anything else) is carried
/// opaquely in `meta` and returned verbatim to discovery callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

/// Registry of tool descriptors, keyed by name.
///
/// Invariant: every index entry points at a descriptor whose `name` equals
/// the key. Duplicate names in the source are last-write-wins: the later
/// record replaces the earlier one in place, keeping its original position in
/// catalog order.
#[derive(Debug, Default)]
pub struct Registry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from a sequence of descriptor records.
    pub fn from_descriptors(descriptors: Vec<ToolDescriptor>) -> Self {
        let mut registry = Self::default();
        for descriptor in descriptors {
            match registry.index.get(&descriptor.name) {
                Some(&i) => registry.tools[i] = descriptor,
                None => {
                    registry
                        .index
                        .insert(descriptor.name.clone(), registry.tools.len());
                    registry.tools.push(descriptor);
                }
            }
        }
        registry
    }

    /// Strict parse of a JSON catalog. Malformed JSON or a record missing
    /// `name` fails the whole parse.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let descriptors: Vec<ToolDescriptor> = serde_json::from_str(source)?;
        Ok(Self::from_descriptors(descriptors))
    }

    /// Load the catalog from a file, degrading to an empty registry on any
    /// failure.
    ///
    /// Discovery must never fail the process: an unreadable or malformed
    /// catalog is logged and the server starts with zero tools.
    pub fn load(path: &Path) -> Self {
        let result = fs::read_to_string(path)
            .map_err(crate::Error::from)
            .and_then(|source| Self::from_json_str(&source));
        match result {
            Ok(registry) => {
                tracing::info!(path = %path.display(), tools = registry.len(), "Loaded tool catalog");
                registry
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load tool catalog");
                Self::default()
            }
        }
    }

    /// All descriptors in catalog order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Exact-match lookup by name. No fuzzy matching, no case folding.
    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
