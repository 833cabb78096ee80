//! Structured resolution results.

use std::path::PathBuf;

use cdm_schema_core::{EntityIdentity, Schema};
use serde::Serialize;

/// Documents and groups consulted while resolving one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionTrace {
    /// Entity and base documents, in the order they were loaded.
    pub documents: Vec<PathBuf>,
    /// Core documents consulted for core-entity extensions.
    pub core_documents: Vec<PathBuf>,
    /// Core attribute groups whose members were parsed.
    pub core_groups: Vec<String>,
}

/// A fully resolved entity: identity, merged schema and trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntity {
    pub identity: EntityIdentity,
    pub schema: Schema,
    pub trace: ResolutionTrace,
}

impl ResolvedEntity {
    /// Name of the resolved entity.
    pub fn entity_name(&self) -> &str {
        self.identity.entity_name.as_deref().unwrap_or_default()
    }

    /// Number of attributes in the merged schema.
    pub fn attribute_count(&self) -> usize {
        self.schema.len()
    }
}
