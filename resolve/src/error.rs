//! Error types for schema resolution.
//!
//! Only failures that abort a resolution are modelled here. Malformed
//! members, missing attribute groups and absent guidance shapes are skipped
//! by the member parser and never surface as errors.

use std::path::PathBuf;

use cdm_schema_loader::LoadError;
use thiserror::Error;

/// Errors that abort a schema resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A document (entity, base or core) could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The entity document's first definition has no `entityName`.
    #[error("entity name was not found in '{}'", path.display())]
    MissingEntityName { path: PathBuf },

    /// Following `extendsEntity` references led back to a document already
    /// being resolved.
    #[error("extension cycle detected: {}", display_chain(chain))]
    ExtensionCycle { chain: Vec<PathBuf> },

    /// A base entity is extended but no base directory is available.
    #[error("entity '{entity}' extends base entity '{extends}' but no base directory is set")]
    MissingBaseDirectory { entity: String, extends: String },

    /// A core entity is extended but no core directory is available.
    #[error("entity '{entity}' extends core entity '{extends}' but no core directory is set")]
    MissingCoreDirectory { entity: String, extends: String },
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Convenience alias for results with [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
