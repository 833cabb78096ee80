//! Recursive schema resolution.
//!
//! [`Resolver`] walks one entity document: it reads the entity identity,
//! resolves whatever the entity extends (a base entity document, recursively,
//! or a core entity's attribute groups), then overlays the entity's own
//! attributes so the most specific definition wins.
//!
//! # Example
//!
//! ```no_run
//! use cdm_schema_resolve::Resolver;
//!
//! let resolver = Resolver::new(
//!     "schemaDocuments/core/applicationCommon/foundationCommon/crmCommon",
//!     "schemaDocuments/core/applicationCommon/foundationCommon/base",
//! );
//! let entity = resolver
//!     .resolve("schemaDocuments/core/applicationCommon/Account.cdm.json")
//!     .unwrap();
//! for attribute in &entity.schema {
//!     println!("{}: {}", attribute.name, attribute.data_type);
//! }
//! ```

use std::path::{Path, PathBuf};

use cdm_schema_core::{EntityIdentity, Schema};
use cdm_schema_loader::{Document, DocumentSource, FileSystemSource, ResolverConfig};
use tracing::{debug, info};

use crate::core_groups::expand_core_groups;
use crate::error::{ResolveError, Result};
use crate::identity::extract_identity_with;
use crate::members::parse_local_attributes;
use crate::report::{ResolutionTrace, ResolvedEntity};

/// Resolves entity documents into flattened schemas.
///
/// Holds only configuration and a [`DocumentSource`]; every call loads its
/// own documents, so resolving the same path twice gives the same result.
#[derive(Debug, Clone)]
pub struct Resolver<S = FileSystemSource> {
    source: S,
    config: ResolverConfig,
    core_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
}

impl Resolver<FileSystemSource> {
    /// Creates a filesystem resolver with core and base document directories.
    pub fn new(core_dir: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self::with_source(FileSystemSource)
            .core_dir(core_dir)
            .base_dir(base_dir)
    }
}

impl<S: DocumentSource> Resolver<S> {
    /// Creates a resolver reading from `source`, with default configuration
    /// and no core or base directory.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            config: ResolverConfig::default(),
            core_dir: None,
            base_dir: None,
        }
    }

    /// Sets the directory holding the core attribute-group document.
    pub fn core_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.core_dir = Some(dir.into());
        self
    }

    /// Sets the directory holding base entity documents.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves the entity document at `path`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Load`] if the entity, a base or the core document
    ///   cannot be loaded.
    /// - [`ResolveError::MissingEntityName`] if an entity document has no
    ///   `entityName`.
    /// - [`ResolveError::ExtensionCycle`] if base references loop.
    /// - [`ResolveError::MissingBaseDirectory`] /
    ///   [`ResolveError::MissingCoreDirectory`] if an extension needs a
    ///   directory that is not set.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<ResolvedEntity> {
        let mut chain = Vec::new();
        let mut trace = ResolutionTrace::default();
        let (identity, schema) = self.resolve_document(
            path.as_ref(),
            self.base_dir.as_deref(),
            &mut chain,
            &mut trace,
        )?;
        info!(
            entity = identity.entity_name.as_deref().unwrap_or_default(),
            attributes = schema.len(),
            "resolved entity schema"
        );
        Ok(ResolvedEntity {
            identity,
            schema,
            trace,
        })
    }

    /// Resolves only the merged schema of the entity at `path`.
    pub fn resolve_schema(&self, path: impl AsRef<Path>) -> Result<Schema> {
        self.resolve(path).map(|entity| entity.schema)
    }

    fn resolve_document(
        &self,
        path: &Path,
        base_dir: Option<&Path>,
        chain: &mut Vec<PathBuf>,
        trace: &mut ResolutionTrace,
    ) -> Result<(EntityIdentity, Schema)> {
        if chain.iter().any(|seen| seen == path) {
            let mut cycle = chain.clone();
            cycle.push(path.to_path_buf());
            return Err(ResolveError::ExtensionCycle { chain: cycle });
        }
        chain.push(path.to_path_buf());

        info!(path = %path.display(), "resolving entity document");
        let doc = self.source.load(path)?;
        trace.documents.push(path.to_path_buf());

        let identity = extract_identity_with(&doc, &self.config.version_trait);
        let Some(entity_name) = identity.entity_name.as_deref() else {
            return Err(ResolveError::MissingEntityName {
                path: path.to_path_buf(),
            });
        };
        debug!(
            entity = entity_name,
            extends = ?identity.extends_entity,
            version = ?identity.version_number,
            "document identity"
        );

        let version = identity.version_number.as_deref();
        let mut schema = Schema::new();
        let mut core: Option<Document> = None;

        match identity.extends_entity.as_deref() {
            Some(extends) if self.config.is_base_reference(extends) => {
                let dir = base_dir.ok_or_else(|| ResolveError::MissingBaseDirectory {
                    entity: entity_name.to_string(),
                    extends: extends.to_string(),
                })?;
                let base_path = dir.join(self.config.base_document_name(extends, version));
                debug!(base = %base_path.display(), "resolving base entity");

                let nested_base_dir = self.config.forward_base_path.then_some(dir);
                let (_, inherited) =
                    self.resolve_document(&base_path, nested_base_dir, chain, trace)?;
                schema.overlay(inherited);
            }
            Some(extends) => {
                let dir = self.core_dir.as_deref().ok_or_else(|| {
                    ResolveError::MissingCoreDirectory {
                        entity: entity_name.to_string(),
                        extends: extends.to_string(),
                    }
                })?;
                let core_path = dir.join(self.config.core_document_name(version));
                debug!(core = %core_path.display(), entity = extends, "reading core attributes");

                let core_doc = self.source.load(&core_path)?;
                trace.core_documents.push(core_path);

                let expansion = expand_core_groups(&core_doc, extends);
                trace.core_groups.extend(expansion.parsed_groups);
                schema.overlay(expansion.schema);
                core = Some(core_doc);
            }
            None => {}
        }

        let local_core = if self.config.expand_local_group_references {
            core.as_ref()
        } else {
            None
        };
        let local = parse_local_attributes(&doc, local_core);
        debug!(entity = entity_name, attributes = local.len(), "parsed local attributes");
        schema.overlay(local);

        chain.pop();
        Ok((identity, schema))
    }
}

/// Resolves the schema of the entity document at `path`, reading core and
/// base documents from `core_path` and `base_path`.
///
/// # Examples
///
/// ```no_run
/// let schema = cdm_schema_resolve::resolve_schema(
///     "Account.cdm.json",
///     "schemaDocuments/core",
///     "schemaDocuments/base",
/// )
/// .unwrap();
/// println!("{} attributes", schema.len());
/// ```
pub fn resolve_schema(
    path: impl AsRef<Path>,
    core_path: impl Into<PathBuf>,
    base_path: impl Into<PathBuf>,
) -> Result<Schema> {
    Resolver::new(core_path, base_path).resolve_schema(path)
}
