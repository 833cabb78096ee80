//! Document loading and resolver configuration for CDM schema extraction.
//!
//! This crate is the I/O edge of the workspace: it reads `*.cdm.json`
//! documents into immutable [`Document`] trees and loads the
//! [`ResolverConfig`] that controls how entity references map to files.
//!
//! # Quick start
//!
//! ```no_run
//! use cdm_schema_loader::{ResolverConfig, load_document};
//!
//! let doc = load_document("schemaDocuments/core/applicationCommon/Account.cdm.json").unwrap();
//! if let Some(def) = doc.first_definition() {
//!     println!("entity: {:?}", def.get("entityName"));
//! }
//!
//! let config = ResolverConfig::load("cdm-schema.yaml").unwrap_or_default();
//! println!("core document: {}", config.core_document_name(Some("1.0")));
//! ```

mod config;
mod error;
mod loader;

pub use config::{ResolverConfig, VERSION_PLACEHOLDER};
pub use error::{LoadError, Result};
pub use loader::{Document, DocumentSource, FileSystemSource, MemorySource, load_document};
