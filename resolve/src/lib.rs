//! Flattened attribute schemas from Common Data Model entity documents.
//!
//! An entity document may extend a base entity (another entity document,
//! resolved recursively) or a core entity (a set of attribute groups in the
//! shared core document). This crate resolves that inheritance and overlays
//! the entity's own attributes, producing one ordered name → data type
//! [`Schema`].
//!
//! # Main entry points
//!
//! - [`Resolver`] — configurable resolver over any
//!   [`DocumentSource`](cdm_schema_loader::DocumentSource).
//! - [`resolve_schema`] — one-shot filesystem resolution.
//! - [`members::parse_members`] — parse a `members` list on its own.
//! - [`core_groups::resolve_core_attributes`] — expand a core entity.
//! - [`identity::extract_identity`] — read entity name, extended entity and
//!   version.
//!
//! # Example
//!
//! ```
//! use cdm_schema_loader::MemorySource;
//! use cdm_schema_resolve::Resolver;
//! use serde_json::json;
//!
//! let source = MemorySource::new()
//!     .with_document("Contact.cdm.json", json!({
//!         "definitions": [{
//!             "entityName": "Contact",
//!             "extendsEntity": "CdmEntity",
//!             "hasAttributes": [{
//!                 "attributeGroupReference": {
//!                     "members": [{"name": "fullName", "dataType": "string"}]
//!                 }
//!             }]
//!         }]
//!     }))
//!     .with_document("core/wellKnownCDSAttributeGroups.cdm.json", json!({
//!         "definitions": [
//!             {"entityName": "CdmEntity", "hasAttributes": ["audit"]},
//!             {"attributeGroupName": "audit", "members": [
//!                 {"name": "createdOn", "dataType": "dateTime"}
//!             ]}
//!         ]
//!     }));
//!
//! let entity = Resolver::with_source(source)
//!     .core_dir("core")
//!     .resolve("Contact.cdm.json")
//!     .unwrap();
//!
//! assert_eq!(entity.schema.names().collect::<Vec<_>>(), vec!["createdOn", "fullName"]);
//! ```
//!
//! [`Schema`]: cdm_schema_core::Schema

pub mod core_groups;
pub mod error;
pub mod identity;
pub mod members;
pub mod output;
pub mod report;
pub mod resolver;

pub use error::{ResolveError, Result};
pub use report::{ResolutionTrace, ResolvedEntity};
pub use resolver::{Resolver, resolve_schema};
