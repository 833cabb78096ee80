//! Core types for flattened Common Data Model (CDM) schemas.
//!
//! This crate defines the data model shared by the loader and the resolver:
//!
//! - [`Schema`] — ordered attribute name → data type mapping, the artifact
//!   produced by resolution.
//! - [`Attribute`] — one name/data type pair.
//! - [`EntityIdentity`] — entity name, extended entity and version read from
//!   an entity document.
//! - [`AttributeDescriptor`] — one classified entry of a `members` list
//!   (inline attribute, group reference or resolution guidance).
//!
//! Merging ([`merge_schemas`]) overlays an entity's own attributes on its
//! inherited ones.
//!
//! # Example
//!
//! ```
//! use cdm_schema_core::*;
//! use serde_json::json;
//!
//! let members = json!([
//!     {"name": "accountId", "dataType": "entityId"},
//!     {"name": "name", "dataType": {"dataTypeReference": "name"}},
//! ]);
//!
//! let schema: Schema = members
//!     .as_array()
//!     .unwrap()
//!     .iter()
//!     .flat_map(|m| AttributeDescriptor::from_value(m).attributes())
//!     .collect();
//!
//! assert_eq!(schema.get("name"), Some("name"));
//! assert_eq!(schema.len(), 2);
//! ```

mod descriptor;
mod merge;
mod types;

pub use descriptor::{AttributeDescriptor, AttributeEntry, ResolutionGuidance, data_type_name};
pub use merge::merge_schemas;
pub use types::*;
