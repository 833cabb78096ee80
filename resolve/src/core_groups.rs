//! Core attribute-group expansion.
//!
//! A core document (`wellKnownCDSAttributeGroups*.cdm.json`) holds core
//! entity descriptors listing attribute-group names under `hasAttributes`,
//! and the attribute-group definitions themselves. Expanding a core entity
//! parses every group it lists, in document order.

use std::collections::HashSet;

use cdm_schema_core::Schema;
use cdm_schema_loader::Document;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::members::parse_members_value;

/// Result of expanding one core entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoreExpansion {
    /// Group names listed by the core entity (empty when it was not found).
    pub listed_groups: Vec<String>,
    /// Groups actually found and parsed, in document order.
    pub parsed_groups: Vec<String>,
    /// Merged schema of the parsed groups.
    pub schema: Schema,
}

/// Group names listed in the `hasAttributes` of the core entity named
/// `core_entity_name`. Non-string entries are ignored.
pub fn core_group_names(core: &Document, core_entity_name: &str) -> Option<Vec<String>> {
    let entity = core.find_definition("entityName", core_entity_name)?;
    let names = entity
        .get("hasAttributes")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect();
    Some(names)
}

/// Expands a core entity into its merged attribute schema, keeping track of
/// which groups were listed and parsed.
///
/// Group members are parsed with `core` active, so group-name strings inside
/// a group resolve one level deep. A missing entity or missing groups yield
/// an empty schema.
pub fn expand_core_groups(core: &Document, core_entity_name: &str) -> CoreExpansion {
    let Some(listed_groups) = core_group_names(core, core_entity_name) else {
        debug!(entity = core_entity_name, "core entity not found in core document");
        return CoreExpansion::default();
    };
    debug!(entity = core_entity_name, groups = ?listed_groups, "core entity attribute groups");

    let wanted: HashSet<&str> = listed_groups.iter().map(String::as_str).collect();
    let mut parsed_groups = Vec::new();
    let mut schema = Schema::new();

    for def in core.definitions().iter().filter_map(Value::as_object) {
        let Some(group) = def.get("attributeGroupName").and_then(Value::as_str) else {
            continue;
        };
        if !wanted.contains(group) {
            continue;
        }
        let Some(members) = def.get("members") else {
            continue;
        };
        debug!(group, "parsing core attribute group members");
        schema.overlay(parse_members_value(members, Some(core)));
        parsed_groups.push(group.to_string());
    }

    CoreExpansion {
        listed_groups,
        parsed_groups,
        schema,
    }
}

/// Merged schema of every attribute group the core entity lists.
///
/// # Examples
///
/// ```
/// use cdm_schema_loader::Document;
/// use cdm_schema_resolve::core_groups::resolve_core_attributes;
/// use serde_json::json;
///
/// let core = Document::from_value(json!({
///     "definitions": [
///         {"entityName": "CdmEntity", "hasAttributes": ["createdOn"]},
///         {"attributeGroupName": "createdOn", "members": [{"name": "createdOn", "dataType": "dateTime"}]},
///         {"attributeGroupName": "unused", "members": [{"name": "unused", "dataType": "string"}]}
///     ]
/// }));
///
/// let schema = resolve_core_attributes(&core, "CdmEntity");
/// assert_eq!(schema.len(), 1);
/// assert_eq!(schema.get("createdOn"), Some("dateTime"));
/// assert!(resolve_core_attributes(&core, "Unknown").is_empty());
/// ```
pub fn resolve_core_attributes(core: &Document, core_entity_name: &str) -> Schema {
    expand_core_groups(core, core_entity_name).schema
}
