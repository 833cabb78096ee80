//! Member list parsing.
//!
//! Turns a `members` list into a [`Schema`]. Each entry is classified as an
//! [`AttributeDescriptor`]; group-name strings are looked up in the core
//! document when one is active, substituting the group's first member.
//! Entries that yield nothing are skipped and parsing always succeeds.

use cdm_schema_core::{AttributeDescriptor, Schema};
use cdm_schema_loader::Document;
use serde_json::Value;
use tracing::trace;

/// Parses `members` into a schema, in list order with name-based overwrite.
///
/// `core` enables one level of group-reference indirection: a string entry
/// naming an `attributeGroupName` in the core document is replaced by that
/// group's first member. Without a core document, string entries are
/// skipped.
///
/// # Examples
///
/// ```
/// use cdm_schema_loader::Document;
/// use cdm_schema_resolve::members::parse_members;
/// use serde_json::json;
///
/// let core = Document::from_value(json!({
///     "definitions": [{
///         "attributeGroupName": "AuditGroup",
///         "members": [{"name": "ModifiedOn", "dataType": "dateTime"}]
///     }]
/// }));
/// let members = json!([{"name": "Id", "dataType": "string"}, "AuditGroup"]);
/// let members = members.as_array().unwrap();
///
/// let with_core = parse_members(members, Some(&core));
/// assert_eq!(with_core.get("ModifiedOn"), Some("dateTime"));
///
/// let without_core = parse_members(members, None);
/// assert_eq!(without_core.len(), 1);
/// ```
pub fn parse_members(members: &[Value], core: Option<&Document>) -> Schema {
    let mut schema = Schema::new();
    for member in members {
        let descriptor = effective_descriptor(member, core);
        let attributes = descriptor.attributes();
        if attributes.is_empty() {
            trace!(?member, "member contributed no attributes");
        }
        schema.extend(attributes);
    }
    schema
}

/// Like [`parse_members`], accepting any JSON value; non-lists yield an
/// empty schema.
pub fn parse_members_value(members: &Value, core: Option<&Document>) -> Schema {
    members
        .as_array()
        .map(|list| parse_members(list, core))
        .unwrap_or_default()
}

/// The entity's own `members`:
/// `definitions[0].hasAttributes[0].attributeGroupReference.members`.
pub fn local_members(doc: &Document) -> Option<&Value> {
    doc.first_definition()?
        .get("hasAttributes")?
        .as_array()?
        .first()?
        .get("attributeGroupReference")?
        .get("members")
}

/// Parses the entity's own attributes; a document without a local member
/// list contributes nothing.
pub fn parse_local_attributes(doc: &Document, core: Option<&Document>) -> Schema {
    match local_members(doc) {
        Some(members) => parse_members_value(members, core),
        None => {
            trace!("document declares no local attribute group");
            Schema::new()
        }
    }
}

fn effective_descriptor(member: &Value, core: Option<&Document>) -> AttributeDescriptor {
    let descriptor = AttributeDescriptor::from_value(member);
    let (AttributeDescriptor::GroupReference(group), Some(core)) = (&descriptor, core) else {
        return descriptor;
    };

    let first = core
        .find_definition("attributeGroupName", group)
        .and_then(|def| def.get("members"))
        .and_then(Value::as_array)
        .and_then(|m| m.first());

    match first {
        Some(first) => AttributeDescriptor::from_value(first),
        None => {
            trace!(group = %group, "group reference not found in core document");
            descriptor
        }
    }
}
