//! Entity identity extraction.

use cdm_schema_core::{ENTITY_VERSION_TRAIT, EntityIdentity};
use cdm_schema_loader::Document;
use serde_json::Value;

/// Reads entity name, extended entity and version from the first definition.
///
/// Uses the standard `is.CDM.entityVersion` trait for the version.
///
/// # Examples
///
/// ```
/// use cdm_schema_loader::Document;
/// use cdm_schema_resolve::identity::extract_identity;
/// use serde_json::json;
///
/// let doc = Document::from_value(json!({
///     "definitions": [{
///         "entityName": "Account",
///         "extendsEntity": "CdmEntity",
///         "exhibitsTraits": [
///             {"traitReference": "is.CDM.entityVersion", "arguments": [{"value": "1.0"}]}
///         ]
///     }]
/// }));
///
/// let identity = extract_identity(&doc);
/// assert_eq!(identity.entity_name.as_deref(), Some("Account"));
/// assert_eq!(identity.extends_entity.as_deref(), Some("CdmEntity"));
/// assert_eq!(identity.version_number.as_deref(), Some("1.0"));
/// ```
pub fn extract_identity(doc: &Document) -> EntityIdentity {
    extract_identity_with(doc, ENTITY_VERSION_TRAIT)
}

/// Like [`extract_identity`], reading the version from `version_trait`.
///
/// Missing fields become `None`; nothing here fails. An absent or non-list
/// `exhibitsTraits` simply means no version.
pub fn extract_identity_with(doc: &Document, version_trait: &str) -> EntityIdentity {
    let Some(def) = doc.first_definition() else {
        return EntityIdentity::default();
    };

    let text = |key: &str| def.get(key).and_then(Value::as_str).map(String::from);

    let version_number = def
        .get("exhibitsTraits")
        .and_then(Value::as_array)
        .and_then(|traits| {
            traits
                .iter()
                .find_map(|t| version_from_trait(t, version_trait))
        });

    EntityIdentity {
        entity_name: text("entityName"),
        extends_entity: text("extendsEntity"),
        version_number,
    }
}

/// First argument value of a matching trait. Bare-string traits carry no
/// arguments and never match.
fn version_from_trait(t: &Value, version_trait: &str) -> Option<String> {
    let t = t.as_object()?;
    if t.get("traitReference").and_then(Value::as_str) != Some(version_trait) {
        return None;
    }
    match t.get("arguments")?.as_array()?.first()?.get("value")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
