//! Member descriptors of CDM attribute groups.
//!
//! A `members` list mixes three shapes: inline attribute objects, bare
//! strings naming a shared attribute group, and objects carrying
//! `resolutionGuidance`. [`AttributeDescriptor::from_value`] classifies one
//! JSON entry without ever failing; fields that are missing or have the
//! wrong type simply produce no attribute.

use serde_json::{Map, Value};

use crate::Attribute;

/// One classified entry of a `members` list.
///
/// # Examples
///
/// ```
/// use cdm_schema_core::{Attribute, AttributeDescriptor};
/// use serde_json::json;
///
/// let inline = AttributeDescriptor::from_value(&json!({"name": "Id", "dataType": "string"}));
/// assert_eq!(inline.attributes(), vec![Attribute::new("Id", "string")]);
///
/// let group = AttributeDescriptor::from_value(&json!("AuditGroup"));
/// assert_eq!(group, AttributeDescriptor::GroupReference("AuditGroup".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDescriptor {
    /// A bare string naming an attribute group in the core document.
    GroupReference(String),
    /// An object that may declare an inline attribute and/or resolution guidance.
    Attribute(AttributeEntry),
    /// Any other JSON value.
    Unrecognized,
}

/// Attributes an object descriptor declares directly or through guidance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeEntry {
    /// `name` + `dataType` pair, when both resolve to strings.
    pub inline: Option<Attribute>,
    /// Parsed `resolutionGuidance` object.
    pub guidance: Option<ResolutionGuidance>,
}

/// Indirect attributes described by a `resolutionGuidance` object.
///
/// The three shapes are independent; one guidance object may yield up to
/// three attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionGuidance {
    /// `entityByReference.foreignKeyAttribute.{sourceName, dataType}`
    pub entity_by_reference: Option<Attribute>,
    /// `selectsSubAttribute.selectedTypeAttribute.{name, dataType}`
    pub selects_sub_attribute: Option<Attribute>,
    /// `addSupportingAttribute.{name, dataType}`
    pub add_supporting_attribute: Option<Attribute>,
}

impl AttributeDescriptor {
    /// Classifies a member JSON value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::GroupReference(name.clone()),
            Value::Object(map) => Self::Attribute(AttributeEntry::from_object(map)),
            _ => Self::Unrecognized,
        }
    }

    /// Attributes contributed by this descriptor on its own.
    ///
    /// Group references contribute nothing until they are resolved against a
    /// core document.
    pub fn attributes(&self) -> Vec<Attribute> {
        match self {
            Self::Attribute(entry) => entry.attributes(),
            Self::GroupReference(_) | Self::Unrecognized => Vec::new(),
        }
    }
}

impl AttributeEntry {
    fn from_object(map: &Map<String, Value>) -> Self {
        Self {
            inline: named_attribute(map, "name"),
            guidance: map
                .get("resolutionGuidance")
                .and_then(Value::as_object)
                .map(ResolutionGuidance::from_object),
        }
    }

    /// Inline attribute first, then guidance attributes.
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut out: Vec<Attribute> = self.inline.iter().cloned().collect();
        if let Some(guidance) = &self.guidance {
            out.extend(guidance.attributes());
        }
        out
    }
}

impl ResolutionGuidance {
    fn from_object(map: &Map<String, Value>) -> Self {
        let entity_by_reference = map
            .get("entityByReference")
            .and_then(|v| v.get("foreignKeyAttribute"))
            .and_then(Value::as_object)
            .and_then(|fk| named_attribute(fk, "sourceName"));

        let selects_sub_attribute = map
            .get("selectsSubAttribute")
            .and_then(|v| v.get("selectedTypeAttribute"))
            .and_then(Value::as_object)
            .and_then(|sel| named_attribute(sel, "name"));

        let add_supporting_attribute = map
            .get("addSupportingAttribute")
            .and_then(Value::as_object)
            .and_then(|sup| named_attribute(sup, "name"));

        Self {
            entity_by_reference,
            selects_sub_attribute,
            add_supporting_attribute,
        }
    }

    /// Present shapes in the order entity-by-reference, selects-sub-attribute,
    /// add-supporting-attribute.
    pub fn attributes(&self) -> Vec<Attribute> {
        [
            &self.entity_by_reference,
            &self.selects_sub_attribute,
            &self.add_supporting_attribute,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    /// Returns `true` if no shape produced an attribute.
    pub fn is_empty(&self) -> bool {
        self.entity_by_reference.is_none()
            && self.selects_sub_attribute.is_none()
            && self.add_supporting_attribute.is_none()
    }
}

/// Resolves a `dataType` value: either a plain string or an object carrying
/// `dataTypeReference`.
///
/// # Examples
///
/// ```
/// use cdm_schema_core::data_type_name;
/// use serde_json::json;
///
/// assert_eq!(data_type_name(&json!("string")), Some("string"));
/// assert_eq!(data_type_name(&json!({"dataTypeReference": "guid"})), Some("guid"));
/// assert_eq!(data_type_name(&json!(42)), None);
/// ```
pub fn data_type_name(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("dataTypeReference").and_then(Value::as_str),
        _ => None,
    }
}

fn named_attribute(map: &Map<String, Value>, name_key: &str) -> Option<Attribute> {
    let name = map.get(name_key)?.as_str()?;
    let data_type = data_type_name(map.get("dataType")?)?;
    Some(Attribute::new(name, data_type))
}
