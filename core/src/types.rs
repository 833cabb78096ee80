//! Schema type definitions for flattened CDM entities.
//!
//! A resolved entity is reduced to an ordered name → data type mapping
//! ([`Schema`]) plus the identity read from its document
//! ([`EntityIdentity`]).

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Trait reference that carries an entity's version number.
pub const ENTITY_VERSION_TRAIT: &str = "is.CDM.entityVersion";

/// A single resolved attribute.
///
/// # Examples
///
/// ```
/// use cdm_schema_core::Attribute;
///
/// let attr = Attribute::new("accountId", "entityId");
/// assert_eq!(attr.name, "accountId");
/// assert_eq!(attr.data_type, "entityId");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name as declared in the document.
    pub name: String,
    /// Data type name (a `dataType` string or a `dataTypeReference`).
    pub data_type: String,
}

impl Attribute {
    /// Creates an attribute from a name and data type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Identity triple read from the first definition of an entity document.
///
/// Every field is optional at extraction time; the resolver decides which
/// absences are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityIdentity {
    /// The `entityName` of the definition.
    pub entity_name: Option<String>,
    /// The `extendsEntity` reference (a base entity path or a core entity name).
    pub extends_entity: Option<String>,
    /// Version taken from the `is.CDM.entityVersion` trait.
    pub version_number: Option<String>,
}

impl EntityIdentity {
    /// Returns the version number, or `"None"` when the document carries none.
    pub fn version_label(&self) -> &str {
        self.version_number.as_deref().unwrap_or("None")
    }
}

/// Ordered attribute name → data type mapping.
///
/// Names are unique. Inserting an existing name replaces its data type but
/// keeps the position of the first insertion, so inherited attributes stay
/// ahead of local ones even when a local definition overrides them.
///
/// # Examples
///
/// ```
/// use cdm_schema_core::Schema;
///
/// let mut schema = Schema::new();
/// schema.insert("createdOn", "dateTime");
/// schema.insert("name", "string");
/// schema.insert("createdOn", "date");
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.get("createdOn"), Some("date"));
/// assert_eq!(schema.names().collect::<Vec<_>>(), vec!["createdOn", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    attributes: Vec<Attribute>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an attribute, returning the previous data type.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Option<String> {
        let name = name.into();
        let data_type = data_type.into();
        match self.index.get(&name) {
            Some(&pos) => Some(std::mem::replace(
                &mut self.attributes[pos].data_type,
                data_type,
            )),
            None => {
                self.index.insert(name.clone(), self.attributes.len());
                self.attributes.push(Attribute { name, data_type });
                None
            }
        }
    }

    /// Inserts an [`Attribute`] value.
    pub fn insert_attribute(&mut self, attribute: Attribute) -> Option<String> {
        self.insert(attribute.name, attribute.data_type)
    }

    /// Looks up the data type of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&pos| self.attributes[pos].data_type.as_str())
    }

    /// Returns `true` if the schema defines `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the schema has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// Iterates attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Length in characters of the longest attribute name (0 when empty).
    pub fn longest_name(&self) -> usize {
        self.attributes
            .iter()
            .map(|a| a.name.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Consumes the schema, returning its attributes in order.
    pub fn into_attributes(self) -> Vec<Attribute> {
        self.attributes
    }
}

impl FromIterator<Attribute> for Schema {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut schema = Schema::new();
        schema.extend(iter);
        schema
    }
}

impl Extend<Attribute> for Schema {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        for attribute in iter {
            self.insert_attribute(attribute);
        }
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// Serialized as a JSON object whose keys keep schema order.
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for attribute in &self.attributes {
            map.serialize_entry(&attribute.name, &attribute.data_type)?;
        }
        map.end()
    }
}
