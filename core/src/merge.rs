//! Schema merging with "most specific definition wins" semantics.
//!
//! Inherited attributes (from a base document or core attribute groups) form
//! the starting schema; the entity's own attributes are overlaid on top.
//!
//! # Example
//!
//! ```
//! use cdm_schema_core::*;
//!
//! let mut base = Schema::new();
//! base.insert("createdOn", "dateTime");
//! base.insert("name", "string");
//!
//! let mut local = Schema::new();
//! local.insert("name", "name");
//! local.insert("accountNumber", "string");
//!
//! let merged = merge_schemas(&base, &local);
//! assert_eq!(merged.len(), 3);
//! assert_eq!(merged.get("name"), Some("name"));
//! ```

use crate::Schema;

/// Merges `overlay` on top of `base` into a new schema.
///
/// Attributes keep the order of first appearance; on a name collision the
/// overlay's data type wins.
pub fn merge_schemas(base: &Schema, overlay: &Schema) -> Schema {
    let mut merged = base.clone();
    merged.overlay(overlay.clone());
    merged
}

impl Schema {
    /// Overlays `other` onto this schema in place (other wins on collisions).
    pub fn overlay(&mut self, other: Schema) {
        self.extend(other.into_attributes());
    }
}

#[cfg(test)]
mod tests {
    use crate::Attribute;

    use super::*;

    fn schema(pairs: &[(&str, &str)]) -> Schema {
        pairs.iter().map(|(n, t)| Attribute::new(*n, *t)).collect()
    }

    #[test]
    fn test_overlay_wins_on_collision() {
        let base = schema(&[("id", "guid"), ("name", "string")]);
        let local = schema(&[("name", "name")]);

        let merged = merge_schemas(&base, &local);
        assert_eq!(merged.get("name"), Some("name"));
        assert_eq!(merged.get("id"), Some("guid"));
    }

    #[test]
    fn test_overlay_appends_new_names_after_inherited() {
        let base = schema(&[("createdOn", "dateTime")]);
        let local = schema(&[("total", "decimal"), ("createdOn", "date")]);

        let merged = merge_schemas(&base, &local);
        assert_eq!(
            merged.names().collect::<Vec<_>>(),
            vec!["createdOn", "total"]
        );
    }

    #[test]
    fn test_merge_with_empty_base_equals_overlay() {
        let local = schema(&[("a", "string"), ("b", "integer")]);
        assert_eq!(merge_schemas(&Schema::new(), &local), local);
    }
}
