//! Resolver configuration.
//!
//! Controls how document paths are derived from entity references and a few
//! resolution switches. Every field has a default matching the conventional
//! CDM `schemaDocuments` layout, so an empty file is a valid configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! core_document: "wellKnownCDSAttributeGroups{Version}.cdm.json"
//! document_suffix: ".cdm.json"
//! base_marker: "base"
//! version_trait: "is.CDM.entityVersion"
//! forward_base_path: true
//! expand_local_group_references: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Placeholder in [`ResolverConfig::core_document`] replaced by the version.
pub const VERSION_PLACEHOLDER: &str = "{Version}";

/// Settings for schema resolution.
///
/// # Examples
///
/// ```
/// use cdm_schema_loader::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// assert_eq!(
///     config.core_document_name(Some("1.0")),
///     "wellKnownCDSAttributeGroups.1.0.cdm.json"
/// );
/// assert_eq!(
///     config.core_document_name(None),
///     "wellKnownCDSAttributeGroups.cdm.json"
/// );
/// assert_eq!(
///     config.base_document_name("/core/applicationCommon/foundationCommon/base/CdmEntity", Some("2.0")),
///     "CdmEntity.2.0.cdm.json"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// File name template of the core attribute-group document, containing
    /// [`VERSION_PLACEHOLDER`].
    pub core_document: String,
    /// Suffix appended to base entity names to form their file names.
    pub document_suffix: String,
    /// Substring of `extendsEntity` that marks a base (rather than core) entity.
    pub base_marker: String,
    /// Trait reference carrying the entity version.
    pub version_trait: String,
    /// Pass the base directory on to nested base resolutions.
    pub forward_base_path: bool,
    /// Let an entity's own group references resolve against the core
    /// document consulted for its extended entity.
    pub expand_local_group_references: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            core_document: format!("wellKnownCDSAttributeGroups{VERSION_PLACEHOLDER}.cdm.json"),
            document_suffix: ".cdm.json".to_string(),
            base_marker: "base".to_string(),
            version_trait: "is.CDM.entityVersion".to_string(),
            forward_base_path: true,
            expand_local_group_references: false,
        }
    }
}

impl ResolverConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`]/[`LoadError::Io`] if the file cannot
    /// be read, or [`LoadError::Config`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| LoadError::from_io(path, err))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be written, or
    /// [`LoadError::Config`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|err| LoadError::from_io(path, err))?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Core document file name for a given entity version.
    pub fn core_document_name(&self, version: Option<&str>) -> String {
        let replacement = version.map(|v| format!(".{v}")).unwrap_or_default();
        self.core_document.replace(VERSION_PLACEHOLDER, &replacement)
    }

    /// Base document file name: last `/` segment of `extends_entity`, then
    /// `.<version>` when known, then the document suffix.
    pub fn base_document_name(&self, extends_entity: &str, version: Option<&str>) -> String {
        let entity = extends_entity.rsplit('/').next().unwrap_or(extends_entity);
        match version {
            Some(v) => format!("{entity}.{v}{}", self.document_suffix),
            None => format!("{entity}{}", self.document_suffix),
        }
    }

    /// Returns `true` if `extends_entity` refers to a base entity document.
    pub fn is_base_reference(&self, extends_entity: &str) -> bool {
        extends_entity.contains(&self.base_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: ResolverConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let config: ResolverConfig =
            serde_yaml::from_str("forward_base_path: false\nbase_marker: \"/Base/\"\n").unwrap();
        assert!(!config.forward_base_path);
        assert_eq!(config.base_marker, "/Base/");
        assert_eq!(config.document_suffix, ".cdm.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.yaml");

        let config = ResolverConfig {
            expand_local_group_references: true,
            ..ResolverConfig::default()
        };
        config.save(&path).unwrap();

        assert_eq!(ResolverConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.yaml");
        std::fs::write(&path, "forward_base_path: [not, a, bool]").unwrap();

        let err = ResolverConfig::load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }));
    }

    #[test]
    fn test_base_document_name_without_path_segments() {
        let config = ResolverConfig::default();
        assert_eq!(config.base_document_name("CdmEntity", None), "CdmEntity.cdm.json");
    }

    #[test]
    fn test_is_base_reference() {
        let config = ResolverConfig::default();
        assert!(config.is_base_reference("/core/foundationCommon/base/CdmEntity"));
        assert!(!config.is_base_reference("CdmEntity"));
    }
}
