//! Output formatting for resolved entities.

use cdm_schema_core::Schema;
use serde::Serialize;

use crate::report::ResolvedEntity;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Numbered, aligned attribute listing.
    #[default]
    Table,
    Json,
    Yaml,
    Markdown,
}

#[derive(Serialize)]
struct EntityView<'a> {
    entity_name: &'a str,
    version_number: Option<&'a str>,
    extends_entity: Option<&'a str>,
    attribute_count: usize,
    attributes: &'a Schema,
}

impl<'a> From<&'a ResolvedEntity> for EntityView<'a> {
    fn from(entity: &'a ResolvedEntity) -> Self {
        Self {
            entity_name: entity.entity_name(),
            version_number: entity.identity.version_number.as_deref(),
            extends_entity: entity.identity.extends_entity.as_deref(),
            attribute_count: entity.attribute_count(),
            attributes: &entity.schema,
        }
    }
}

/// Formats a resolved entity in the requested output format.
pub fn format_entity(entity: &ResolvedEntity, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Table => Ok(entity_to_table(entity)),
        OutputFormat::Json => serde_json::to_string_pretty(&EntityView::from(entity))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(&EntityView::from(entity))
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Markdown => Ok(entity_to_markdown(entity)),
    }
}

/// Header line followed by one `index. name : type` line per attribute.
///
/// Indices are right-aligned to the width of the attribute count and names
/// are padded to the longest name.
fn entity_to_table(entity: &ResolvedEntity) -> String {
    let mut out = format!(
        "Number of attributes in the schema {}, version {}: {}\n",
        entity.entity_name(),
        entity.identity.version_label(),
        entity.attribute_count()
    );
    out.push_str(&schema_to_table(&entity.schema));
    out
}

fn schema_to_table(schema: &Schema) -> String {
    let name_width = schema.longest_name();
    let index_width = schema.len().to_string().len();

    let mut out = String::new();
    for (i, attribute) in schema.iter().enumerate() {
        out.push_str(&format!(
            "{:>index_width$}. {:<name_width$} : {}\n",
            i + 1,
            attribute.name,
            attribute.data_type
        ));
    }
    out
}

fn entity_to_markdown(entity: &ResolvedEntity) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", entity.entity_name()));
    out.push_str(&format!(
        "**Version:** {}\n\n",
        entity.identity.version_label()
    ));
    if let Some(extends) = &entity.identity.extends_entity {
        out.push_str(&format!("**Extends:** `{extends}`\n\n"));
    }

    out.push_str(&format!(
        "**Attributes:** {}\n\n",
        entity.attribute_count()
    ));

    if !entity.schema.is_empty() {
        out.push_str("| # | Attribute | Data Type |\n");
        out.push_str("|---|-----------|-----------|\n");
        for (i, attribute) in entity.schema.iter().enumerate() {
            out.push_str(&format!(
                "| {} | `{}` | {} |\n",
                i + 1,
                attribute.name,
                attribute.data_type
            ));
        }
    }

    out
}
