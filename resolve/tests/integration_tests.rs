use std::path::{Path, PathBuf};

use cdm_schema_core::{Schema, merge_schemas};
use cdm_schema_loader::{LoadError, ResolverConfig, load_document};
use cdm_schema_resolve::core_groups::resolve_core_attributes;
use cdm_schema_resolve::members::parse_local_attributes;
use cdm_schema_resolve::{ResolveError, Resolver, resolve_schema};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Fixture layout
//
//   <root>/entities/Account.cdm.json      extends base CdmEntity (v1.0)
//   <root>/entities/Contact.cdm.json      extends core entity "CdmEntity"
//   <root>/entities/Note.cdm.json         extends nothing
//   <root>/base/CdmEntity.1.0.cdm.json    extends base Ownable
//   <root>/base/Ownable.cdm.json          extends nothing
//   <root>/core/wellKnownCDSAttributeGroups.cdm.json
// ---------------------------------------------------------------------------

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        for sub in ["entities", "base", "core"] {
            std::fs::create_dir_all(root.join(sub)).unwrap();
        }
        let fixture = Self { _dir: dir, root };
        fixture.write_default_documents();
        fixture
    }

    fn write(&self, relative: &str, value: &Value) -> PathBuf {
        let path = self.root.join(relative);
        std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn core_dir(&self) -> PathBuf {
        self.root.join("core")
    }

    fn base_dir(&self) -> PathBuf {
        self.root.join("base")
    }

    fn resolver(&self) -> Resolver {
        Resolver::new(self.core_dir(), self.base_dir())
    }

    fn write_default_documents(&self) {
        self.write(
            "entities/Account.cdm.json",
            &entity_doc(
                "Account",
                Some("/core/applicationCommon/foundationCommon/base/CdmEntity"),
                Some("1.0"),
                json!([
                    {"name": "accountId", "dataType": "entityId"},
                    {"name": "name", "dataType": {"dataTypeReference": "name"}},
                    {
                        "name": "primaryContact",
                        "dataType": "entity",
                        "resolutionGuidance": {
                            "entityByReference": {
                                "foreignKeyAttribute": {"sourceName": "primaryContactId", "dataType": "entityId"}
                            },
                            "addSupportingAttribute": {"name": "primaryContactIdName", "dataType": "string"}
                        }
                    }
                ]),
            ),
        );
        self.write(
            "entities/Contact.cdm.json",
            &entity_doc(
                "Contact",
                Some("CdmEntity"),
                None,
                json!([
                    {"name": "fullName", "dataType": "string"},
                    {"name": "createdOn", "dataType": "date"},
                    "AuditGroup"
                ]),
            ),
        );
        self.write(
            "entities/Note.cdm.json",
            &entity_doc(
                "Note",
                None,
                None,
                json!([{"name": "subject", "dataType": "string"}, {"dataType": "string"}]),
            ),
        );
        self.write(
            "base/CdmEntity.1.0.cdm.json",
            &entity_doc(
                "CdmEntity",
                Some("/core/base/Ownable"),
                None,
                json!([
                    {"name": "createdOn", "dataType": "dateTime"},
                    {"name": "name", "dataType": "string"}
                ]),
            ),
        );
        self.write(
            "base/Ownable.cdm.json",
            &entity_doc(
                "Ownable",
                None,
                None,
                json!([{"name": "ownerId", "dataType": "entityId"}]),
            ),
        );
        self.write(
            "core/wellKnownCDSAttributeGroups.cdm.json",
            &json!({
                "definitions": [
                    {"entityName": "CdmEntity", "hasAttributes": ["CreatedGroup", "OwnerGroup"]},
                    {"attributeGroupName": "CreatedGroup", "members": [
                        {"name": "createdOn", "dataType": "dateTime"},
                        {"name": "createdBy", "dataType": "userId"}
                    ]},
                    {"attributeGroupName": "OwnerGroup", "members": [
                        {
                            "name": "owner",
                            "resolutionGuidance": {
                                "selectsSubAttribute": {
                                    "selectedTypeAttribute": {"name": "ownerIdType", "dataType": "entityName"}
                                }
                            }
                        },
                        "AuditGroup"
                    ]},
                    {"attributeGroupName": "AuditGroup", "members": [
                        {"name": "ModifiedOn", "dataType": "dateTime"}
                    ]}
                ]
            }),
        );
    }
}

fn entity_doc(name: &str, extends: Option<&str>, version: Option<&str>, members: Value) -> Value {
    let mut def = json!({
        "entityName": name,
        "hasAttributes": [{
            "attributeGroupReference": {
                "attributeGroupName": "attributesAddedAtThisScope",
                "members": members
            }
        }]
    });
    if let Some(extends) = extends {
        def["extendsEntity"] = json!(extends);
    }
    if let Some(version) = version {
        def["exhibitsTraits"] = json!([
            {"traitReference": "is.localized.displayedAs", "arguments": [{"value": "x"}]},
            {"traitReference": "is.CDM.entityVersion", "arguments": [{"name": "versionNumber", "value": version}]}
        ]);
    }
    json!({ "jsonSchemaSemanticVersion": "1.0.0", "definitions": [def] })
}

fn pairs(schema: &Schema) -> Vec<(&str, &str)> {
    schema
        .iter()
        .map(|a| (a.name.as_str(), a.data_type.as_str()))
        .collect()
}

fn local(path: &Path) -> Schema {
    parse_local_attributes(&load_document(path).unwrap(), None)
}

// ---------------------------------------------------------------------------
// Extension branches
// ---------------------------------------------------------------------------

#[test]
fn no_extension_equals_local_members() {
    let fx = Fixture::new();
    let path = fx.path("entities/Note.cdm.json");

    let schema = fx.resolver().resolve_schema(&path).unwrap();
    assert_eq!(schema, local(&path));
    assert_eq!(pairs(&schema), vec![("subject", "string")]);
}

#[test]
fn base_chain_merges_with_local_overrides() {
    let fx = Fixture::new();
    let path = fx.path("entities/Account.cdm.json");

    let entity = fx.resolver().resolve(&path).unwrap();
    assert_eq!(
        pairs(&entity.schema),
        vec![
            ("ownerId", "entityId"),
            ("createdOn", "dateTime"),
            ("name", "name"),
            ("accountId", "entityId"),
            ("primaryContact", "entity"),
            ("primaryContactId", "entityId"),
            ("primaryContactIdName", "string"),
        ]
    );
    assert_eq!(entity.identity.version_number.as_deref(), Some("1.0"));
    assert_eq!(
        entity.trace.documents,
        vec![
            path.clone(),
            fx.path("base/CdmEntity.1.0.cdm.json"),
            fx.path("base/Ownable.cdm.json"),
        ]
    );

    let base = fx
        .resolver()
        .resolve_schema(fx.path("base/CdmEntity.1.0.cdm.json"))
        .unwrap();
    assert_eq!(entity.schema, merge_schemas(&base, &local(&path)));
}

#[test]
fn core_extension_merges_groups_with_local_overrides() {
    let fx = Fixture::new();
    let path = fx.path("entities/Contact.cdm.json");

    let entity = fx.resolver().resolve(&path).unwrap();
    assert_eq!(
        pairs(&entity.schema),
        vec![
            ("createdOn", "date"),
            ("createdBy", "userId"),
            ("ownerIdType", "entityName"),
            ("ModifiedOn", "dateTime"),
            ("fullName", "string"),
        ]
    );
    assert_eq!(entity.trace.core_groups, vec!["CreatedGroup", "OwnerGroup"]);
    assert_eq!(
        entity.trace.core_documents,
        vec![fx.path("core/wellKnownCDSAttributeGroups.cdm.json")]
    );

    let core = load_document(fx.path("core/wellKnownCDSAttributeGroups.cdm.json")).unwrap();
    let expected = merge_schemas(&resolve_core_attributes(&core, "CdmEntity"), &local(&path));
    assert_eq!(entity.schema, expected);
}

#[test]
fn versioned_core_document_name() {
    let fx = Fixture::new();
    let path = fx.write(
        "entities/Lead.cdm.json",
        &entity_doc("Lead", Some("CdmEntity"), Some("2.0"), json!([])),
    );

    let err = fx.resolver().resolve(&path).unwrap_err();
    match err {
        ResolveError::Load(LoadError::NotFound { path }) => {
            assert_eq!(path, fx.path("core/wellKnownCDSAttributeGroups.2.0.cdm.json"));
        }
        other => panic!("expected missing versioned core document, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Fatal errors
// ---------------------------------------------------------------------------

#[test]
fn missing_entity_name_never_returns_schema() {
    let fx = Fixture::new();
    let path = fx.write(
        "entities/Anonymous.cdm.json",
        &json!({"definitions": [{"hasAttributes": [{"attributeGroupReference": {
            "members": [{"name": "x", "dataType": "string"}]
        }}]}]}),
    );

    let err = fx.resolver().resolve(&path).unwrap_err();
    assert!(matches!(err, ResolveError::MissingEntityName { .. }));
    assert!(err.to_string().contains("entity name was not found"));
}

#[test]
fn missing_base_entity_name_aborts_parent() {
    let fx = Fixture::new();
    fx.write("base/Ownable.cdm.json", &json!({"definitions": [{}]}));

    let err = fx
        .resolver()
        .resolve(fx.path("entities/Account.cdm.json"))
        .unwrap_err();
    match err {
        ResolveError::MissingEntityName { path } => {
            assert_eq!(path, fx.path("base/Ownable.cdm.json"));
        }
        other => panic!("expected missing entity name, got {other:?}"),
    }
}

#[test]
fn missing_and_malformed_documents() {
    let fx = Fixture::new();

    let err = fx
        .resolver()
        .resolve(fx.path("entities/Nope.cdm.json"))
        .unwrap_err();
    assert!(matches!(err, ResolveError::Load(LoadError::NotFound { .. })));

    let broken = fx.path("entities/Broken.cdm.json");
    std::fs::write(&broken, "{\"definitions\": [").unwrap();
    let err = fx.resolver().resolve(&broken).unwrap_err();
    assert!(matches!(err, ResolveError::Load(LoadError::Parse { .. })));
}

#[test]
fn cyclic_base_chain_fails() {
    let fx = Fixture::new();
    fx.write(
        "base/Ownable.cdm.json",
        &entity_doc("Ownable", Some("/core/base/CdmEntity"), Some("1.0"), json!([])),
    );

    let err = fx
        .resolver()
        .resolve(fx.path("entities/Account.cdm.json"))
        .unwrap_err();
    assert!(matches!(err, ResolveError::ExtensionCycle { .. }));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn resolution_is_idempotent() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    for entity in ["Account", "Contact", "Note"] {
        let path = fx.path(&format!("entities/{entity}.cdm.json"));
        let first = resolver.resolve(&path).unwrap();
        let second = resolver.resolve(&path).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn free_function_matches_resolver() {
    let fx = Fixture::new();
    let path = fx.path("entities/Contact.cdm.json");
    let schema = resolve_schema(&path, fx.core_dir(), fx.base_dir()).unwrap();
    assert_eq!(schema, fx.resolver().resolve_schema(&path).unwrap());
}

#[test]
fn config_file_switches_local_group_expansion() {
    let fx = Fixture::new();
    let config_path = fx.path("resolver.yaml");
    std::fs::write(&config_path, "expand_local_group_references: true\n").unwrap();
    let config = ResolverConfig::load(&config_path).unwrap();

    let path = fx.path("entities/Contact.cdm.json");
    let schema = fx.resolver().with_config(config).resolve_schema(&path).unwrap();
    // "AuditGroup" in the local members now resolves against the core document.
    assert_eq!(schema.get("ModifiedOn"), Some("dateTime"));
    assert_eq!(schema.names().last(), Some("fullName"));
}
