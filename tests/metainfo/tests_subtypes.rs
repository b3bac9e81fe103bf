//! Subtype queries and the version gate.

use std::sync::Arc;

use rstest::rstest;

use metainfo::base::ComponentVersion;
use metainfo::model::{Export, Import, ModelBuilder, NativeComponent, NodeRef, ObjectNode};
use metainfo::{ModelRef, TypeCache};

use crate::helpers::fixtures::{cache, scenario};

#[rstest]
#[case("Module.AbstractButton", -1, -1, true)]
#[case("Module.AbstractButton", 1, 0, true)]
#[case("Module.AbstractButton", 0, 5, true)]
#[case("Module.AbstractButton", 1, 1, false)]
#[case("Module.AbstractButton", 2, 0, false)]
#[case("Module.Button", 1, 0, true)]
#[case("<cpp>.Root", -1, -1, true)]
#[case("QtQuick.Item", -1, -1, false)]
fn test_button_subtypes(
    #[case] type_name: &str,
    #[case] major: i32,
    #[case] minor: i32,
    #[case] expected: bool,
) {
    let model = scenario();
    let button = cache().resolve(&model, "Module.Button", -1, -1);

    assert_eq!(button.is_subclass_of(type_name, major, minor), expected);
}

#[test]
fn test_subtype_answers_are_stable() {
    let model = scenario();
    let cache = cache();
    let button = cache.resolve(&model, "Module.Button", -1, -1);

    for _ in 0..3 {
        assert!(button.is_subclass_of("Module.AbstractButton", 1, 0));
        assert!(!button.is_subclass_of("Module.AbstractButton", 2, 0));
    }
}

#[test]
fn test_export_table_names_match_across_packages() {
    let model = scenario();
    let button = cache().resolve(&model, "Module.Button", -1, -1);

    assert!(button.is_subclass_of("Controls.ButtonBase", -1, -1));
    assert!(!button.is_subclass_of("Controls.AbstractButton", -1, -1));
    assert!(!button.is_subclass_of("Module.ButtonBase", -1, -1));
}

#[test]
fn test_file_components_match_by_exact_name() {
    let model = scenario();
    let cache = cache();
    let fancy = cache.resolve(&model, "FancyButton", -1, -1);

    assert!(fancy.is_file_component());
    assert!(fancy.is_subclass_of("FancyButton", -1, -1));
    assert!(fancy.is_subclass_of("MyButton", -1, -1));
    assert!(fancy.is_subclass_of("Module.Button", 1, 0));
    assert!(fancy.is_subclass_of("<cpp>.Root", -1, -1));
    assert!(!fancy.is_subclass_of("components.MyButton", -1, -1));

    let my_button = cache.resolve(&model, "MyButton", -1, -1);
    assert!(!my_button.is_subclass_of("FancyButton", -1, -1));
}

#[test]
fn test_unversioned_types_agree_on_availability() {
    let model = scenario();
    let cache = cache();

    let my_button = cache.resolve(&model, "MyButton", -1, -1);
    assert!(my_button.version().is_unspecified());
    assert!(!my_button.available_in_version(1, 0));
    assert!(!my_button.is_subclass_of("MyButton", 1, 0));
    assert!(my_button.available_in_version(-1, -1));
    assert!(my_button.is_subclass_of("MyButton", -1, -1));

    let root = cache.resolve(&model, "<cpp>.Root", -1, -1);
    let button = cache.resolve(&model, "Module.Button", -1, -1);
    assert!(!root.available_in_version(1, 0));
    assert!(!button.is_subclass_of("<cpp>.Root", 1, 0));
    assert!(button.is_subclass_of("<cpp>.Root", -1, -1));
}

#[test]
fn test_is_positioner() {
    let model = scenario();
    let cache = cache();

    assert!(cache.resolve(&model, "QtQuick.Row", -1, -1).is_positioner());
    assert!(cache.resolve(&model, "QtQuick.Positioner", -1, -1).is_positioner());
    assert!(!cache.resolve(&model, "QtQuick.Rectangle", -1, -1).is_positioner());
    assert!(!cache.resolve(&model, "Module.Button", -1, -1).is_positioner());
}

fn legacy_model() -> ModelRef {
    let mut builder = ModelBuilder::new();
    let legacy_row = builder.add_object(ObjectNode::new("LegacyRow").with_prototype("Row"));
    builder.add_native(
        NativeComponent::new("QDeclarativeBasePositioner").with_export(Export::new(
            "<cpp>",
            "QDeclarativeBasePositioner",
            ComponentVersion::UNSPECIFIED,
        )),
    );
    builder.add_native(
        NativeComponent::new("QDeclarativeRow")
            .with_module("QtQuick")
            .with_version(1, 0)
            .with_prototype("QDeclarativeBasePositioner")
            .with_export(Export::new("QtQuick", "Row", ComponentVersion::new(1, 0))),
    );
    builder.add_import(Import::library("QtQuick", 1, 0));
    builder.add_import(
        Import::directory("legacy").with_member("LegacyRow", NodeRef::Object(legacy_row)),
    );
    Arc::new(builder.build())
}

#[test]
fn test_legacy_positioner() {
    let model = legacy_model();
    let row = TypeCache::new().resolve(&model, "Row", -1, -1);

    assert_eq!(row.major_version(), 1);
    assert!(row.is_positioner());
}

#[test]
fn test_unversioned_component_uses_legacy_positioner() {
    let model = legacy_model();
    let row = TypeCache::new().resolve(&model, "LegacyRow", -1, -1);

    assert!(row.is_file_component());
    assert_eq!(row.major_version(), -1);
    assert!(row.is_positioner());
}
