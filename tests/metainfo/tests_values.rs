//! Property value kinds and coercion.

use rstest::rstest;

use metainfo::metainfo::{PropertyValue, VariantKind};

use crate::helpers::fixtures::{cache, scenario};

#[rstest]
#[case("QtQuick.Rectangle", "color", VariantKind::Color)]
#[case("QtQuick.Rectangle", "width", VariantKind::Double)]
#[case("QtQuick.Rectangle", "objectName", VariantKind::String)]
#[case("QtQuick.Rectangle", "parent", VariantKind::Unknown)]
#[case("Module.Button", "checkable", VariantKind::Bool)]
#[case("Module.Button", "font.pointSize", VariantKind::Double)]
#[case("Module.Button", "icon.width", VariantKind::Int)]
#[case("MyButton", "checkable", VariantKind::UserType)]
#[case("MyButton", "labelColor", VariantKind::Color)]
#[case("MyButton", "missing", VariantKind::Unknown)]
fn test_property_variant_kind(
    #[case] type_name: &str,
    #[case] property: &str,
    #[case] expected: VariantKind,
) {
    let model = scenario();
    let info = cache().resolve(&model, type_name, -1, -1);

    assert_eq!(info.property_variant_kind(property), expected);
}

#[test]
fn test_cast_converts_to_property_kind() {
    let model = scenario();
    let rect = cache().resolve(&model, "QtQuick.Rectangle", -1, -1);

    assert_eq!(
        rect.property_cast_value("width", PropertyValue::Int(10)),
        PropertyValue::Double(10.0)
    );
    assert_eq!(
        rect.property_cast_value("objectName", PropertyValue::Bool(true)),
        PropertyValue::String("true".to_string())
    );
    assert_eq!(
        rect.property_cast_value("color", PropertyValue::String("#00FF00".to_string())),
        PropertyValue::Color("#00ff00".into())
    );
}

#[test]
fn test_cast_falls_back_to_literal() {
    let model = scenario();
    let button = cache().resolve(&model, "Module.Button", -1, -1);

    // Not a boolean: the text is read back as whatever literal it is.
    assert_eq!(
        button.property_cast_value("checkable", PropertyValue::String("12".to_string())),
        PropertyValue::Int(12)
    );
    assert_eq!(
        button.property_cast_value("checkable", PropertyValue::Double(1.5)),
        PropertyValue::Double(1.5)
    );
}

#[test]
fn test_cast_passes_through_untyped_and_enum_values() {
    let model = scenario();
    let cache = cache();

    let my_button = cache.resolve(&model, "MyButton", -1, -1);
    let untyped = PropertyValue::String("anything".to_string());
    assert_eq!(
        my_button.property_cast_value("checkable", untyped.clone()),
        untyped
    );

    let button = cache.resolve(&model, "Module.Button", -1, -1);
    let key = PropertyValue::String("AlignLeft".to_string());
    assert_eq!(button.property_cast_value("alignment", key.clone()), key);

    let list = PropertyValue::List(vec![PropertyValue::Int(1)]);
    assert_eq!(button.property_cast_value("text", list.clone()), list);
}
