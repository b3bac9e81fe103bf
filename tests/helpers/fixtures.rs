//! Model fixtures.
//!
//! The scenario model holds a small native registry and two file components:
//!
//! ```text
//! <cpp>.Root
//!   ├─ Module.AbstractButton 1.0 ─ Module.Button 1.0 ─ MyButton ─ FancyButton
//!   └─ QtQuick.Item 2.0 ─┬─ QtQuick.Rectangle 2.0
//!                        └─ QtQuick.Positioner 2.0 ─ QtQuick.Row 2.0
//! ```

use std::sync::Arc;

use metainfo::base::{ComponentVersion, TextRange, TextSize};
use metainfo::model::{
    EnumDef, Export, Import, ModelBuilder, NativeComponent, NativeProperty, NodeRef, ObjectId,
    ObjectNode, Value,
};
use metainfo::{ModelRef, TypeCache};

pub const MY_BUTTON_FILE: &str = "components/MyButton.qml";

/// Root object text of `MyButton.qml`, after a one-line header.
pub const MY_BUTTON_ROOT: &str = "Button { property string label }";

fn my_button_document() -> String {
    format!("// header\n{MY_BUTTON_ROOT}\n")
}

fn export(package: &str, name: &str, major: i32, minor: i32) -> Export {
    Export::new(package, name, ComponentVersion::new(major, minor))
}

fn natives(builder: &mut ModelBuilder) {
    builder.add_native(
        NativeComponent::new("Root")
            .with_export(export("<cpp>", "Root", -1, -1))
            .with_property("objectName", NativeProperty::new("string")),
    );
    builder.add_native(
        NativeComponent::new("QFont")
            .with_property("family", NativeProperty::new("string"))
            .with_property("pointSize", NativeProperty::new("real"))
            .with_property("bold", NativeProperty::new("bool")),
    );
    builder.add_native(
        NativeComponent::new("IconGroup")
            .with_module("Module")
            .with_property("name", NativeProperty::new("string"))
            .with_property("width", NativeProperty::new("int").read_only()),
    );
    builder.add_native(
        NativeComponent::new("AbstractButton")
            .with_module("Module")
            .with_version(1, 0)
            .with_prototype("Root")
            .with_default_property("contentData")
            .with_export(export("Module", "AbstractButton", 1, 0))
            .with_export(export("Controls", "ButtonBase", 1, 0))
            .with_property("text", NativeProperty::new("string"))
            .with_property("checkable", NativeProperty::new("bool"))
            .with_property("font", NativeProperty::new("QFont"))
            .with_property("icon", NativeProperty::new("IconGroup").read_only().pointer())
            .with_property("alignment", NativeProperty::new("Alignment"))
            .with_enum("Alignment", EnumDef::new(["AlignLeft", "AlignRight"])),
    );
    builder.add_native(
        NativeComponent::new("Button")
            .with_module("Module")
            .with_version(1, 0)
            .with_prototype("AbstractButton")
            .with_export(export("Module", "Button", 1, 0))
            .with_property("flat", NativeProperty::new("bool"))
            .with_property("highlighted", NativeProperty::new("bool").read_only()),
    );
    builder.add_native(
        NativeComponent::new("Item")
            .with_module("QtQuick")
            .with_version(2, 0)
            .with_prototype("Root")
            .with_default_property("data")
            .with_export(export("QtQuick", "Item", 2, 0))
            .with_property("x", NativeProperty::new("real"))
            .with_property("y", NativeProperty::new("real"))
            .with_property("width", NativeProperty::new("real"))
            .with_property("height", NativeProperty::new("real"))
            .with_property("parent", NativeProperty::new("Item").pointer())
            .with_property("data", NativeProperty::new("Item").pointer().list()),
    );
    builder.add_native(
        NativeComponent::new("Rectangle")
            .with_module("QtQuick")
            .with_version(2, 0)
            .with_prototype("Item")
            .with_export(export("QtQuick", "Rectangle", 2, 0))
            .with_property("color", NativeProperty::new("color")),
    );
    builder.add_native(
        NativeComponent::new("Positioner")
            .with_module("QtQuick")
            .with_version(2, 0)
            .with_prototype("Item")
            .with_export(export("QtQuick", "Positioner", 2, 0)),
    );
    builder.add_native(
        NativeComponent::new("Row")
            .with_module("QtQuick")
            .with_version(2, 0)
            .with_prototype("Positioner")
            .with_export(export("QtQuick", "Row", 2, 0))
            .with_property("spacing", NativeProperty::new("real")),
    );
}

/// Builder for the scenario model; tests may extend it before building.
pub fn scenario_builder() -> ModelBuilder {
    let mut builder = ModelBuilder::new();
    natives(&mut builder);

    builder.add_import(Import::library("QtQuick", 2, 0));
    builder.add_import(Import::library("Module", 1, 0));

    // Object ids are assigned in insertion order.
    let my_button = ObjectId::new(0);
    let background = ObjectId::new(1);
    let header_len = TextSize::of("// header\n");
    let range = TextRange::at(header_len, TextSize::of(MY_BUTTON_ROOT));

    builder.add_object(
        ObjectNode::new("MyButton")
            .with_prototype("Button")
            .with_property("label", "string")
            .with_property("checkable", "var")
            .with_alias("labelColor", "background.color")
            .with_alias("background", "background")
            .with_id("background", Value::Node(NodeRef::Object(background)))
            .with_source(MY_BUTTON_FILE, range),
    );
    builder.add_object(ObjectNode::new("Rectangle").with_prototype("Rectangle"));
    let fancy = builder.add_object(
        ObjectNode::new("FancyButton")
            .with_prototype("MyButton")
            .with_property("level", "int"),
    );

    builder.add_import(
        Import::directory("components")
            .with_member("MyButton", NodeRef::Object(my_button))
            .with_member("FancyButton", NodeRef::Object(fancy)),
    );
    builder.add_document(MY_BUTTON_FILE, my_button_document());
    builder
}

pub fn scenario() -> ModelRef {
    Arc::new(scenario_builder().build())
}

/// A fresh cache with the default configuration.
pub fn cache() -> TypeCache {
    TypeCache::new()
}
