//! Domain constants shared by the model and the resolver.

/// Structured value types whose members are exposed as dotted sub-properties.
pub const VALUE_TYPES: &[&str] = &[
    "QFont",
    "QPoint",
    "QPointF",
    "QSize",
    "QSizeF",
    "QVector3D",
    "QVector2D",
];

/// Package whose export name is preferred when naming a native ancestor.
pub const PREFERRED_EXPORT_PACKAGE: &str = "QtQuick";

/// Pseudo-package under which native-only types are exported.
pub const NATIVE_PSEUDO_PACKAGE: &str = "<cpp>";

/// Default property assumed when a type declares none.
pub const FALLBACK_DEFAULT_PROPERTY: &str = "data";

/// Member type of a property that indirects to another object or property.
pub const ALIAS_MEMBER_TYPE: &str = "alias";

/// Type reported for members whose value carries no usable type.
pub const UNTYPED_MEMBER_TYPE: &str = "var";

/// Positioner base type for components before major version 2.
pub const LEGACY_POSITIONER_TYPE: &str = "<cpp>.QDeclarativeBasePositioner";

/// Positioner base type for components from major version 2 on.
pub const POSITIONER_TYPE: &str = "QtQuick.Positioner";
