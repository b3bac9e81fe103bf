//! Assertion helpers for resolved types.

use metainfo::NodeMetaInfo;

/// Assert a handle resolved, reporting the resolution error otherwise.
pub fn assert_valid(info: &NodeMetaInfo) {
    assert!(
        info.is_valid(),
        "Expected '{}' to resolve, got {:?}",
        info.type_name(),
        info.error()
    );
}

/// Assert the ancestors as `name@major.minor` strings.
pub fn assert_super_classes(info: &NodeMetaInfo, expected: &[&str]) {
    let actual: Vec<String> = info
        .super_classes()
        .iter()
        .map(|ancestor| format!("{}@{}", ancestor.type_name(), ancestor.version()))
        .collect();
    assert_eq!(
        actual, expected,
        "Unexpected super classes of '{}'",
        info.type_name()
    );
}

/// Names of all properties, in collection order.
pub fn property_names(info: &NodeMetaInfo) -> Vec<String> {
    info.property_names().map(|name| name.to_string()).collect()
}
