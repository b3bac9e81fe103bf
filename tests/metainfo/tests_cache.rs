//! Cache identity and invalidation.

use std::sync::Arc;

use metainfo::{MetaInfoConfig, ModelRef, TypeCache};

use crate::helpers::fixtures::{cache, scenario, scenario_builder};

#[test]
fn test_same_request_shares_resolution() {
    let model = scenario();
    let cache = cache();

    let first = cache.resolve(&model, "Module.Button", -1, -1);
    let second = cache.resolve(&model, "Module.Button", -1, -1);

    assert!(first.ptr_eq(&second));
    assert!(first.clone().ptr_eq(&first));
}

#[test]
fn test_versions_are_cached_separately() {
    let model = scenario();
    let cache = cache();

    let any = cache.resolve(&model, "QtQuick.Rectangle", -1, -1);
    let exact = cache.resolve(&model, "QtQuick.Rectangle", 2, 0);

    assert!(!any.ptr_eq(&exact));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_clear_rebuilds() {
    let model = scenario();
    let cache = cache();

    let before = cache.resolve(&model, "Module.Button", -1, -1);
    assert!(!cache.is_empty());

    cache.clear();
    assert!(cache.is_empty());

    let after = cache.resolve(&model, "Module.Button", -1, -1);
    assert!(!before.ptr_eq(&after));
    // The old handle keeps working.
    assert!(before.is_valid());
    assert_eq!(before.type_name(), after.type_name());
}

#[test]
fn test_invalid_resolutions_are_not_cached() {
    let model = scenario();
    let cache = cache();

    let first = cache.resolve(&model, "Nowhere.Widget", -1, -1);
    let second = cache.resolve(&model, "Nowhere.Widget", -1, -1);

    assert!(!first.is_valid());
    assert!(!first.ptr_eq(&second));
    assert!(cache.is_empty());
}

#[test]
fn test_new_model_drops_every_entry() {
    let builder = scenario_builder();
    let old: ModelRef = Arc::new(builder.clone().build());
    let cache = cache();

    let before = cache.resolve(&old, "Module.Button", -1, -1);
    cache.resolve(&old, "QtQuick.Rectangle", -1, -1);
    cache.resolve(&old, "MyButton", -1, -1);
    let populated = cache.len();
    assert!(populated >= 3);

    let new: ModelRef = Arc::new(builder.build());
    let after = cache.resolve(&new, "Module.Button", -1, -1);

    assert!(!before.ptr_eq(&after));
    assert_eq!(cache.len(), 1);

    // Back on the old snapshot: everything is rebuilt once more.
    let again = cache.resolve(&old, "Module.Button", -1, -1);
    assert!(!again.ptr_eq(&before));
    assert!(!again.ptr_eq(&after));
}

#[test]
fn test_clones_share_entries() {
    let model = scenario();
    let cache = cache();
    let shared = cache.clone();

    let first = cache.resolve(&model, "QtQuick.Item", -1, -1);
    let second = shared.resolve(&model, "QtQuick.Item", -1, -1);

    assert!(first.ptr_eq(&second));
    assert_eq!(shared.len(), 1);
}

#[test]
fn test_separate_caches_are_independent() {
    let model = scenario();

    let first = TypeCache::new().resolve(&model, "QtQuick.Item", -1, -1);
    let second = TypeCache::new().resolve(&model, "QtQuick.Item", -1, -1);

    assert!(!first.ptr_eq(&second));
}

#[test]
fn test_config_changes_value_types() {
    let model = scenario();
    let config = MetaInfoConfig {
        value_types: Vec::new(),
        ..MetaInfoConfig::default()
    };
    let cache = TypeCache::with_config(config);

    let button = cache.resolve(&model, "Module.Button", -1, -1);

    assert!(button.has_property("font"));
    assert!(!button.has_property("font.bold"));
    assert_eq!(cache.config().fallback_default_property, "data");
}

#[test]
fn test_super_classes_populate_the_cache() {
    let model = scenario();
    let cache = cache();

    let row = cache.resolve(&model, "QtQuick.Row", -1, -1);
    let ancestors = row.super_classes();

    assert_eq!(ancestors.len(), 3);
    assert_eq!(cache.len(), 4);
    assert!(ancestors[0].ptr_eq(&row.direct_super_class()));
}
