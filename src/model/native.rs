//! Native component descriptors registered by compiled plugins.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{ComponentVersion, PropertyName, TypeName};

/// One entry of a native component's export table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Export {
    pub package: TypeName,
    pub type_name: TypeName,
    pub version: ComponentVersion,
}

impl Export {
    pub fn new(
        package: impl Into<TypeName>,
        type_name: impl Into<TypeName>,
        version: ComponentVersion,
    ) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
            version,
        }
    }

    /// `package.type_name`
    pub fn qualified_name(&self) -> TypeName {
        TypeName::new(format!("{}.{}", self.package, self.type_name))
    }
}

/// A property declared by a native component.
///
/// Properties are writable, non-pointer, non-list scalars unless stated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeProperty {
    pub type_name: TypeName,
    pub writable: bool,
    pub pointer: bool,
    pub list: bool,
}

impl NativeProperty {
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            writable: true,
            pointer: false,
            list: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn pointer(mut self) -> Self {
        self.pointer = true;
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }
}

/// An enumeration declared by a native component.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumDef {
    pub keys: Vec<SmolStr>,
}

impl EnumDef {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// A component type registered natively, with module, class name and version.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeComponent {
    pub class_name: TypeName,
    /// `None` for components registered without a module of their own.
    pub module_name: Option<TypeName>,
    pub version: ComponentVersion,
    /// Class name of the native prototype.
    pub prototype: Option<TypeName>,
    pub default_property: Option<PropertyName>,
    pub exports: Vec<Export>,
    pub properties: IndexMap<PropertyName, NativeProperty>,
    pub enums: IndexMap<TypeName, EnumDef>,
}

impl NativeComponent {
    pub fn new(class_name: impl Into<TypeName>) -> Self {
        Self {
            class_name: class_name.into(),
            module_name: None,
            version: ComponentVersion::UNSPECIFIED,
            prototype: None,
            default_property: None,
            exports: Vec::new(),
            properties: IndexMap::new(),
            enums: IndexMap::new(),
        }
    }

    pub fn with_module(mut self, module: impl Into<TypeName>) -> Self {
        self.module_name = Some(module.into());
        self
    }

    pub fn with_version(mut self, major: i32, minor: i32) -> Self {
        self.version = ComponentVersion::new(major, minor);
        self
    }

    pub fn with_prototype(mut self, class_name: impl Into<TypeName>) -> Self {
        self.prototype = Some(class_name.into());
        self
    }

    pub fn with_default_property(mut self, name: impl Into<PropertyName>) -> Self {
        self.default_property = Some(name.into());
        self
    }

    pub fn with_export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn with_property(
        mut self,
        name: impl Into<PropertyName>,
        property: NativeProperty,
    ) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    pub fn with_enum(mut self, name: impl Into<TypeName>, def: EnumDef) -> Self {
        self.enums.insert(name.into(), def);
        self
    }

    /// `module.class`, or the bare class name without a module.
    pub fn qualified_name(&self) -> TypeName {
        match &self.module_name {
            Some(module) if !module.is_empty() => {
                TypeName::new(format!("{}.{}", module, self.class_name))
            }
            _ => self.class_name.clone(),
        }
    }

    /// Module name, empty when the component registers none.
    pub fn package_name(&self) -> &str {
        self.module_name.as_deref().unwrap_or("")
    }

    pub fn export_in_package(&self, package: &str) -> Option<&Export> {
        self.exports.iter().find(|e| e.package == package)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }
}
