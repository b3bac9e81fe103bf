//! Property value kinds and coercion of editor values.

use std::fmt;

use smol_str::SmolStr;

/// Value kind a declared property type maps to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariantKind {
    String,
    Color,
    Int,
    Url,
    Double,
    Bool,
    Date,
    /// Untyped or indirect: `var`, `variant`, `alias`.
    UserType,
    /// A type with no value kind of its own, such as an object type.
    Unknown,
}

impl VariantKind {
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "string" | "QString" => VariantKind::String,
            "color" | "QColor" => VariantKind::Color,
            "int" | "uint" => VariantKind::Int,
            "url" | "QUrl" => VariantKind::Url,
            "real" | "double" | "float" | "qreal" => VariantKind::Double,
            "bool" | "boolean" => VariantKind::Bool,
            "date" | "QDate" => VariantKind::Date,
            "alias" | "var" | "variant" | "QVariant" => VariantKind::UserType,
            _ => VariantKind::Unknown,
        }
    }
}

/// A value as edited in a property editor.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    /// `#rrggbb` or `#aarrggbb`
    Color(SmolStr),
    Url(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Parse a literal the way a property editor would read typed text.
    pub fn from_literal(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed {
            "true" => return PropertyValue::Bool(true),
            "false" => return PropertyValue::Bool(false),
            _ => {}
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return PropertyValue::Int(int);
        }
        if let Ok(double) = trimmed.parse::<f64>() {
            return PropertyValue::Double(double);
        }
        if is_color_literal(trimmed) {
            return PropertyValue::Color(SmolStr::new(trimmed.to_ascii_lowercase()));
        }
        PropertyValue::String(text.to_string())
    }

    /// Convert to `kind`, or `None` when the value has no such form.
    pub fn convert(&self, kind: &VariantKind) -> Option<PropertyValue> {
        match (kind, self) {
            (VariantKind::String, PropertyValue::List(_)) => None,
            (VariantKind::String, value) => Some(PropertyValue::String(value.to_string())),

            (VariantKind::Int, PropertyValue::Int(i)) => Some(PropertyValue::Int(*i)),
            (VariantKind::Int, PropertyValue::Double(d)) if d.is_finite() => {
                Some(PropertyValue::Int(d.round() as i64))
            }
            (VariantKind::Int, PropertyValue::Bool(b)) => Some(PropertyValue::Int(i64::from(*b))),
            (VariantKind::Int, PropertyValue::String(s)) => {
                s.trim().parse().ok().map(PropertyValue::Int)
            }

            (VariantKind::Double, PropertyValue::Double(d)) => Some(PropertyValue::Double(*d)),
            (VariantKind::Double, PropertyValue::Int(i)) => Some(PropertyValue::Double(*i as f64)),
            (VariantKind::Double, PropertyValue::String(s)) => {
                s.trim().parse().ok().map(PropertyValue::Double)
            }

            (VariantKind::Bool, PropertyValue::Bool(b)) => Some(PropertyValue::Bool(*b)),
            (VariantKind::Bool, PropertyValue::Int(i)) => Some(PropertyValue::Bool(*i != 0)),
            (VariantKind::Bool, PropertyValue::String(s)) => match s.trim() {
                "true" => Some(PropertyValue::Bool(true)),
                "false" => Some(PropertyValue::Bool(false)),
                _ => None,
            },

            (VariantKind::Color, PropertyValue::Color(c)) => Some(PropertyValue::Color(c.clone())),
            (VariantKind::Color, PropertyValue::String(s)) if is_color_literal(s.trim()) => Some(
                PropertyValue::Color(SmolStr::new(s.trim().to_ascii_lowercase())),
            ),

            (VariantKind::Url, PropertyValue::Url(u)) => Some(PropertyValue::Url(u.clone())),
            (VariantKind::Url, PropertyValue::String(s)) => Some(PropertyValue::Url(s.clone())),

            (VariantKind::UserType, value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) | PropertyValue::Url(s) => f.write_str(s),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Double(d) => write!(f, "{d}"),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Color(c) => f.write_str(c),
            PropertyValue::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

fn is_color_literal(text: &str) -> bool {
    let Some(hex) = text.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
