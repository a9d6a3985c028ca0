//! Runtime type tags.

use std::fmt;

/// Type tag carried by every [`Value`](crate::Value).
///
/// The tag is independent of the null flag: a value can be tagged
/// `String` while being logically null.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    Integer,
    Double,
    Float,
    String,
    Boolean,
    Object,
    Class,
    #[default]
    Null,
    Enum,
    Undefined,
}

impl ValueType {
    /// Every tag, in declaration order.
    pub const ALL: [ValueType; 10] = [
        ValueType::Integer,
        ValueType::Double,
        ValueType::Float,
        ValueType::String,
        ValueType::Boolean,
        ValueType::Object,
        ValueType::Class,
        ValueType::Null,
        ValueType::Enum,
        ValueType::Undefined,
    ];

    /// Script-visible name of the tag.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Integer => "int",
            ValueType::Double => "double",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Boolean => "bool",
            ValueType::Object => "object",
            ValueType::Class => "class",
            ValueType::Null => "null",
            ValueType::Enum => "enum",
            ValueType::Undefined => "undefined",
        }
    }

    /// Parse a script-visible type name.
    ///
    /// Unknown names map to `Null`, so a declaration with an unrecognised
    /// type still yields a usable (null) tag.
    pub fn from_name(name: &str) -> ValueType {
        match name {
            "int" | "integer" => ValueType::Integer,
            "double" => ValueType::Double,
            "float" => ValueType::Float,
            "string" => ValueType::String,
            "bool" | "boolean" => ValueType::Boolean,
            "object" => ValueType::Object,
            "class" => ValueType::Class,
            "enum" => ValueType::Enum,
            "undefined" => ValueType::Undefined,
            _ => ValueType::Null,
        }
    }

    /// The tag whose payload representation this tag shares.
    ///
    /// `Class` is stored as an object map and `Enum` as an integer ordinal;
    /// every other tag is its own storage.
    pub fn storage(self) -> ValueType {
        match self {
            ValueType::Class => ValueType::Object,
            ValueType::Enum => ValueType::Integer,
            other => other,
        }
    }

    /// Whether values of this tag are backed by an object map.
    #[inline]
    pub fn is_compound(self) -> bool {
        self.storage() == ValueType::Object
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueType::Integer | ValueType::Double | ValueType::Float
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
