//! Parameter declarations and function documentation.

use std::fmt;

use void_value::ValueType;

/// A declared function or method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub ty: ValueType,
    pub description: String,
    pub optional: bool,
    /// String arguments are interpolated before the call.
    pub interpolate: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        ParameterInfo {
            name: name.into(),
            ty,
            description: String::new(),
            optional: false,
            interpolate: false,
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn interpolated(mut self) -> Self {
        self.interpolate = true;
        self
    }
}

/// Introspectable documentation, keyed by function name or by qualified
/// method name (`Class::method`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionDoc {
    pub name: String,
    pub return_type: ValueType,
    pub parameters: Vec<ParameterInfo>,
    pub description: String,
}

impl FunctionDoc {
    pub fn new(name: impl Into<String>, return_type: ValueType) -> Self {
        FunctionDoc {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterInfo>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of parameters a call must supply.
    pub fn required_arity(&self) -> usize {
        self.parameters.iter().filter(|p| !p.optional).count()
    }
}

impl fmt::Display for FunctionDoc {
    /// `name(a: int, b?: string): bool`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let marker = if param.optional { "?" } else { "" };
            write!(f, "{}{marker}: {}", param.name, param.ty)?;
        }
        write!(f, "): {}", self.return_type)
    }
}
