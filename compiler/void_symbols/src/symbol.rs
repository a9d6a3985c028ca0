//! The symbol sum type.
//!
//! One variant per kind, each carrying its own data. Use sites match
//! exhaustively, so a new kind is a compile-time-checked addition.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;

use void_value::errors::{duplicate_member, immutable_assignment, wrong_symbol_kind};
use void_value::{RuntimeResult, ValuePtr, ValueType};

use crate::kind::SymbolKind;
use crate::params::ParameterInfo;

/// Shared symbol handle; tables and callers hold the same symbol.
pub type SymbolRef = Rc<Symbol>;

#[derive(Debug)]
pub enum Symbol {
    Variable(VariableSymbol),
    Constant(ConstantSymbol),
    Function(FunctionSymbol),
    Method(MethodSymbol),
    Class(ClassSymbol),
    Enum(EnumSymbol),
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Variable(_) => SymbolKind::Variable,
            Symbol::Constant(_) => SymbolKind::Constant,
            Symbol::Function(_) => SymbolKind::Function,
            Symbol::Method(_) => SymbolKind::Method,
            Symbol::Class(_) => SymbolKind::Class,
            Symbol::Enum(_) => SymbolKind::Enum,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable(s) => &s.name,
            Symbol::Constant(s) => &s.name,
            Symbol::Function(s) => &s.name,
            Symbol::Method(s) => &s.function.name,
            Symbol::Class(s) => &s.name,
            Symbol::Enum(s) => &s.name,
        }
    }

    /// Scope the symbol was defined in.
    pub fn context(&self) -> &str {
        match self {
            Symbol::Variable(s) => &s.context,
            Symbol::Constant(s) => &s.context,
            Symbol::Function(s) => &s.context,
            Symbol::Method(s) => &s.function.context,
            Symbol::Class(s) => &s.context,
            Symbol::Enum(s) => &s.context,
        }
    }

    /// Bound value of a variable or constant (an alias, not a copy).
    pub fn value(&self) -> Option<ValuePtr> {
        match self {
            Symbol::Variable(s) => Some(s.value()),
            Symbol::Constant(s) => Some(s.value()),
            _ => None,
        }
    }

    /// Rebind the value. Only variables accept this.
    pub fn set_value(&self, value: ValuePtr) -> RuntimeResult<()> {
        match self {
            Symbol::Variable(s) => {
                s.set_value(value);
                Ok(())
            }
            Symbol::Constant(s) => s.set_value(value),
            other => Err(wrong_symbol_kind(
                other.name(),
                SymbolKind::Variable.name(),
                other.kind().name(),
            )),
        }
    }

    pub fn as_variable(&self) -> Option<&VariableSymbol> {
        match self {
            Symbol::Variable(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&ConstantSymbol> {
        match self {
            Symbol::Constant(s) => Some(s),
            _ => None,
        }
    }

    /// Function data of a function or method.
    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match self {
            Symbol::Function(s) => Some(s),
            Symbol::Method(s) => Some(&s.function),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodSymbol> {
        match self {
            Symbol::Method(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassSymbol> {
        match self {
            Symbol::Class(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumSymbol> {
        match self {
            Symbol::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Multi-line description used by scope dumps.
    pub fn dump(&self) -> String {
        let mut out = format!(
            "  {} name: '{}'\n    Context: {}",
            self.kind(),
            self.name(),
            self.context()
        );
        // Writing to a String cannot fail.
        let _ = match self {
            Symbol::Variable(s) => {
                let value = s.value();
                write!(
                    out,
                    "\n    Type: {}\n    Value: '{value}'",
                    value.value_type()
                )
            }
            Symbol::Constant(s) => write!(
                out,
                "\n    Type: {}\n    Value: '{}'",
                s.value.value_type(),
                s.value
            ),
            Symbol::Function(s) => write!(out, "\n    ReturnType: {}", s.return_type),
            Symbol::Method(s) => write!(
                out,
                "\n    Class: {}\n    ReturnType: {}",
                s.class_name, s.function.return_type
            ),
            Symbol::Class(s) => {
                let parent = s
                    .parent
                    .as_deref()
                    .map(|p| format!("\n    Parent Class: {p}"))
                    .unwrap_or_default();
                let abstract_marker = if s.is_abstract {
                    "\n    Abstract: true"
                } else {
                    ""
                };
                write!(out, "{parent}{abstract_marker}")
            }
            Symbol::Enum(s) => {
                let mut r = write!(out, "\n    Enumerators: {{");
                for (name, ordinal) in &s.enumerators {
                    r = r.and_then(|()| write!(out, "\n      {name}: {ordinal}"));
                }
                r.and_then(|()| write!(out, "\n    }}"))
            }
        };
        out
    }
}

/// A mutable binding.
#[derive(Debug)]
pub struct VariableSymbol {
    pub name: String,
    pub context: String,
    pub declared_type: ValueType,
    value: RefCell<ValuePtr>,
}

impl VariableSymbol {
    pub fn new(
        name: impl Into<String>,
        value: ValuePtr,
        context: impl Into<String>,
        declared_type: ValueType,
    ) -> Self {
        VariableSymbol {
            name: name.into(),
            context: context.into(),
            declared_type,
            value: RefCell::new(value),
        }
    }

    pub fn value(&self) -> ValuePtr {
        self.value.borrow().clone()
    }

    /// Rebind to `value`. Aliases of the previous value are unaffected.
    pub fn set_value(&self, value: ValuePtr) {
        *self.value.borrow_mut() = value;
    }
}

/// An immutable binding.
#[derive(Debug)]
pub struct ConstantSymbol {
    pub name: String,
    pub context: String,
    value: ValuePtr,
}

impl ConstantSymbol {
    pub fn new(name: impl Into<String>, value: ValuePtr, context: impl Into<String>) -> Self {
        ConstantSymbol {
            name: name.into(),
            context: context.into(),
            value,
        }
    }

    pub fn value(&self) -> ValuePtr {
        self.value.clone()
    }

    /// Always fails with `ImmutableAssignment`.
    pub fn set_value(&self, _value: ValuePtr) -> RuntimeResult<()> {
        Err(immutable_assignment(&self.name))
    }
}

/// Where a function's behaviour lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionBody {
    /// Source text, run by the interpreter.
    Script(String),
    /// Dispatched through the container's function registry.
    Native,
}

#[derive(Debug)]
pub struct FunctionSymbol {
    pub name: String,
    pub context: String,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: ValueType,
    pub body: FunctionBody,
}

impl FunctionSymbol {
    pub fn new(
        name: impl Into<String>,
        context: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        body: FunctionBody,
        return_type: ValueType,
    ) -> Self {
        FunctionSymbol {
            name: name.into(),
            context: context.into(),
            parameters,
            return_type,
            body,
        }
    }

    pub fn is_native(&self) -> bool {
        self.body == FunctionBody::Native
    }
}

/// A function owned by a class.
#[derive(Debug)]
pub struct MethodSymbol {
    pub function: FunctionSymbol,
    pub class_name: String,
}

impl MethodSymbol {
    /// `Class::method`
    pub fn qualified_name(&self) -> String {
        format!(
            "{}{}{}",
            self.class_name,
            crate::kind::SCOPE_SEPARATOR,
            self.function.name
        )
    }
}

#[derive(Debug)]
pub struct ClassSymbol {
    pub name: String,
    pub context: String,
    pub parent: Option<String>,
    pub is_abstract: bool,
}

/// A named set of integer-valued enumerators.
#[derive(Debug)]
pub struct EnumSymbol {
    pub name: String,
    pub context: String,
    pub enumerators: BTreeMap<String, i64>,
}

impl EnumSymbol {
    /// Enumerators without an explicit value continue from the previous one
    /// (starting at 0). Duplicate enumerator names are rejected.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        definitions: &[(S, Option<i64>)],
        context: impl Into<String>,
    ) -> RuntimeResult<Self> {
        let name = name.into();
        let mut enumerators = BTreeMap::new();
        let mut next = 0_i64;
        for (enumerator, explicit) in definitions {
            let enumerator = enumerator.as_ref();
            let ordinal = explicit.unwrap_or(next);
            if enumerators.insert(enumerator.to_string(), ordinal).is_some() {
                return Err(duplicate_member(&name, enumerator));
            }
            next = ordinal.wrapping_add(1);
        }
        Ok(EnumSymbol {
            name,
            context: context.into(),
            enumerators,
        })
    }

    pub fn ordinal(&self, enumerator: &str) -> Option<i64> {
        self.enumerators.get(enumerator).copied()
    }

    pub fn has_enumerator(&self, enumerator: &str) -> bool {
        self.enumerators.contains_key(enumerator)
    }

    /// The enumerator as a script value.
    pub fn value_of(&self, enumerator: &str) -> Option<ValuePtr> {
        self.ordinal(enumerator).map(ValuePtr::enumerator)
    }
}
