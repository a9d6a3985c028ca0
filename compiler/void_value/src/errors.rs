//! Runtime error types.
//!
//! Every failure raised by the value model and the symbol registries is a
//! [`RuntimeError`] carrying a structured [`RuntimeErrorKind`]. Errors are
//! built through the `#[cold]` factory functions below, which fill in both
//! the kind and the human-readable message.
//!
//! Nothing in the runtime core recovers from these; they propagate with `?`
//! to whichever layer decides the policy.

use crate::value::ValuePtr;
use crate::value_type::ValueType;
use std::fmt;

/// Result of a runtime operation. Defaults to producing a value.
pub type RuntimeResult<T = ValuePtr> = Result<T, RuntimeError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    // Value access
    TypeMismatch {
        expected: ValueType,
        got: ValueType,
    },
    NullValue {
        ty: ValueType,
    },
    InvalidConversion {
        input: String,
        target: ValueType,
    },

    // Symbols
    UndefinedSymbol {
        name: String,
    },
    ImmutableAssignment {
        name: String,
    },
    WrongSymbolKind {
        name: String,
        expected: String,
        got: String,
    },
    UnknownScope {
        name: String,
    },

    // Registries
    UnknownFunction {
        name: String,
    },
    UnknownClass {
        name: String,
    },
    UnknownMethod {
        class: String,
        method: String,
    },
    UnknownModule {
        name: String,
    },
    DuplicateMember {
        class: String,
        member: String,
    },

    // Native call convention
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    ArgumentType {
        name: String,
        expected: String,
        got: ValueType,
    },

    // Native state
    StaleHandle,

    Custom {
        message: String,
    },
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, got } => {
                write!(f, "bad cast: expected {expected}, got {got}")
            }
            Self::NullValue { ty } => write!(f, "attempted to read a null {ty} value"),
            Self::InvalidConversion { input, target } => {
                write!(f, "cannot convert '{input}' to {target}")
            }

            Self::UndefinedSymbol { name } => write!(f, "undefined symbol: {name}"),
            Self::ImmutableAssignment { name } => {
                write!(f, "cannot assign to constant: {name}")
            }
            Self::WrongSymbolKind {
                name,
                expected,
                got,
            } => write!(f, "symbol {name} is a {got}, expected a {expected}"),
            Self::UnknownScope { name } => write!(f, "scope does not exist: {name}"),

            Self::UnknownFunction { name } => write!(f, "function not found: {name}"),
            Self::UnknownClass { name } => write!(f, "class not found: {name}"),
            Self::UnknownMethod { class, method } => {
                write!(f, "method not found: {class}::{method}")
            }
            Self::UnknownModule { name } => write!(f, "module not found: {name}"),
            Self::DuplicateMember { class, member } => {
                write!(f, "{class} already declares {member}")
            }

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::ArgumentType {
                name,
                expected,
                got,
            } => write!(f, "{name} expects a {expected} argument, got {got}"),

            Self::StaleHandle => write!(f, "native handle is stale or foreign"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Runtime error.
#[derive(Clone, Debug)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    /// Equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Secondary context, outermost last.
    pub notes: Vec<String>,
}

impl RuntimeError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: RuntimeErrorKind::Custom {
                message: message.clone(),
            },
            message,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: RuntimeErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {}

// Value access

#[cold]
pub fn type_mismatch(expected: ValueType, got: ValueType) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::TypeMismatch { expected, got })
}

/// A read against a value whose tag matches but which holds no data.
#[cold]
pub fn null_value(ty: ValueType) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::NullValue { ty })
}

#[cold]
pub fn invalid_conversion(input: &str, target: ValueType) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::InvalidConversion {
        input: input.to_string(),
        target,
    })
}

// Symbols

#[cold]
pub fn undefined_symbol(name: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UndefinedSymbol {
        name: name.to_string(),
    })
}

#[cold]
pub fn immutable_assignment(name: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::ImmutableAssignment {
        name: name.to_string(),
    })
}

/// A symbol was handed to an operation that only accepts another kind.
#[cold]
pub fn wrong_symbol_kind(name: &str, expected: &str, got: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::WrongSymbolKind {
        name: name.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn unknown_scope(name: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnknownScope {
        name: name.to_string(),
    })
}

// Registries

#[cold]
pub fn unknown_function(name: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_class(name: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnknownClass {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_method(class: &str, method: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnknownMethod {
        class: class.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn unknown_module(name: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnknownModule {
        name: name.to_string(),
    })
}

/// A class member (property, method, enumerator) declared twice.
#[cold]
pub fn duplicate_member(class: &str, member: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::DuplicateMember {
        class: class.to_string(),
        member: member.to_string(),
    })
}

// Native call convention

/// Wrong number of arguments passed to a native callback.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Wrong argument type passed to a native callback.
#[cold]
pub fn argument_type(name: &str, expected: &str, got: ValueType) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::ArgumentType {
        name: name.to_string(),
        expected: expected.to_string(),
        got,
    })
}

// Native state

#[cold]
pub fn stale_handle() -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::StaleHandle)
}
