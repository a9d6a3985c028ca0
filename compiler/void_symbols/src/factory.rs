//! Convenience constructors for [`Symbol`]s.

use std::rc::Rc;

use void_value::{RuntimeResult, ValuePtr, ValueType};

use crate::params::ParameterInfo;
use crate::symbol::{
    ClassSymbol, ConstantSymbol, EnumSymbol, FunctionBody, FunctionSymbol, MethodSymbol, Symbol,
    SymbolRef, VariableSymbol,
};

pub struct SymbolFactory;

impl SymbolFactory {
    /// `declared_type` of `Undefined` takes the value's own tag.
    pub fn create_variable(
        name: impl Into<String>,
        value: ValuePtr,
        context: impl Into<String>,
        declared_type: ValueType,
    ) -> SymbolRef {
        let declared_type = if declared_type == ValueType::Undefined {
            value.value_type()
        } else {
            declared_type
        };
        Rc::new(Symbol::Variable(VariableSymbol::new(
            name,
            value,
            context,
            declared_type,
        )))
    }

    pub fn create_constant(
        name: impl Into<String>,
        value: ValuePtr,
        context: impl Into<String>,
    ) -> SymbolRef {
        Rc::new(Symbol::Constant(ConstantSymbol::new(name, value, context)))
    }

    pub fn create_function(
        name: impl Into<String>,
        context: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        body: FunctionBody,
        return_type: ValueType,
    ) -> SymbolRef {
        Rc::new(Symbol::Function(FunctionSymbol::new(
            name,
            context,
            parameters,
            body,
            return_type,
        )))
    }

    pub fn create_method(
        name: impl Into<String>,
        context: impl Into<String>,
        class_name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        body: FunctionBody,
        return_type: ValueType,
    ) -> SymbolRef {
        Rc::new(Symbol::Method(MethodSymbol {
            function: FunctionSymbol::new(name, context, parameters, body, return_type),
            class_name: class_name.into(),
        }))
    }

    pub fn create_class(
        name: impl Into<String>,
        context: impl Into<String>,
        parent: Option<String>,
        is_abstract: bool,
    ) -> SymbolRef {
        Rc::new(Symbol::Class(ClassSymbol {
            name: name.into(),
            context: context.into(),
            parent,
            is_abstract,
        }))
    }

    pub fn create_enum<S: AsRef<str>>(
        name: impl Into<String>,
        definitions: &[(S, Option<i64>)],
        context: impl Into<String>,
    ) -> RuntimeResult<SymbolRef> {
        EnumSymbol::new(name, definitions, context).map(|e| Rc::new(Symbol::Enum(e)))
    }
}
