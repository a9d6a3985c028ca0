//! Built-in modules.
//!
//! - [`ModuleHelperModule`]: registry introspection (`module_list`,
//!   `module_exists`, `module_info`, `function_info`, `class_info`)
//! - [`VariableHelpersModule`]: `typeof`

mod module_helper;
mod variable_helpers;

pub use module_helper::ModuleHelperModule;
pub use variable_helpers::VariableHelpersModule;

use void_value::errors::{argument_type, arity_mismatch};
use void_value::{RuntimeResult, ValuePtr, ValueType};

/// Reject calls that do not pass exactly `expected` arguments.
fn expect_arity(function: &str, args: &[ValuePtr], expected: usize) -> RuntimeResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity_mismatch(function, expected, args.len()))
    }
}

/// The argument as a string, or `ArgumentType`.
fn string_arg(function: &str, arg: &ValuePtr) -> RuntimeResult<String> {
    match arg.value_type() {
        ValueType::String => arg.get::<String>(),
        other => Err(argument_type(function, ValueType::String.name(), other)),
    }
}
