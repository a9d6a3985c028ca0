use void_value::errors::arity_mismatch;
use void_value::{RuntimeResult, ValuePtr, ValueType};

use super::string_arg;
use crate::container::SymbolContainer;
use crate::module::Module;
use crate::params::{FunctionDoc, ParameterInfo};

/// `typeof(value)` returns the type name; `typeof(value, "name")` tests it.
pub struct VariableHelpersModule;

impl Module for VariableHelpersModule {
    fn name(&self) -> &str {
        "VariableHelpers"
    }

    fn description(&self) -> &str {
        "Helpers for inspecting variables"
    }

    fn register(&self, container: &mut SymbolContainer) -> RuntimeResult<()> {
        container.register_function("typeof", type_of, ValueType::String);
        container.register_doc(
            "typeof",
            FunctionDoc::new("typeof", ValueType::String)
                .with_parameters(vec![
                    ParameterInfo::new("value", ValueType::Undefined)
                        .describe("The value to inspect"),
                    ParameterInfo::new("type", ValueType::String)
                        .describe("The type to compare against")
                        .optional(),
                ])
                .describe("Get the type of a variable"),
        );
        Ok(())
    }
}

fn type_of(_: &SymbolContainer, args: &[ValuePtr]) -> RuntimeResult {
    match args {
        [value] => Ok(ValuePtr::from(value.value_type().name())),
        [value, expected] => {
            let expected = string_arg("typeof", expected)?;
            Ok(ValuePtr::from(
                value.value_type() == ValueType::from_name(&expected),
            ))
        }
        _ => Err(arity_mismatch("typeof", 1, args.len())
            .with_note("typeof accepts 1 or 2 arguments")),
    }
}
