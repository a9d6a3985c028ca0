use void_value::{RuntimeResult, ValuePtr, ValueType};

use super::{expect_arity, string_arg};
use crate::container::SymbolContainer;
use crate::module::Module;
use crate::params::{FunctionDoc, ParameterInfo};

/// Script access to the module, function and class registries.
pub struct ModuleHelperModule;

impl Module for ModuleHelperModule {
    fn name(&self) -> &str {
        "ModuleHelper"
    }

    fn description(&self) -> &str {
        "Inspect loaded modules, functions and classes"
    }

    fn register(&self, container: &mut SymbolContainer) -> RuntimeResult<()> {
        container.register_function(
            "module_list",
            |sc, args| {
                expect_arity("module_list", args, 0)?;
                Ok(sc.list_modules())
            },
            ValueType::Object,
        );
        container.register_doc(
            "module_list",
            FunctionDoc::new("module_list", ValueType::Object)
                .describe("List every loaded module with its classes and functions"),
        );

        lookup(
            container,
            "module_exists",
            ValueType::Boolean,
            "Check whether a module is loaded",
            |sc, name| ValuePtr::from(sc.module_exists(name)),
        );
        lookup(
            container,
            "module_info",
            ValueType::Object,
            "Describe one module; empty object if it is not loaded",
            SymbolContainer::get_module_details,
        );
        lookup(
            container,
            "function_info",
            ValueType::Object,
            "Describe a function or a Class::method",
            SymbolContainer::get_function_details,
        );
        lookup(
            container,
            "class_info",
            ValueType::Object,
            "Describe a class",
            SymbolContainer::get_class_details,
        );
        Ok(())
    }
}

/// Register a one-string-argument query.
fn lookup(
    container: &mut SymbolContainer,
    function: &'static str,
    return_type: ValueType,
    description: &str,
    query: fn(&SymbolContainer, &str) -> ValuePtr,
) {
    container.register_function(
        function,
        move |sc, args| {
            expect_arity(function, args, 1)?;
            let name = string_arg(function, &args[0])?;
            Ok(query(sc, &name))
        },
        return_type,
    );
    container.register_doc(
        function,
        FunctionDoc::new(function, return_type)
            .with_parameters(vec![
                ParameterInfo::new("name", ValueType::String).describe("Name to look up")
            ])
            .describe(description),
    );
}
