//! Script-visible descriptions of the registries.
//!
//! Every query returns a `ValuePtr` object tree; lists use the array
//! representation (keys `"0".."n-1"`). Unknown names produce an empty object
//! rather than an error, so scripts can probe freely.

use void_value::{object_from_pairs, ObjectMap, ValuePtr};

use super::SymbolContainer;
use crate::params::{FunctionDoc, ParameterInfo};

impl SymbolContainer {
    /// Details of every registered module, ordered by name.
    pub fn list_modules(&self) -> ValuePtr {
        ValuePtr::array(
            self.module_names()
                .iter()
                .map(|name| self.get_module_details(name)),
        )
    }

    pub fn module_exists(&self, name: &str) -> bool {
        self.has_module(name)
    }

    /// `{name, description, classes, functions, variables}`.
    pub fn get_module_details(&self, name: &str) -> ValuePtr {
        let Some(description) = self.module_description(name) else {
            return ValuePtr::object(ObjectMap::new());
        };
        let classes = self
            .class_names()
            .into_iter()
            .filter(|class| self.class_module(class) == Some(name))
            .map(ValuePtr::from);
        let functions = self
            .function_names_by_module(name)
            .into_iter()
            .map(ValuePtr::from);
        ValuePtr::object(object_from_pairs([
            ("name", ValuePtr::from(name)),
            ("description", ValuePtr::from(description)),
            ("classes", ValuePtr::array(classes)),
            ("functions", ValuePtr::array(functions)),
            // Modules do not export variables.
            ("variables", ValuePtr::object(ObjectMap::new())),
        ]))
    }

    /// `{name, return_type, description, module, parameters}` for a
    /// function or a qualified method name.
    pub fn get_function_details(&self, name: &str) -> ValuePtr {
        let Some(doc) = self.function_doc(name) else {
            return ValuePtr::object(ObjectMap::new());
        };
        let details = doc_details(doc);
        details.set_property("module", optional_string(self.function_module(name)));
        details
    }

    /// `{name, parent, module, properties, methods, static_properties}`.
    pub fn get_class_details(&self, name: &str) -> ValuePtr {
        let Some(info) = self.class_info(name) else {
            return ValuePtr::object(ObjectMap::new());
        };
        let properties = info.properties.iter().map(|p| {
            ValuePtr::object(object_from_pairs([
                ("name", ValuePtr::from(p.name.as_str())),
                ("type", ValuePtr::from(p.ty.name())),
                ("private", ValuePtr::from(p.is_private)),
                ("static", ValuePtr::from(p.is_static)),
            ]))
        });
        let methods = info.methods.iter().map(|m| {
            let details = doc_details(&m.doc);
            details.set_property("private", m.is_private);
            details.set_property("native", m.is_native());
            details
        });
        let statics: ObjectMap = info
            .static_properties
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        ValuePtr::object(object_from_pairs([
            ("name", ValuePtr::from(info.name.as_str())),
            ("parent", optional_string(info.parent.as_deref())),
            ("module", optional_string(info.module.as_deref())),
            ("properties", ValuePtr::array(properties)),
            ("methods", ValuePtr::array(methods)),
            ("static_properties", ValuePtr::object(statics)),
        ]))
    }

    pub fn list_functions(&self) -> ValuePtr {
        ValuePtr::array(self.function_names().into_iter().map(ValuePtr::from))
    }

    pub fn list_classes(&self) -> ValuePtr {
        ValuePtr::array(self.class_names().into_iter().map(ValuePtr::from))
    }
}

fn doc_details(doc: &FunctionDoc) -> ValuePtr {
    ValuePtr::object(object_from_pairs([
        ("name", ValuePtr::from(doc.name.as_str())),
        ("return_type", ValuePtr::from(doc.return_type.name())),
        ("description", ValuePtr::from(doc.description.as_str())),
        (
            "parameters",
            ValuePtr::array(doc.parameters.iter().map(parameter_details)),
        ),
    ]))
}

fn parameter_details(param: &ParameterInfo) -> ValuePtr {
    ValuePtr::object(object_from_pairs([
        ("name", ValuePtr::from(param.name.as_str())),
        ("type", ValuePtr::from(param.ty.name())),
        ("description", ValuePtr::from(param.description.as_str())),
        ("optional", ValuePtr::from(param.optional)),
        ("interpolate", ValuePtr::from(param.interpolate)),
    ]))
}

fn optional_string(value: Option<&str>) -> ValuePtr {
    value.map_or_else(ValuePtr::null, ValuePtr::from)
}
