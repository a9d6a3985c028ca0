//! The class registry.
//!
//! Classes are registered once, process-wide, and carry their declared
//! properties, methods (native or scripted) and static state. Lookups that
//! mention inheritance walk the parent chain, bounded by
//! [`ContainerConfig::max_hierarchy_depth`](super::ContainerConfig) and
//! guarded against cycles.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use tracing::debug;
use void_value::errors::{duplicate_member, undefined_symbol, unknown_class, unknown_method};
use void_value::{ObjectMap, RuntimeResult, ValuePtr, ValueType};

use super::{NativeFn, SymbolContainer};
use crate::kind::SCOPE_SEPARATOR;
use crate::params::{FunctionDoc, ParameterInfo};

/// A declared property.
#[derive(Clone, Debug)]
pub struct PropertyInfo {
    pub name: String,
    pub ty: ValueType,
    /// Copied into each new instance (or into static storage).
    pub default: Option<ValuePtr>,
    pub is_private: bool,
    pub is_static: bool,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        PropertyInfo {
            name: name.into(),
            ty,
            default: None,
            is_private: false,
            is_static: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: ValuePtr) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// A fresh value for a new instance or static slot.
    pub fn initial_value(&self) -> ValuePtr {
        self.default
            .as_ref()
            .map_or_else(|| default_value_for(self.ty), ValuePtr::deep_clone)
    }
}

/// A declared method. Without a native body the interpreter runs it.
#[derive(Clone)]
pub struct MethodInfo {
    pub name: String,
    pub qualified_name: String,
    pub return_type: ValueType,
    pub parameters: Vec<ParameterInfo>,
    pub is_private: bool,
    pub native: Option<NativeFn>,
    pub doc: FunctionDoc,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, return_type: ValueType) -> Self {
        let name = name.into();
        MethodInfo {
            doc: FunctionDoc::new(name.clone(), return_type),
            qualified_name: name.clone(),
            name,
            return_type,
            parameters: Vec::new(),
            is_private: false,
            native: None,
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterInfo>) -> Self {
        self.doc.parameters.clone_from(&parameters);
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_native<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SymbolContainer, &[ValuePtr]) -> RuntimeResult + 'static,
    {
        self.native = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.doc.description = description.into();
        self
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn is_native(&self) -> bool {
        self.native.is_some()
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("qualified_name", &self.qualified_name)
            .field("return_type", &self.return_type)
            .field("parameters", &self.parameters)
            .field("is_private", &self.is_private)
            .field("native", &self.native.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClassInfo {
    pub name: String,
    pub parent: Option<String>,
    /// Declaration order.
    pub properties: Vec<PropertyInfo>,
    /// Declaration order.
    pub methods: Vec<MethodInfo>,
    pub static_properties: BTreeMap<String, ValuePtr>,
    pub module: Option<String>,
}

impl ClassInfo {
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        let name = bare(name);
        self.properties.iter().find(|p| bare(&p.name) == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Property names are accepted with or without the `$` sigil.
fn bare(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

/// Zero value for a declared property type.
pub fn default_value_for(ty: ValueType) -> ValuePtr {
    match ty {
        ValueType::Integer => ValuePtr::from(0_i64),
        ValueType::Double => ValuePtr::from(0.0_f64),
        ValueType::Float => ValuePtr::from(0.0_f32),
        ValueType::String => ValuePtr::from(String::new()),
        ValueType::Boolean => ValuePtr::from(false),
        ValueType::Object => ValuePtr::object(ObjectMap::new()),
        other => ValuePtr::null_of(other),
    }
}

impl SymbolContainer {
    /// Register `name`. Registering an existing class is a no-op.
    pub fn register_class(&mut self, name: &str) {
        if self.classes.contains_key(name) {
            return;
        }
        debug!(class = name, module = ?self.current_module, "register class");
        self.classes.insert(
            name.to_string(),
            ClassInfo {
                name: name.to_string(),
                module: self.current_module.clone(),
                ..ClassInfo::default()
            },
        );
    }

    /// Register `name` as a subclass of the already registered `parent`.
    pub fn register_subclass(&mut self, name: &str, parent: &str) -> RuntimeResult<()> {
        if !self.classes.contains_key(parent) {
            return Err(unknown_class(parent).with_note(format!("parent of {name}")));
        }
        self.register_class(name);
        let info = self.class_mut(name)?;
        info.parent = Some(parent.to_string());
        Ok(())
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn class_info(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn class_module(&self, name: &str) -> Option<&str> {
        self.classes.get(name).and_then(|info| info.module.as_deref())
    }

    /// Declare a property. Static properties get their storage initialised
    /// from `default` (or the type's zero value).
    pub fn add_property(
        &mut self,
        class: &str,
        name: &str,
        ty: ValueType,
        is_static: bool,
        default: Option<ValuePtr>,
    ) -> RuntimeResult<()> {
        let mut property = PropertyInfo::new(name, ty);
        property.default = default;
        property.is_static = is_static;
        self.add_property_info(class, property)
    }

    pub fn add_property_info(&mut self, class: &str, property: PropertyInfo) -> RuntimeResult<()> {
        let info = self.class_mut(class)?;
        if info.property(&property.name).is_some() {
            return Err(duplicate_member(class, &property.name));
        }
        if property.is_static {
            info.static_properties
                .insert(bare(&property.name).to_string(), property.initial_value());
        }
        info.properties.push(property);
        Ok(())
    }

    /// Declare a scripted method.
    pub fn add_method(
        &mut self,
        class: &str,
        name: &str,
        return_type: ValueType,
        parameters: Vec<ParameterInfo>,
    ) -> RuntimeResult<()> {
        self.add_method_info(
            class,
            MethodInfo::new(name, return_type).with_parameters(parameters),
        )
    }

    /// Declare a method with a native body.
    pub fn add_native_method<F>(
        &mut self,
        class: &str,
        name: &str,
        callback: F,
        return_type: ValueType,
        parameters: Vec<ParameterInfo>,
    ) -> RuntimeResult<()>
    where
        F: Fn(&SymbolContainer, &[ValuePtr]) -> RuntimeResult + 'static,
    {
        self.add_method_info(
            class,
            MethodInfo::new(name, return_type)
                .with_parameters(parameters)
                .with_native(callback),
        )
    }

    /// Declare a method and document it under `Class::method`.
    pub fn add_method_info(&mut self, class: &str, mut method: MethodInfo) -> RuntimeResult<()> {
        let info = self.class_mut(class)?;
        if info.method(&method.name).is_some() {
            return Err(duplicate_member(class, &method.name));
        }
        method.qualified_name = format!("{class}{SCOPE_SEPARATOR}{}", method.name);
        method.doc.name.clone_from(&method.qualified_name);
        let qualified = method.qualified_name.clone();
        let doc = method.doc.clone();
        debug!(method = %qualified, native = method.is_native(), "register method");
        info.methods.push(method);
        self.register_doc(&qualified, doc);
        Ok(())
    }

    /// Declared on `class` or inherited.
    pub fn has_method(&self, class: &str, method: &str) -> bool {
        self.find_method(class, method).is_some()
    }

    /// Declared on `class` or inherited.
    pub fn has_property(&self, class: &str, property: &str) -> bool {
        self.find_property(class, property).is_some()
    }

    pub fn property_type(&self, class: &str, property: &str) -> RuntimeResult<ValueType> {
        self.find_property(class, property)
            .map(|p| p.ty)
            .ok_or_else(|| self.missing_member(class, property))
    }

    pub fn method_return_type(&self, class: &str, method: &str) -> RuntimeResult<ValueType> {
        self.find_method(class, method)
            .map(|m| m.return_type)
            .ok_or_else(|| self.missing_method(class, method))
    }

    pub fn method_parameters(&self, class: &str, method: &str) -> RuntimeResult<&[ParameterInfo]> {
        self.find_method(class, method)
            .map(|m| m.parameters.as_slice())
            .ok_or_else(|| self.missing_method(class, method))
    }

    /// Own methods of `class`, in declaration order.
    pub fn method_names(&self, class: &str) -> RuntimeResult<Vec<String>> {
        let info = self.classes.get(class).ok_or_else(|| unknown_class(class))?;
        Ok(info.methods.iter().map(|m| m.name.clone()).collect())
    }

    /// `false` for unknown methods.
    pub fn is_method_private(&self, class: &str, method: &str) -> bool {
        self.find_method(class, method).is_some_and(|m| m.is_private)
    }

    /// `false` for unknown properties.
    pub fn is_property_private(&self, class: &str, property: &str) -> bool {
        self.find_property(class, property)
            .is_some_and(|p| p.is_private)
    }

    /// Invoke a native method, searching `class` and then its ancestors.
    #[tracing::instrument(level = "debug", skip(self, args), fields(argc = args.len()))]
    pub fn call_method(&self, class: &str, method: &str, args: &[ValuePtr]) -> RuntimeResult {
        if !self.classes.contains_key(class) {
            return Err(unknown_class(class));
        }
        let callback = self
            .find_method(class, method)
            .and_then(|m| m.native.clone())
            .ok_or_else(|| unknown_method(class, method))?;
        callback(self, args)
    }

    /// Alias of a static property, looked up through the ancestors.
    pub fn static_property(&self, class: &str, property: &str) -> RuntimeResult {
        if !self.classes.contains_key(class) {
            return Err(unknown_class(class));
        }
        self.lineage(class)
            .into_iter()
            .find_map(|info| info.static_properties.get(bare(property)))
            .cloned()
            .ok_or_else(|| undefined_symbol(&format!("{class}{SCOPE_SEPARATOR}{property}")))
    }

    /// Write a static property. An inherited slot is updated in place so
    /// the declaring class and its subclasses stay in sync.
    pub fn set_static_property(
        &mut self,
        class: &str,
        property: &str,
        value: ValuePtr,
    ) -> RuntimeResult<()> {
        let owner = self
            .lineage(class)
            .into_iter()
            .find(|info| info.static_properties.contains_key(bare(property)))
            .map_or_else(|| class.to_string(), |info| info.name.clone());
        let info = self.class_mut(&owner)?;
        info.static_properties
            .insert(bare(property).to_string(), value);
        Ok(())
    }

    pub fn has_static_property(&self, class: &str, property: &str) -> bool {
        self.lineage(class)
            .into_iter()
            .any(|info| info.static_properties.contains_key(bare(property)))
    }

    pub fn delete_static_property(&mut self, class: &str, property: &str) -> RuntimeResult<()> {
        self.class_mut(class)?.static_properties.remove(bare(property));
        Ok(())
    }

    pub fn clear_static_properties(&mut self, class: &str) -> RuntimeResult<()> {
        self.class_mut(class)?.static_properties.clear();
        Ok(())
    }

    /// `class` followed by its ancestors, nearest first. Stops at an
    /// unregistered parent, a cycle, or the configured depth.
    pub(super) fn lineage(&self, class: &str) -> Vec<&ClassInfo> {
        let mut chain = Vec::new();
        let mut visited = FxHashSet::default();
        let mut next = Some(class);
        while let Some(name) = next {
            if chain.len() > self.config.max_hierarchy_depth || !visited.insert(name) {
                break;
            }
            let Some(info) = self.classes.get(name) else {
                break;
            };
            chain.push(info);
            next = info.parent.as_deref();
        }
        chain
    }

    fn find_method(&self, class: &str, method: &str) -> Option<&MethodInfo> {
        self.lineage(class)
            .into_iter()
            .find_map(|info| info.method(method))
    }

    fn find_property(&self, class: &str, property: &str) -> Option<&PropertyInfo> {
        self.lineage(class)
            .into_iter()
            .find_map(|info| info.property(property))
    }

    fn class_mut(&mut self, class: &str) -> RuntimeResult<&mut ClassInfo> {
        self.classes
            .get_mut(class)
            .ok_or_else(|| unknown_class(class))
    }

    #[cold]
    fn missing_method(&self, class: &str, method: &str) -> void_value::RuntimeError {
        if self.classes.contains_key(class) {
            unknown_method(class, method)
        } else {
            unknown_class(class)
        }
    }

    #[cold]
    fn missing_member(&self, class: &str, member: &str) -> void_value::RuntimeError {
        if self.classes.contains_key(class) {
            undefined_symbol(&format!("{class}{SCOPE_SEPARATOR}{member}"))
        } else {
            unknown_class(class)
        }
    }
}
