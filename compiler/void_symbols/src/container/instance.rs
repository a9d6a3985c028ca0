use void_value::errors::{type_mismatch, unknown_class};
use void_value::{ObjectMap, RuntimeResult, ValuePtr, ValueType, CLASS_KEY};

use super::SymbolContainer;

impl SymbolContainer {
    /// Wrap `map` as a `class` value.
    ///
    /// When the map names its class under `__class__`, every instance
    /// property declared by that class or an ancestor and missing from the
    /// map is filled in, keyed `$name`.
    pub fn make_class_instance(&self, mut map: ObjectMap) -> RuntimeResult<ValuePtr> {
        if let Some(tag) = map.get(CLASS_KEY) {
            let class = class_name(tag)?;
            if !self.has_class(&class) {
                return Err(unknown_class(&class));
            }
            for info in self.lineage(&class) {
                for property in info.properties.iter().filter(|p| !p.is_static) {
                    let key = if property.name.starts_with('$') {
                        property.name.clone()
                    } else {
                        format!("${}", property.name)
                    };
                    if !map.contains_key(&key) {
                        let value = property.initial_value();
                        map.insert(key, value);
                    }
                }
            }
        }
        Ok(ValuePtr::class(map))
    }
}

fn class_name(tag: &ValuePtr) -> RuntimeResult<String> {
    match tag.value_type() {
        ValueType::String => tag.get::<String>(),
        other => Err(type_mismatch(ValueType::String, other)),
    }
}
