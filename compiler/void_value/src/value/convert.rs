//! String parsing and list-shaped object conversions.

use super::{ObjectMap, Value, ValuePtr};
use crate::errors::{invalid_conversion, RuntimeResult};
use crate::value_type::ValueType;

impl ValuePtr {
    /// Infer a value from its textual form.
    ///
    /// Tries, in order: `null`, `true`/`false`, a whole-string integer, a
    /// whole-string float (stored as `double`). Anything else is a string.
    pub fn from_string(text: &str) -> ValuePtr {
        match text {
            "null" => return ValuePtr::null(),
            "true" => return ValuePtr::from(true),
            "false" => return ValuePtr::from(false),
            _ => {}
        }
        if let Ok(int) = text.parse::<i64>() {
            return ValuePtr::from(int);
        }
        if looks_numeric(text) {
            if let Ok(double) = text.parse::<f64>() {
                return ValuePtr::from(double);
            }
        }
        ValuePtr::from(text)
    }

    pub fn from_string_to_int(text: &str) -> RuntimeResult<ValuePtr> {
        text.trim()
            .parse::<i64>()
            .map(ValuePtr::from)
            .map_err(|_| invalid_conversion(text, ValueType::Integer))
    }

    pub fn from_string_to_double(text: &str) -> RuntimeResult<ValuePtr> {
        let trimmed = text.trim();
        if !looks_numeric(trimmed) {
            return Err(invalid_conversion(text, ValueType::Double));
        }
        trimmed
            .parse::<f64>()
            .map(ValuePtr::from)
            .map_err(|_| invalid_conversion(text, ValueType::Double))
    }

    pub fn from_string_to_float(text: &str) -> RuntimeResult<ValuePtr> {
        let trimmed = text.trim();
        if !looks_numeric(trimmed) {
            return Err(invalid_conversion(text, ValueType::Float));
        }
        trimmed
            .parse::<f32>()
            .map(ValuePtr::from)
            .map_err(|_| invalid_conversion(text, ValueType::Float))
    }

    /// Accepts `true`, `false`, `1` and `0`, ignoring ASCII case.
    pub fn from_string_to_bool(text: &str) -> RuntimeResult<ValuePtr> {
        match text.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(ValuePtr::from(true)),
            "false" | "0" => Ok(ValuePtr::from(false)),
            _ => Err(invalid_conversion(text, ValueType::Boolean)),
        }
    }

    /// A list as an `object` keyed by position (`"0"`, `"1"`, ...).
    pub fn array(items: impl IntoIterator<Item = ValuePtr>) -> ValuePtr {
        let map: ObjectMap = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect();
        ValuePtr::new(Value::new(map))
    }
}

/// Entries of a list-shaped map in positional order.
///
/// Keys that are not non-negative integers are skipped.
pub fn array_items(map: &ObjectMap) -> Vec<ValuePtr> {
    let mut indexed: Vec<(usize, &ValuePtr)> = map
        .iter()
        .filter_map(|(key, value)| key.parse::<usize>().ok().map(|index| (index, value)))
        .collect();
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, value)| value.clone()).collect()
}

/// Rejects `inf`, `NaN` and friends, which `str::parse` accepts.
fn looks_numeric(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
}
