use super::*;
use crate::errors::RuntimeErrorKind;
use pretty_assertions::assert_eq;

fn point(x: i64, y: i64) -> ObjectMap {
    object_from_pairs([("x", x), ("y", y)])
}

// set / get

#[test]
fn set_retags_and_clears_null() {
    let mut value = Value::null_of(ValueType::Integer);
    assert!(value.is_null());
    value.set("hi".to_string());
    assert_eq!(value.value_type(), ValueType::String);
    assert!(!value.is_null());
    assert_eq!(value.get::<String>().unwrap(), "hi");
}

#[test]
fn get_wrong_type_is_mismatch() {
    let value = Value::new(5_i64);
    let err = value.get::<String>().unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::TypeMismatch {
            expected: ValueType::String,
            got: ValueType::Integer,
        }
    );
    assert!(value.get::<f64>().is_err());
    assert!(value.get::<bool>().is_err());
}

#[test]
fn get_on_typed_null_is_null_error() {
    let value = Value::null_of(ValueType::Integer);
    let err = value.get::<i64>().unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::NullValue {
            ty: ValueType::Integer
        }
    );
}

#[test]
fn storage_types_share_accessors() {
    let class = Value::class(point(1, 2));
    assert_eq!(class.get::<ObjectMap>().unwrap().len(), 2);

    let member = Value::enumerator(3);
    assert_eq!(*member.get::<i64>().unwrap(), 3);
    assert_eq!(member.value_type(), ValueType::Enum);
}

#[test]
fn get_mut_edits_in_place() {
    let mut value = Value::new(String::from("ab"));
    value.get_mut::<String>().unwrap().push('c');
    assert_eq!(value.get::<String>().unwrap(), "abc");
}

// null

#[test]
fn null_flag_is_independent_of_tag() {
    let mut value = Value::new(String::from("x"));
    value.set_null();
    assert!(value.is_null());
    assert_eq!(value.value_type(), ValueType::String);
    assert_eq!(value.to_string(), "null");
}

#[test]
fn null_of_special_cases_containers() {
    let text = Value::null_of(ValueType::String);
    assert!(!text.is_null());
    assert_eq!(text.get::<String>().unwrap(), "");

    let object = Value::null_of(ValueType::Object);
    assert!(!object.is_null());
    assert!(object.as_map().unwrap().is_empty());

    let class = Value::null_of(ValueType::Class);
    assert!(!class.is_null());
    assert_eq!(class.value_type(), ValueType::Class);

    for ty in [ValueType::Integer, ValueType::Double, ValueType::Boolean] {
        let value = Value::null_of(ty);
        assert!(value.is_null(), "{ty}");
        assert_eq!(value.value_type(), ty);
    }
}

#[test]
fn set_type_only_on_null() {
    let mut value = Value::null();
    value.set_type(ValueType::Integer).unwrap();
    assert_eq!(value.value_type(), ValueType::Integer);

    let mut value = Value::new(1_i64);
    assert!(value.set_type(ValueType::String).is_err());
    assert_eq!(value.value_type(), ValueType::Integer);
}

// Display

#[test]
fn display_primitives() {
    assert_eq!(Value::new(42_i64).to_string(), "42");
    assert_eq!(Value::new(-7_i64).to_string(), "-7");
    assert_eq!(Value::new(1.5_f64).to_string(), "1.500000");
    assert_eq!(Value::new(0.25_f32).to_string(), "0.250000");
    assert_eq!(Value::new(true).to_string(), "true");
    assert_eq!(Value::new(false).to_string(), "false");
    assert_eq!(Value::new(String::from("raw")).to_string(), "raw");
    assert_eq!(Value::null().to_string(), "null");
    assert_eq!(Value::enumerator(2).to_string(), "2");
}

#[test]
fn display_class_labels() {
    let mut map = point(0, 0);
    map.insert(CLASS_KEY.to_string(), ValuePtr::from("Point"));
    assert_eq!(Value::class(map).to_string(), "[Class Point]");

    assert_eq!(Value::class(point(0, 0)).to_string(), "[Class Object]");

    let mut bad = ObjectMap::new();
    bad.insert(CLASS_KEY.to_string(), ValuePtr::from(3_i64));
    assert_eq!(Value::class(bad).to_string(), "[Class Object]");

    let mut null_name = ObjectMap::new();
    let name = ValuePtr::from("Point");
    name.set_null();
    null_name.insert(CLASS_KEY.to_string(), name);
    assert_eq!(Value::class(null_name).to_string(), "[Invalid Class Object]");

    assert_eq!(Value::new(point(0, 0)).to_string(), "[Object]");
}

#[test]
fn display_never_panics_on_borrowed_class_name() {
    let name = ValuePtr::from("Point");
    let mut map = ObjectMap::new();
    map.insert(CLASS_KEY.to_string(), name.clone());
    let class = Value::class(map);
    let _guard = name.borrow_mut();
    assert_eq!(class.to_string(), "[Invalid Class Object]");
}

// truthiness

#[test]
fn to_bool_rules() {
    assert!(Value::new(1_i64).to_bool().unwrap());
    assert!(!Value::new(0_i64).to_bool().unwrap());
    assert!(!Value::new(0.0_f64).to_bool().unwrap());
    assert!(Value::new(String::from("a")).to_bool().unwrap());
    assert!(!Value::new(String::new()).to_bool().unwrap());
    assert!(!Value::new(ObjectMap::new()).to_bool().unwrap());
    assert!(Value::new(point(1, 1)).to_bool().unwrap());
    assert!(Value::null().to_bool().is_err());
}

// clone vs alias

#[test]
fn value_clone_is_deep() {
    let inner = ValuePtr::object(point(1, 2));
    let outer = Value::new(object_from_pairs([("p", inner.clone())]));
    let copy = outer.clone();

    let copied_inner = copy.as_map().unwrap()["p"].clone();
    assert!(!copied_inner.ptr_eq(&inner));
    copied_inner.set_property("x", 99_i64);

    assert_eq!(inner.property("x").unwrap().get::<i64>().unwrap(), 1);
    assert_eq!(outer, outer.clone());
    assert_ne!(outer, copy);
}

#[test]
fn ptr_clone_aliases() {
    let v = ValuePtr::from(5_i64);
    let a = v.clone();
    a.set(6_i64);
    assert_eq!(v.get::<i64>().unwrap(), 6);
    assert!(a.ptr_eq(&v));

    let c = v.deep_clone();
    c.set(7_i64);
    assert_eq!(v.get::<i64>().unwrap(), 6);
    assert!(!c.ptr_eq(&v));
}

#[test]
fn assign_keeps_aliases_attached() {
    let v = ValuePtr::from(1_i64);
    let alias = v.clone();
    v.assign(Value::new(String::from("now a string")));
    assert_eq!(alias.value_type(), ValueType::String);
}

#[test]
fn deep_clone_of_deep_nesting() {
    let mut node = ValuePtr::from(0_i64);
    for _ in 0..1_000 {
        node = ValuePtr::object(object_from_pairs([("next", node)]));
    }
    let copy = node.deep_clone();
    assert_eq!(copy, node);
}

#[test]
fn self_referential_object_clones_and_compares() {
    let v = ValuePtr::object(object_from_pairs([("n", ValuePtr::from(1))]));
    v.set_property("me", v.clone());

    let copy = v.deep_clone();
    assert!(!copy.ptr_eq(&v));
    assert!(copy.property("me").unwrap().ptr_eq(&copy));
    assert!(copy == v);

    copy.set_property("n", 2_i64);
    assert!(copy != v);
    assert_eq!(v.property("n").unwrap().get::<i64>().unwrap(), 1);

    // Break the cycles so both allocations are freed.
    v.remove_property("me");
    copy.remove_property("me");
}

#[test]
fn deep_clone_keeps_shared_entries_shared() {
    let shared = ValuePtr::from("s");
    let v = ValuePtr::object(object_from_pairs([("a", shared.clone()), ("b", shared)]));
    let copy = v.deep_clone();
    let a = copy.property("a").unwrap();
    assert!(a.ptr_eq(&copy.property("b").unwrap()));
    assert!(!a.ptr_eq(&v.property("a").unwrap()));
}

// object helpers

#[test]
fn set_property_coerces_to_object() {
    let v = ValuePtr::from(3_i64);
    v.set_property("a", true);
    assert_eq!(v.value_type(), ValueType::Object);
    assert!(v.property("a").unwrap().get::<bool>().unwrap());
    assert!(v.remove_property("a").is_some());
    assert!(v.property("a").is_none());
}

#[test]
fn as_class_copies_and_retags() {
    let obj = ValuePtr::object(point(1, 2));
    let class = obj.as_class().unwrap();
    assert_eq!(class.value_type(), ValueType::Class);
    assert_eq!(obj.value_type(), ValueType::Object);
    class.set_property("x", 10_i64);
    assert_eq!(obj.property("x").unwrap().get::<i64>().unwrap(), 1);

    assert!(ValuePtr::from(1_i64).as_class().is_err());
}

#[test]
fn with_map_rejects_scalars_and_nulls() {
    let err = ValuePtr::from(1_i64).with_map(ObjectMap::len).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::TypeMismatch {
            expected: ValueType::Object,
            got: ValueType::Integer,
        }
    );
    let null_obj = ValuePtr::object(ObjectMap::new());
    null_obj.set_null();
    assert!(null_obj.with_map(ObjectMap::len).is_err());
    assert_eq!(
        ValuePtr::object(point(1, 2))
            .with_map_mut(|m| {
                m.clear();
                m.len()
            })
            .unwrap(),
        0
    );
}

// conversions

#[test]
fn from_string_inference() {
    assert!(ValuePtr::from_string("null").is_null());
    assert!(ValuePtr::from_string("true").get::<bool>().unwrap());
    assert!(!ValuePtr::from_string("false").get::<bool>().unwrap());
    assert_eq!(ValuePtr::from_string("42").get::<i64>().unwrap(), 42);
    assert_eq!(ValuePtr::from_string("-3").get::<i64>().unwrap(), -3);
    assert_eq!(ValuePtr::from_string("2.5").get::<f64>().unwrap(), 2.5);
    assert_eq!(ValuePtr::from_string("1e3").get::<f64>().unwrap(), 1000.0);
    assert_eq!(ValuePtr::from_string("inf").value_type(), ValueType::String);
    assert_eq!(
        ValuePtr::from_string("hello").get::<String>().unwrap(),
        "hello"
    );
    assert_eq!(ValuePtr::from_string("").value_type(), ValueType::String);
}

#[test]
fn strict_conversions() {
    assert_eq!(
        ValuePtr::from_string_to_int(" 12 ")
            .unwrap()
            .get::<i64>()
            .unwrap(),
        12
    );
    let err = ValuePtr::from_string_to_int("12abc").unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::InvalidConversion {
            input: "12abc".to_string(),
            target: ValueType::Integer,
        }
    );
    assert_eq!(
        ValuePtr::from_string_to_double("0.5")
            .unwrap()
            .get::<f64>()
            .unwrap(),
        0.5
    );
    assert!(ValuePtr::from_string_to_double("NaN").is_err());
    assert_eq!(
        ValuePtr::from_string_to_float("1.25")
            .unwrap()
            .value_type(),
        ValueType::Float
    );
    assert!(ValuePtr::from_string_to_float("x").is_err());
}

#[test]
fn bool_conversion_is_case_insensitive() {
    for (text, expected) in [("TRUE", true), ("1", true), ("False", false), ("0", false)] {
        assert_eq!(
            ValuePtr::from_string_to_bool(text)
                .unwrap()
                .get::<bool>()
                .unwrap(),
            expected,
            "{text}"
        );
    }
    assert!(ValuePtr::from_string_to_bool("yes").is_err());
}

#[test]
fn array_round_trip_preserves_order() {
    let items: Vec<ValuePtr> = (0..12_i64).map(ValuePtr::from).collect();
    let array = ValuePtr::array(items);
    let back = array.with_map(array_items).unwrap();
    let ints: Vec<i64> = back.iter().map(|v| v.get::<i64>().unwrap()).collect();
    assert_eq!(ints, (0..12).collect::<Vec<_>>());
}
