use super::*;

#[test]
fn names_round_trip() {
    for ty in ValueType::ALL {
        assert_eq!(ValueType::from_name(ty.name()), ty, "{ty}");
    }
}

#[test]
fn boolean_alias() {
    assert_eq!(ValueType::from_name("boolean"), ValueType::Boolean);
    assert_eq!(ValueType::from_name("integer"), ValueType::Integer);
}

#[test]
fn unknown_name_is_null() {
    assert_eq!(ValueType::from_name("Point"), ValueType::Null);
    assert_eq!(ValueType::from_name(""), ValueType::Null);
}

#[test]
fn storage_mapping() {
    assert_eq!(ValueType::Class.storage(), ValueType::Object);
    assert_eq!(ValueType::Enum.storage(), ValueType::Integer);
    assert_eq!(ValueType::String.storage(), ValueType::String);
    assert!(ValueType::Class.is_compound());
    assert!(ValueType::Object.is_compound());
    assert!(!ValueType::Enum.is_compound());
}

#[test]
fn numeric_tags() {
    assert!(ValueType::Integer.is_numeric());
    assert!(ValueType::Float.is_numeric());
    assert!(!ValueType::Enum.is_numeric());
    assert!(!ValueType::String.is_numeric());
}
