//! End-to-end behaviour of the runtime core through the public API.

#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use void_symbols::{
    FunctionDoc, Module, ParameterInfo, RuntimeErrorKind, RuntimeResult, SymbolContainer,
    SymbolFactory, ValuePtr, ValueType, VARIABLES_NS,
};
use void_value::{object_from_pairs, HandleArena, NativeHandle};

fn resolve_value(sc: &SymbolContainer, name: &str) -> ValuePtr {
    sc.resolve(VARIABLES_NS, name).unwrap().value().unwrap()
}

#[test]
fn scope_shadowing_scenario() {
    let mut sc = SymbolContainer::new("main").unwrap();
    sc.add(SymbolFactory::create_variable(
        "x",
        ValuePtr::from(5),
        "main",
        ValueType::Integer,
    ))
    .unwrap();

    sc.enter_scope("block");
    sc.add(SymbolFactory::create_variable(
        "x",
        ValuePtr::from("hi"),
        "block",
        ValueType::String,
    ))
    .unwrap();
    assert_eq!(
        resolve_value(&sc, "x").get::<String>().unwrap(),
        "hi".to_string()
    );

    sc.leave_scope();
    assert_eq!(resolve_value(&sc, "x").get::<i64>().unwrap(), 5);
}

#[test]
fn class_default_backfill() {
    let mut sc = SymbolContainer::new("main").unwrap();
    sc.register_class("Point");
    sc.add_property("Point", "x", ValueType::Integer, false, None)
        .unwrap();
    sc.add_property("Point", "y", ValueType::Integer, false, None)
        .unwrap();

    let p = sc
        .make_class_instance(object_from_pairs([("__class__", ValuePtr::from("Point"))]))
        .unwrap();
    assert_eq!(p.property("$x").unwrap().get::<i64>().unwrap(), 0);
    assert_eq!(p.property("$y").unwrap().get::<i64>().unwrap(), 0);
}

#[test]
fn function_dispatch() {
    let mut sc = SymbolContainer::new("main").unwrap();
    sc.register_function(
        "add",
        |_, args| Ok(ValuePtr::from(args[0].get::<i64>()? + args[1].get::<i64>()?)),
        ValueType::Integer,
    );
    sc.register_doc(
        "add",
        FunctionDoc::new("add", ValueType::Integer).with_parameters(vec![
            ParameterInfo::new("a", ValueType::Integer),
            ParameterInfo::new("b", ValueType::Integer),
        ]),
    );

    let sum = sc
        .call_function("add", &[ValuePtr::from(1), ValuePtr::from(2)])
        .unwrap();
    assert_eq!(sum.get::<i64>().unwrap(), 3);
    assert_eq!(
        sc.function_doc("add").unwrap().to_string(),
        "add(a: int, b: int): int"
    );

    let err = sc.call_function("nope", &[]).unwrap_err();
    assert!(matches!(err.kind, RuntimeErrorKind::UnknownFunction { .. }));
}

#[test]
fn registry_idempotence() {
    let mut sc = SymbolContainer::new("main").unwrap();
    sc.register_class("A");
    sc.add_property("A", "p", ValueType::String, false, None)
        .unwrap();
    sc.register_class("A");
    assert_eq!(sc.class_info("A").unwrap().properties.len(), 1);
}

#[test]
fn constant_immutability() {
    let mut sc = SymbolContainer::new("main").unwrap();
    sc.add(SymbolFactory::create_constant(
        "LIMIT",
        ValuePtr::from(10),
        "main",
    ))
    .unwrap();
    let err = sc.assign("LIMIT", ValuePtr::from(11)).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::ImmutableAssignment {
            name: "LIMIT".to_string()
        }
    );
    let limit = sc.get_constant("LIMIT").unwrap().value().unwrap();
    assert_eq!(limit.get::<i64>().unwrap(), 10);
}

#[test]
fn variables_alias_until_cloned() {
    let mut sc = SymbolContainer::new("main").unwrap();
    let shared = ValuePtr::from(1);
    sc.add(SymbolFactory::create_variable(
        "a",
        shared.clone(),
        "main",
        ValueType::Undefined,
    ))
    .unwrap();
    sc.add(SymbolFactory::create_variable(
        "b",
        shared.deep_clone(),
        "main",
        ValueType::Undefined,
    ))
    .unwrap();

    shared.set(2_i64);
    assert_eq!(resolve_value(&sc, "a").get::<i64>().unwrap(), 2);
    assert_eq!(resolve_value(&sc, "b").get::<i64>().unwrap(), 1);
}

struct Files;

#[derive(Debug)]
struct OpenFile {
    path: String,
}

impl Module for Files {
    fn name(&self) -> &str {
        "Files"
    }

    fn register(&self, container: &mut SymbolContainer) -> RuntimeResult<()> {
        container.register_class("File");
        container.add_native_method(
            "File",
            "path",
            |_, args| {
                let handle = NativeHandle::read(&args[0])?;
                Ok(ValuePtr::from(i64::from(handle.index)))
            },
            ValueType::Integer,
            Vec::new(),
        )
    }
}

#[test]
fn native_state_through_handles() {
    let mut sc = SymbolContainer::builder("main")
        .with_module(Box::new(Files))
        .build()
        .unwrap();
    assert_eq!(sc.class_module("File"), Some("Files"));

    let mut arena = HandleArena::new();
    let handle = arena
        .insert(OpenFile {
            path: "/tmp/a".to_string(),
        })
        .unwrap();
    let instance = sc
        .make_class_instance(object_from_pairs([("__class__", ValuePtr::from("File"))]))
        .unwrap();
    handle.attach(&instance);

    let read = NativeHandle::read(&instance).unwrap();
    assert_eq!(arena.get(read).unwrap().path, "/tmp/a");
    assert!(sc.call_method("File", "path", &[instance.clone()]).is_ok());

    arena.remove(read).unwrap();
    let err = arena.get(read).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::StaleHandle);

    sc.remove_module("Files").unwrap();
    assert!(sc.has_class("File"));
}

#[test]
fn call_frames_are_isolated() {
    let mut sc = SymbolContainer::new("main").unwrap();
    sc.add(SymbolFactory::create_variable(
        "g",
        ValuePtr::from(1),
        "main",
        ValueType::Undefined,
    ))
    .unwrap();
    sc.enter_scope("loop");
    sc.add(SymbolFactory::create_variable(
        "i",
        ValuePtr::from(0),
        "loop",
        ValueType::Undefined,
    ))
    .unwrap();

    let frame = sc.enter_function_call_scope("main::f");
    assert!(frame.starts_with("main::f::call_"));
    assert!(sc.get_variable("i").is_none());
    assert!(sc.get_variable("g").is_some());

    sc.leave_scope();
    assert!(sc.scope_table(&frame).is_none());
    assert!(sc.get_variable("i").is_some());
}

#[test]
fn builtins_are_available_on_request() {
    let sc = SymbolContainer::builder("main")
        .with_builtins()
        .build()
        .unwrap();
    let ty = sc
        .call_function("typeof", &[ValuePtr::from(1.5)])
        .unwrap();
    assert_eq!(ty.get::<String>().unwrap(), "double");
    assert!(SymbolContainer::new("main")
        .unwrap()
        .call_function("typeof", &[])
        .is_err());
}

#[test]
fn tracing_init_is_repeatable() {
    void_symbols::init_tracing();
    void_symbols::init_tracing();

    let sc = SymbolContainer::builder("main")
        .with_builtins()
        .build()
        .unwrap();
    assert!(sc.call_function("module_list", &[]).is_ok());
}
