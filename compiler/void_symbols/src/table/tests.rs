use super::*;
use crate::factory::SymbolFactory;
use crate::kind::{CONSTANTS_NS, FUNCTIONS_NS, VARIABLES_NS};
use pretty_assertions::assert_eq;
use void_value::{ValuePtr, ValueType};

fn var(name: &str, value: i64) -> SymbolRef {
    SymbolFactory::create_variable(name, ValuePtr::from(value), "test", ValueType::Undefined)
}

fn names(symbols: &[SymbolRef]) -> Vec<&str> {
    symbols.iter().map(|s| s.name()).collect()
}

#[test]
fn define_then_get() {
    let mut table = SymbolTable::new();
    table.define(VARIABLES_NS, var("x", 1));
    let found = table.get(VARIABLES_NS, "x").unwrap();
    assert_eq!(found.value().unwrap().get::<i64>().unwrap(), 1);
    assert!(table.get(CONSTANTS_NS, "x").is_none());
}

#[test]
fn last_write_wins() {
    let mut table = SymbolTable::new();
    table.define(VARIABLES_NS, var("x", 1));
    table.define(VARIABLES_NS, var("x", 2));
    assert_eq!(table.len(), 1);
    let found = table.get(VARIABLES_NS, "x").unwrap();
    assert_eq!(found.value().unwrap().get::<i64>().unwrap(), 2);
}

#[test]
fn lookup_walks_ancestors() {
    let root = TableRef::new(SymbolTable::new());
    root.borrow_mut().define(VARIABLES_NS, var("g", 1));
    let middle = TableRef::new(SymbolTable::with_parent(root.clone()));
    let leaf = SymbolTable::with_parent(middle.clone());

    assert!(leaf.exists(VARIABLES_NS, "g"));
    assert!(leaf.get_local(VARIABLES_NS, "g").is_none());
    assert!(!leaf.exists(VARIABLES_NS, "missing"));
}

#[test]
fn local_shadows_parent() {
    let root = TableRef::new(SymbolTable::new());
    root.borrow_mut().define(VARIABLES_NS, var("x", 1));
    let mut child = SymbolTable::with_parent(root.clone());
    child.define(VARIABLES_NS, var("x", 2));

    let found = child.get(VARIABLES_NS, "x").unwrap();
    assert_eq!(found.value().unwrap().get::<i64>().unwrap(), 2);
    let outer = root.borrow().get(VARIABLES_NS, "x").unwrap();
    assert_eq!(outer.value().unwrap().get::<i64>().unwrap(), 1);
}

#[test]
fn listing_is_local_and_sorted() {
    let root = TableRef::new(SymbolTable::new());
    root.borrow_mut().define(VARIABLES_NS, var("outer", 0));
    let mut table = SymbolTable::with_parent(root);
    table.define(VARIABLES_NS, var("b", 2));
    table.define(VARIABLES_NS, var("a", 1));
    table.define(VARIABLES_NS, var("ab", 3));

    assert_eq!(names(&table.list_all(VARIABLES_NS)), vec!["a", "ab", "b"]);
    assert_eq!(
        names(&table.list_with_prefix(VARIABLES_NS, "a")),
        vec!["a", "ab"]
    );
    assert!(table.list_all(FUNCTIONS_NS).is_empty());
}

#[test]
fn remove_and_clear() {
    let mut table = SymbolTable::new();
    table.define(VARIABLES_NS, var("x", 1));
    table.define(VARIABLES_NS, var("y", 2));
    table.define(CONSTANTS_NS, var("C", 3));

    assert!(table.remove(VARIABLES_NS, "x").is_some());
    assert!(table.remove(VARIABLES_NS, "x").is_none());
    assert_eq!(
        table.namespaces(),
        vec![CONSTANTS_NS.to_string(), VARIABLES_NS.to_string()]
    );

    table.clear(VARIABLES_NS);
    assert_eq!(table.namespaces(), vec![CONSTANTS_NS.to_string()]);

    table.clear_all();
    assert!(table.is_empty());
}

#[test]
fn clear_all_keeps_parent() {
    let root = TableRef::new(SymbolTable::new());
    root.borrow_mut().define(VARIABLES_NS, var("g", 1));
    let mut child = SymbolTable::with_parent(root.clone());
    child.define(VARIABLES_NS, var("l", 1));
    child.clear_all();

    assert!(child.exists(VARIABLES_NS, "g"));
    assert!(child.parent().is_some_and(|p| p.ptr_eq(&root)));
}

#[test]
fn symbols_grouped_by_namespace() {
    let mut table = SymbolTable::new();
    table.define(VARIABLES_NS, var("v", 1));
    table.define(CONSTANTS_NS, var("c", 2));
    let listed: Vec<(String, String)> = table
        .symbols()
        .into_iter()
        .map(|(ns, s)| (ns, s.name().to_string()))
        .collect();
    assert_eq!(
        listed,
        vec![
            (CONSTANTS_NS.to_string(), "c".to_string()),
            (VARIABLES_NS.to_string(), "v".to_string()),
        ]
    );
}

proptest::proptest! {
    #[test]
    fn innermost_definition_shadows(depth in 1_usize..24, shadow_at in 0_usize..24) {
        let root = TableRef::new(SymbolTable::new());
        root.borrow_mut().define(VARIABLES_NS, var("global", -1));
        let mut tables = vec![root];
        for level in 1..depth {
            let parent = tables[level - 1].clone();
            tables.push(TableRef::new(SymbolTable::with_parent(parent)));
        }
        let shadow_at = shadow_at % depth;
        for (level, table) in tables[..=shadow_at].iter().enumerate() {
            table
                .borrow_mut()
                .define(VARIABLES_NS, var("x", i64::try_from(level).unwrap()));
        }

        let innermost = tables[depth - 1].borrow();
        let x = innermost.get(VARIABLES_NS, "x").unwrap();
        proptest::prop_assert_eq!(
            x.value().unwrap().get::<i64>().unwrap(),
            i64::try_from(shadow_at).unwrap()
        );
        proptest::prop_assert!(innermost.exists(VARIABLES_NS, "global"));
    }
}
