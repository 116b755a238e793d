//! Reads degrade to partial records instead of failing.

use mongolia_content::{ContentStore, MemoryStore, PropertyValue, StoreError};
use mongolia_integration_tests::{mapper, FlakyStore};
use mongolia_mapper::{IssueKind, MapError, MapIssue, Record};
use proptest::prelude::*;

fn product_node(store: &mut MemoryStore) -> mongolia_content::NodeId {
    let root = store.root();
    let node = store.add_node(root, "product", "shop:product").unwrap();
    store.set_property(node, "sku", "P-7".into()).unwrap();
    store.set_property(node, "stock", 12i64.into()).unwrap();
    node
}

proptest! {
    #[test]
    fn extra_properties_are_ignored(name in "x[a-z]{1,12}", value in any::<i64>()) {
        let mapper = mapper();
        let mut store = MemoryStore::new();
        let node = product_node(&mut store);
        store.set_property(node, &name, value.into()).unwrap();

        let mapped = mapper.read(&store, node, "Product", None).unwrap();
        prop_assert_eq!(mapped.value.get_str("sku"), Some("P-7"));
        prop_assert_eq!(mapped.value.get_integer("stock"), Some(12));
        prop_assert_eq!(mapped.value.len(), 2);
        prop_assert_eq!(mapped.issues, vec![MapIssue::new(name, IssueKind::UnknownField)]);
    }
}

#[test]
fn mismatched_element_structure_yields_partial_records() {
    let mapper = mapper();
    let mut store = MemoryStore::new();
    let product = product_node(&mut store);
    let variants = store.add_node(product, "variants", "mgnl:contentNode").unwrap();

    // Shaped like a Product rather than a Variant.
    let odd = store.add_node(variants, "odd", "shop:product").unwrap();
    store.set_property(odd, "sku", "nested".into()).unwrap();
    store.set_property(odd, "size", 3i64.into()).unwrap();
    store.set_property(odd, "label", PropertyValue::Double(1.5)).unwrap();
    let deeper = store.add_node(odd, "variants", "mgnl:contentNode").unwrap();
    store.add_node(deeper, "inner", "mgnl:contentNode").unwrap();

    let good = store.add_node(variants, "good", "mgnl:contentNode").unwrap();
    store.set_property(good, "label", "fine".into()).unwrap();

    let mapped = mapper.read(&store, product, "Product", None).unwrap();
    let elements = mapped.value.get_children("variants").unwrap();
    assert_eq!(elements.len(), 2);

    let odd = &elements[0];
    assert_eq!(odd.type_name(), "Variant");
    assert_eq!(odd.get_integer("size"), Some(3));
    assert!(!odd.is_set("label"));
    assert_eq!(elements[1].get_str("label"), Some("fine"));

    let paths: Vec<&str> = mapped.issues.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["variants/odd/label", "variants/odd/sku", "variants/odd/variants"]
    );
    assert!(matches!(
        mapped.issues[0].kind,
        IssueKind::UnsupportedType(_)
    ));
    assert!(mapped.strict().is_err());
}

#[test]
fn wrongly_typed_scalars_are_skipped() {
    let mapper = mapper();
    let mut store = MemoryStore::new();
    let root = store.root();
    let node = store.add_node(root, "p", "test:plain").unwrap();
    store.set_property(node, "name", "ok".into()).unwrap();
    store.set_property(node, "count", "seven".into()).unwrap();
    store.set_property(node, "active", 1i64.into()).unwrap();
    store.set_property(node, "stamp", 5_000_000_000i64.into()).unwrap();

    let mapped = mapper.read(&store, node, "Plain", None).unwrap();
    assert_eq!(mapped.value.get_str("name"), Some("ok"));
    assert_eq!(mapped.value.len(), 1);
    assert_eq!(mapped.issues.len(), 3);
    assert!(mapped
        .issues
        .iter()
        .all(|i| matches!(i.kind, IssueKind::TypeMismatch { .. })));
}

#[test]
fn integer_overflow_is_reported() {
    let mapper = mapper();
    let mut store = MemoryStore::new();
    let root = store.root();
    let node = store.add_node(root, "p", "test:plain").unwrap();
    store.set_property(node, "count", (i64::from(i32::MAX) + 1).into()).unwrap();

    let mapped = mapper.read(&store, node, "Plain", None).unwrap();
    assert!(!mapped.value.is_set("count"));
    assert_eq!(
        mapped.issues,
        vec![MapIssue::new(
            "count",
            IssueKind::OutOfRange(i64::from(i32::MAX) + 1)
        )]
    );
}

#[test]
fn unreadable_root_properties_fail_the_read() {
    let mapper = mapper();
    let mut inner = MemoryStore::new();
    let node = product_node(&mut inner);
    let mut store = FlakyStore::new(inner);
    store.fail_properties(node);

    let err = mapper.read(&store, node, "Product", None).unwrap_err();
    assert!(matches!(err, MapError::Store(StoreError::Backend(_))));
}

#[test]
fn unreadable_element_is_skipped() {
    let mapper = mapper();
    let mut inner = MemoryStore::new();
    let product = product_node(&mut inner);
    let variants = inner.add_node(product, "variants", "mgnl:contentNode").unwrap();
    let broken = inner.add_node(variants, "broken", "mgnl:contentNode").unwrap();
    let fine = inner.add_node(variants, "fine", "mgnl:contentNode").unwrap();
    inner.set_property(fine, "size", 2i64.into()).unwrap();

    let mut store = FlakyStore::new(inner);
    store.fail_properties(broken);

    let mapped = mapper.read(&store, product, "Product", None).unwrap();
    let elements = mapped.value.get_children("variants").unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].get_integer("size"), Some(2));
    assert_eq!(mapped.issues.len(), 1);
    assert_eq!(mapped.issues[0].path, "variants/broken");
    assert!(matches!(mapped.issues[0].kind, IssueKind::ElementFailed(_)));
}

#[test]
fn unlistable_collection_is_reported() {
    let mapper = mapper();
    let mut inner = MemoryStore::new();
    let product = product_node(&mut inner);
    let variants = inner.add_node(product, "variants", "mgnl:contentNode").unwrap();
    inner.add_node(variants, "v", "mgnl:contentNode").unwrap();

    let mut store = FlakyStore::new(inner);
    store.fail_children(variants);

    let mapped = mapper.read(&store, product, "Product", None).unwrap();
    assert!(!mapped.value.is_set("variants"));
    assert_eq!(mapped.value.get_str("sku"), Some("P-7"));
    assert_eq!(mapped.issues.len(), 1);
    assert_eq!(mapped.issues[0].path, "variants");
    assert!(matches!(mapped.issues[0].kind, IssueKind::Store(_)));
}

#[test]
fn failed_property_write_keeps_going() {
    let mapper = mapper();
    let mut store = FlakyStore::new(MemoryStore::new());
    store.fail_writes_of("count");

    let record = Record::new(mapper.schema("Plain").unwrap())
        .unwrap()
        .with("name", "kept")
        .unwrap()
        .with("count", 4)
        .unwrap()
        .with("active", true)
        .unwrap();

    let root = store.root();
    let written = mapper.write(&mut store, &record, root, "p", "test:plain").unwrap();
    assert_eq!(written.issues.len(), 1);
    assert_eq!(written.issues[0].path, "count");

    let node = written.value;
    assert_eq!(store.property(node, "name").unwrap(), Some("kept".into()));
    assert_eq!(store.property(node, "active").unwrap(), Some(true.into()));
    assert_eq!(store.property(node, "count").unwrap(), None);
    assert!(written.strict().is_err());
}
