//! Writes update existing nodes in place and create missing ones.

use mongolia_content::{ContentStore, MemoryStore, StoreError};
use mongolia_integration_tests::{mapper, store_with_a_b};
use mongolia_mapper::{MapError, Record, TreeMapper};

fn product(mapper: &TreeMapper, sku: &str, stock: i32) -> Record {
    Record::new(mapper.schema("Product").unwrap())
        .unwrap()
        .with("sku", sku)
        .unwrap()
        .with("stock", stock)
        .unwrap()
}

#[test]
fn existing_node_is_updated_in_place() {
    let mapper = mapper();
    let (mut store, a, b) = store_with_a_b();
    let before = store.len();

    let written = mapper
        .write(&mut store, &product(&mapper, "S1", 5), a, "b", "other:type")
        .unwrap();
    assert_eq!(written.value, b);
    assert_eq!(store.len(), before);
    assert_eq!(store.primary_type(b).unwrap(), "shop:product");
    assert_eq!(store.node(a, "b[2]").unwrap(), None);

    mapper
        .write(&mut store, &product(&mapper, "S2", 6), a, "b", "other:type")
        .unwrap();
    let record = mapper.read(&store, b, "Product", None).unwrap().value;
    assert_eq!(record.get_str("sku"), Some("S2"));
    assert_eq!(record.get_integer("stock"), Some(6));
}

#[test]
fn missing_node_is_created_with_the_type_label() {
    let mapper = mapper();
    let (mut store, a, _) = store_with_a_b();

    let written = mapper
        .write(&mut store, &product(&mapper, "S3", 1), a, "c", "shop:product")
        .unwrap();
    let c = written.value;
    assert_eq!(store.node(a, "c").unwrap(), Some(c));
    assert_eq!(store.name(c).unwrap(), "c");
    assert_eq!(store.primary_type(c).unwrap(), "shop:product");
    assert_eq!(store.path(c).unwrap(), "/a/c");
}

#[test]
fn relative_path_reaches_existing_descendants() {
    let mapper = mapper();
    let (mut store, _, b) = store_with_a_b();
    let root = store.root();

    let written = mapper
        .write(&mut store, &product(&mapper, "S4", 2), root, "a/b", "x:y")
        .unwrap();
    assert_eq!(written.value, b);
}

#[test]
fn missing_intermediate_fails_the_write() {
    let mapper = mapper();
    let (mut store, a, _) = store_with_a_b();
    let before = store.len();

    let err = mapper
        .write(&mut store, &product(&mapper, "S5", 3), a, "missing/d", "shop:product")
        .unwrap_err();
    assert!(matches!(err, MapError::Store(StoreError::PathNotFound(_))));
    assert_eq!(store.len(), before);
}

#[test]
fn write_keeps_properties_it_does_not_own() {
    let mapper = mapper();
    let (mut store, a, b) = store_with_a_b();
    store.set_property(b, "title_de", "Titel".into()).unwrap();
    store.set_property(b, "mgnl:lastModifiedBy", "editor".into()).unwrap();

    mapper
        .write(&mut store, &product(&mapper, "S6", 9), a, "b", "shop:product")
        .unwrap();
    assert_eq!(store.property(b, "title_de").unwrap(), Some("Titel".into()));
    assert!(store.has_property(b, "mgnl:lastModifiedBy").unwrap());
}

#[test]
fn fresh_store_round_trip_through_the_root() {
    let mapper = mapper();
    let mut store = MemoryStore::new();
    let root = store.root();
    let node = mapper
        .write(&mut store, &product(&mapper, "S7", 0), root, "p", "shop:product")
        .unwrap()
        .value;

    let record = mapper.read(&store, node, "Product", None).unwrap().value;
    assert_eq!(record, product(&mapper, "S7", 0));
}
