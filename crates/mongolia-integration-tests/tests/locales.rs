//! Per-locale overrides on translatable fields.

use std::sync::{Arc, Barrier};

use mongolia_content::{ContentStore, MemoryStore, NodeId};
use mongolia_i18n::{Locale, LocaleConfig, LocaleProvider, SharedLocales, StaticLocales};
use mongolia_integration_tests::{locale, mapper, mapper_with, registry};
use mongolia_mapper::{MapperConfig, Record, TreeMapper};
use proptest::prelude::*;

/// Write a product with a canonical title, then add an override for `editor_locale`.
fn product_with_override(store: &mut MemoryStore, mapper: &TreeMapper, editor_locale: Locale) -> NodeId {
    let record = Record::new(mapper.schema("Product").unwrap())
        .unwrap()
        .with("sku", "P-1")
        .unwrap()
        .with("title", "canonical")
        .unwrap();
    let root = store.root();
    let node = mapper.write(store, &record, root, "product", "shop:product").unwrap().value;

    let key = mapper.config().override_name("title", editor_locale);
    store
        .set_property(node, &key, format!("title in {}", editor_locale).into())
        .unwrap();
    node
}

fn non_default_locale() -> impl Strategy<Value = Locale> {
    "[a-z]{2}"
        .prop_filter("not the default locale", |code| code != "en")
        .prop_map(|code| Locale::parse(&code).unwrap())
}

proptest! {
    #[test]
    fn other_locales_see_the_canonical_value(a in non_default_locale(), b in non_default_locale()) {
        prop_assume!(a != b);
        let mapper = mapper();
        let mut store = MemoryStore::new();
        let node = product_with_override(&mut store, &mapper, a);

        let in_b = mapper.read(&store, node, "Product", Some(b)).unwrap().value;
        prop_assert_eq!(in_b.get_str("title"), Some("canonical"));

        let in_a = mapper.read(&store, node, "Product", Some(a)).unwrap().value;
        let expected = format!("title in {}", a);
        prop_assert_eq!(in_a.get_str("title"), Some(expected.as_str()));
    }
}

#[test]
fn default_locale_reads_canonical_even_with_override_present() {
    let mapper = mapper();
    let mut store = MemoryStore::new();
    let node = product_with_override(&mut store, &mapper, locale("de"));

    let record = mapper
        .read(&store, node, "Product", Some(Locale::DEFAULT))
        .unwrap()
        .value;
    assert_eq!(record.get_str("title"), Some("canonical"));
}

#[test]
fn override_without_canonical_leaves_field_unset() {
    let mapper = mapper();
    let mut store = MemoryStore::new();
    let root = store.root();
    let node = store.add_node(root, "product", "shop:product").unwrap();
    store.set_property(node, "title_de", "nur deutsch".into()).unwrap();

    let mapped = mapper.read(&store, node, "Product", Some(locale("de"))).unwrap();
    assert!(!mapped.value.is_set("title"));
    assert!(mapped.is_clean());
}

#[test]
fn shared_provider_follows_the_request_locale() {
    let locales = Arc::new(SharedLocales::default());
    let mapper = TreeMapper::new(Arc::new(registry()), Arc::clone(&locales) as Arc<dyn LocaleProvider>);
    let mut store = MemoryStore::new();
    let node = product_with_override(&mut store, &mapper, locale("fr"));

    {
        let _request = locales.set_current(locale("fr"));
        let record = mapper.read(&store, node, "Product", None).unwrap().value;
        assert_eq!(record.get_str("title"), Some("title in fr"));
    }

    let record = mapper.read(&store, node, "Product", None).unwrap().value;
    assert_eq!(record.get_str("title"), Some("canonical"));
}

#[test]
fn configured_fallback_changes_which_locale_is_canonical() {
    let config = LocaleConfig {
        current: locale("en"),
        fallback: locale("de"),
    };
    let mapper = mapper_with(config.provider());
    let mut store = MemoryStore::new();
    let node = product_with_override(&mut store, &mapper, locale("en"));

    // With German as the default, English is the override locale.
    let record = mapper.read(&store, node, "Product", None).unwrap().value;
    assert_eq!(record.get_str("title"), Some("title in en"));

    let record = mapper.read(&store, node, "Product", Some(locale("de"))).unwrap().value;
    assert_eq!(record.get_str("title"), Some("canonical"));
}

#[test]
fn custom_separator() {
    let config = MapperConfig {
        override_separator: "__".to_string(),
        ..MapperConfig::default()
    };
    let mapper = TreeMapper::with_config(
        Arc::new(registry()),
        Arc::new(StaticLocales::default()),
        config,
    );
    let mut store = MemoryStore::new();
    let node = product_with_override(&mut store, &mapper, locale("it"));
    assert!(store.has_property(node, "title__it").unwrap());

    let mapped = mapper.read(&store, node, "Product", Some(locale("it"))).unwrap();
    assert_eq!(mapped.value.get_str("title"), Some("title in it"));
    assert!(mapped.is_clean());
}

#[test]
fn nested_elements_use_the_same_locale() {
    let mapper = mapper();
    let mut store = MemoryStore::new();
    let root = store.root();
    let product = store.add_node(root, "product", "shop:product").unwrap();
    let variants = store.add_node(product, "variants", "mgnl:contentNode").unwrap();
    let v = store.add_node(variants, "v0", "mgnl:contentNode").unwrap();
    store.set_property(v, "label", "small".into()).unwrap();
    store.set_property(v, "label_es", "pequeño".into()).unwrap();

    let record = mapper.read(&store, product, "Product", Some(locale("es"))).unwrap().value;
    assert_eq!(record.get_children("variants").unwrap()[0].get_str("label"), Some("pequeño"));
}

#[test]
fn concurrent_requests_read_in_their_own_locale() {
    let locales = Arc::new(SharedLocales::default());
    let mapper = TreeMapper::new(Arc::new(registry()), Arc::clone(&locales) as Arc<dyn LocaleProvider>);
    let mut store = MemoryStore::new();
    let node = product_with_override(&mut store, &mapper, locale("de"));
    store.set_property(node, "title_fr", "titre".into()).unwrap();

    let store = Arc::new(store);
    let both_set = Arc::new(Barrier::new(2));
    let request = |code: &'static str| {
        let (locales, mapper, store, both_set) = (
            Arc::clone(&locales),
            mapper.clone(),
            Arc::clone(&store),
            Arc::clone(&both_set),
        );
        std::thread::spawn(move || {
            let _request = locales.set_current(locale(code));
            both_set.wait();
            let record = mapper.read(store.as_ref(), node, "Product", None).unwrap().value;
            record.get_str("title").map(str::to_string)
        })
    };
    let german = request("de");
    let french = request("fr");

    assert_eq!(german.join().unwrap().as_deref(), Some("title in de"));
    assert_eq!(french.join().unwrap().as_deref(), Some("titre"));
}
