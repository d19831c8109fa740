use lectern_core::{
    Catalog, ColorAssigner, KeyValueStore, MemoryStore, ReaderStores, StoreKeys,
};
use std::collections::HashSet;
use std::sync::Arc;

const EZRA_CATALOG: &str = r#"{
    "books": [
        { "name": "Genesis", "abbreviation": "GEN", "orderIndex": 1 },
        { "name": "Exodus", "abbreviation": "EXO", "orderIndex": 2 },
        { "name": "Ezra", "abbreviation": "EZR", "orderIndex": 15 },
        { "name": "Mark", "abbreviation": "MARK", "orderIndex": 41 },
        { "name": "John", "abbreviation": "JHN", "orderIndex": 43 }
    ]
}"#;

fn stores_on(kv: Arc<MemoryStore>) -> ReaderStores {
    let catalog = Catalog::from_json_str(EZRA_CATALOG).expect("fixture catalog parses");
    ReaderStores::new(
        kv,
        Arc::new(catalog),
        ColorAssigner::seeded(2024),
        &StoreKeys::default(),
    )
}

#[test]
fn repeated_adds_never_duplicate_locations() {
    let stores = stores_on(Arc::new(MemoryStore::new()));
    let calls = [
        ("Genesis", 1),
        ("John", 3),
        ("Genesis", 1),
        ("Ezra", 3),
        ("John", 3),
        ("Genesis", 2),
    ];
    for (book, chapter) in calls {
        stores.bookmarks.add(book, chapter);
    }

    let all = stores.bookmarks.all();
    let locations: HashSet<(String, u32)> = all
        .iter()
        .map(|r| (r.book_name.clone(), r.chapter))
        .collect();
    assert_eq!(locations.len(), all.len());
    assert_eq!(all.len(), 4);
    let indices: Vec<i64> = all.iter().map(|r| r.order_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn ezra_short_name_uses_catalog_abbreviation() {
    let stores = stores_on(Arc::new(MemoryStore::new()));
    assert_eq!(stores.bookmarks.add("Ezra", 3).short_name, "Ezr 3");
}

#[test]
fn reorder_then_resume_flow() {
    let kv = Arc::new(MemoryStore::new());
    let stores = stores_on(kv.clone());

    let genesis = stores.bookmarks.add("Genesis", 1);
    let exodus = stores.bookmarks.add("Exodus", 3);
    let john = stores.bookmarks.add("John", 1);
    stores
        .bookmarks
        .reorder(&[john.clone(), genesis.clone(), exodus.clone()]);

    stores.navigation.save_last_non_bookmark("Exodus", 3, 5.0);
    assert_eq!(stores.navigation.last_non_bookmark(), None);
    stores.navigation.save_last_non_bookmark("Exodus", 4, 5.0);
    assert_eq!(
        stores.navigation.last_non_bookmark().map(|p| p.chapter),
        Some(4)
    );

    // Everything survives a restart on the same backing store.
    let restarted = stores_on(kv);
    let order: Vec<_> = restarted
        .bookmarks
        .all()
        .into_iter()
        .map(|r| (r.id, r.order_index))
        .collect();
    assert_eq!(order, vec![(john.id, 0), (genesis.id, 1), (exodus.id, 2)]);
    assert_eq!(restarted.navigation.chapter_scroll("John", 1), 0.0);
}

#[test]
fn current_bookmark_follows_reader() {
    let stores = stores_on(Arc::new(MemoryStore::new()));
    stores.bookmarks.add("Genesis", 1);
    stores.bookmarks.add("John", 1);
    let mark = stores.bookmarks.add("Mark", 1);
    stores.current.set(Some(&mark));

    stores.settle("Mark", 4, 0.0);

    let current = stores.current.get().expect("current bookmark");
    assert_eq!(current.id, mark.id);
    assert_eq!(current.book_name, "Mark");
    assert_eq!(current.chapter, 4);
    assert_eq!(current.short_name, "Mark 4");
    assert_eq!(current.color_hex, mark.color_hex);
    assert_eq!(current.order_index, 2);
    assert_eq!(stores.bookmarks.all()[2], current);
}

#[test]
fn garbage_in_every_key_degrades_to_defaults() {
    let kv = Arc::new(MemoryStore::new());
    let keys = StoreKeys::default();
    for key in [
        keys.bookmarks(),
        keys.current_bookmark(),
        keys.last_non_bookmark_position(),
        keys.reading_position(),
        keys.highlights(),
        keys.chapter_scroll("John", 1),
    ] {
        kv.set(&key, "<<garbage>>".to_string()).expect("seed");
    }
    let stores = stores_on(kv);

    assert!(stores.bookmarks.all().is_empty());
    assert_eq!(stores.current.get(), None);
    assert_eq!(stores.navigation.last_non_bookmark(), None);
    assert_eq!(stores.navigation.reading_position(), None);
    assert!(stores.highlights.all().is_empty());
    assert_eq!(stores.navigation.chapter_scroll("John", 1), 0.0);
    assert_eq!(stores.current.update_if_needed("John", 2), None);
}
