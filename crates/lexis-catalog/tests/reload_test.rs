//! Reload idempotence and snapshot consistency under concurrent readers.

use lexis_catalog::{CatalogError, CatalogStore, DirectorySource, MemorySource, Resolver};
use lexis_common::test_utils::{create_temp_dir, write_catalog};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const KEYS: &[&str] = &["title", "menu.open", "menu.items[1]", "only.base", "missing"];

#[test]
fn test_reload_with_same_contents_is_idempotent() {
    let dir = create_temp_dir();
    write_catalog(
        dir.path(),
        "DE",
        r#"{"title":"Titel","menu":{"open":"Öffnen","items":["a","b"]}}"#,
    );
    write_catalog(dir.path(), "EN", r#"{"title":"Title","only":{"base":"Base"}}"#);

    let store = Arc::new(CatalogStore::new());
    store.load("plugin", "DE", DirectorySource::new(dir.path()));
    let resolver = Resolver::new(Arc::clone(&store));

    let before: Vec<String> = KEYS.iter().map(|k| resolver.get_string("plugin", k)).collect();
    resolver.reload("plugin").unwrap();
    resolver.reload("plugin").unwrap();
    let after: Vec<String> = KEYS.iter().map(|k| resolver.get_string("plugin", k)).collect();

    assert_eq!(before, after);
    assert_eq!(before[2], "b");
    assert_eq!(before[3], "Base");
    assert_eq!(before[4], "[missing]");
    assert_eq!(store.snapshot("plugin").unwrap().generation(), 3);
}

#[test]
fn test_reload_sees_edited_file() {
    let dir = create_temp_dir();
    write_catalog(dir.path(), "EN", r#"{"k":"old"}"#);

    let store = Arc::new(CatalogStore::new());
    store.load("plugin", "EN", DirectorySource::new(dir.path()));
    let resolver = Resolver::new(store);
    assert_eq!(resolver.get_string("plugin", "k"), "old");

    write_catalog(dir.path(), "EN", r#"{"k":"new"}"#);
    assert_eq!(resolver.get_string("plugin", "k"), "old");
    resolver.reload("plugin").unwrap();
    assert_eq!(resolver.get_string("plugin", "k"), "new");
}

#[test]
fn test_reload_of_unknown_tenant_fails() {
    let resolver = Resolver::new(Arc::new(CatalogStore::new()));
    assert!(matches!(
        resolver.reload("ghost"),
        Err(CatalogError::UnknownTenant(_))
    ));
}

#[test]
fn test_switch_locale_replaces_both_tiers() {
    let store = Arc::new(CatalogStore::new());
    store.load(
        "plugin",
        "FR",
        MemorySource::new()
            .with("FR", r#"{"k":"fr"}"#)
            .with("DE", r#"{"k":"de"}"#)
            .with("EN", r#"{"k":"en","base":"en"}"#),
    );
    let resolver = Resolver::new(Arc::clone(&store));
    assert_eq!(resolver.get_string("plugin", "k"), "fr");

    store.switch_locale("plugin", "DE").unwrap();
    assert_eq!(resolver.get_string("plugin", "k"), "de");
    assert_eq!(resolver.get_string("plugin", "base"), "en");
    assert_eq!(resolver.untranslated_keys("plugin"), vec!["base"]);
}

#[test]
fn test_readers_never_mix_generations() {
    let source = Arc::new(MemorySource::new());
    let write_version = |n: u32| {
        source.insert("FR", format!(r#"{{"version":"{n}","fr":"{n}"}}"#));
        source.insert("EN", format!(r#"{{"version":"{n}","en":"{n}"}}"#));
    };
    write_version(0);

    let store = Arc::new(CatalogStore::new());
    store.load("plugin", "FR", Arc::clone(&source));
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut checked = 0_u32;
                while !done.load(Ordering::Acquire) || checked == 0 {
                    let snapshot = store.snapshot("plugin").unwrap();
                    let active = snapshot.active().navigate("fr").unwrap().to_display_string();
                    let baseline = snapshot.baseline().navigate("en").unwrap().to_display_string();
                    assert_eq!(active, baseline, "snapshot mixed two reloads");
                    checked += 1;
                }
            });
        }

        for n in 1..=200 {
            write_version(n);
            store.reload("plugin").unwrap();
        }
        done.store(true, Ordering::Release);
    });

    let last = store.snapshot("plugin").unwrap();
    assert_eq!(last.active().navigate("version").unwrap().to_display_string(), "200");
    assert_eq!(last.generation(), 201);
}

#[test]
fn test_tenants_reload_in_parallel() {
    let store = Arc::new(CatalogStore::new());
    for name in ["a", "b", "c", "d"] {
        store.load(
            name,
            "EN",
            MemorySource::new().with("EN", format!(r#"{{"name":"{name}"}}"#)),
        );
    }
    let resolver = Resolver::new(Arc::clone(&store));

    thread::scope(|scope| {
        for name in ["a", "b", "c", "d"] {
            let store = &store;
            scope.spawn(move || {
                for _ in 0..50 {
                    store.reload(name).unwrap();
                }
            });
        }
    });

    for name in ["a", "b", "c", "d"] {
        assert_eq!(resolver.get_string(name, "name"), name);
        assert_eq!(store.snapshot(name).unwrap().generation(), 51);
    }
}
