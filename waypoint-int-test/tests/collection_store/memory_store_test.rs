use std::thread;
use waypoint::collection::DocumentCollectionProvider;
use waypoint::doc;
use waypoint::filter::field;
use waypoint::store::{DocumentStore, MemoryStore};

#[test]
fn test_namespaces_are_shared_between_handles() {
    let store = DocumentStore::new(MemoryStore::new());
    let first = store.collection("users").unwrap();
    let second = store.collection("users").unwrap();

    first.insert_one(doc! { email: "a@b.com" }).unwrap();
    assert_eq!(second.size().unwrap(), 1);
    assert!(second.find_one(&field("email").eq("a@b.com")).unwrap().is_some());
}

#[test]
fn test_namespaces_are_isolated() {
    let store = MemoryStore::new();
    store.memory_collection("users").insert_one(doc! { email: "a@b.com" }).ok();
    assert!(store.memory_collection("roadmaps").documents().is_empty());
    assert_eq!(store.collection_names(), vec!["roadmaps", "users"]);
}

#[test]
fn test_stores_are_isolated() {
    let primary = MemoryStore::new();
    let secondary = MemoryStore::new();
    primary.memory_collection("users").insert_one(doc! { email: "a@b.com" }).ok();
    assert!(!secondary.has_collection("users"));
}

#[test]
fn test_concurrent_inserts() {
    let store = DocumentStore::new(MemoryStore::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                let collection = store.collection("events").unwrap();
                for i in 0..100 {
                    collection.insert_one(doc! { thread: t, seq: i }).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.collection("events").unwrap().size().unwrap(), 800);
}
