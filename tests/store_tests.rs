//! Tests for KeyValueStore
//!
//! These tests verify:
//! - Basic get/put/delete operations
//! - Previous-value returns
//! - Concurrent access patterns

use ledgerkv::KeyValueStore;

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_store_is_empty() {
    let store = KeyValueStore::new();
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_put_and_get() {
    let store = KeyValueStore::new();

    store.put(b"key1".to_vec(), b"value1".to_vec());

    assert_eq!(store.get(b"key1"), Some(b"value1".to_vec()));
}

#[test]
fn test_get_nonexistent_key() {
    let store = KeyValueStore::new();

    assert_eq!(store.get(b"nonexistent"), None);
}

#[test]
fn test_put_multiple_keys() {
    let store = KeyValueStore::new();

    store.put(b"key1".to_vec(), b"value1".to_vec());
    store.put(b"key2".to_vec(), b"value2".to_vec());
    store.put(b"key3".to_vec(), b"value3".to_vec());

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(b"key1"), Some(b"value1".to_vec()));
    assert_eq!(store.get(b"key2"), Some(b"value2".to_vec()));
    assert_eq!(store.get(b"key3"), Some(b"value3".to_vec()));
}

#[test]
fn test_put_overwrites_and_returns_previous() {
    let store = KeyValueStore::new();

    let old = store.put(b"key1".to_vec(), b"value1".to_vec());
    assert_eq!(old, None);

    let old = store.put(b"key1".to_vec(), b"value2".to_vec());
    assert_eq!(old, Some(b"value1".to_vec()));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(b"key1"), Some(b"value2".to_vec()));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_key() {
    let store = KeyValueStore::new();

    store.put(b"key1".to_vec(), b"value1".to_vec());
    let old = store.delete(b"key1");

    assert_eq!(old, Some(b"value1".to_vec()));
    assert_eq!(store.get(b"key1"), None);
    assert!(store.is_empty());
}

#[test]
fn test_delete_absent_key_is_noop() {
    let store = KeyValueStore::new();

    assert_eq!(store.delete(b"nonexistent"), None);
    assert!(store.is_empty());
}

#[test]
fn test_put_after_delete() {
    let store = KeyValueStore::new();

    store.put(b"key1".to_vec(), b"value1".to_vec());
    store.delete(b"key1");
    store.put(b"key1".to_vec(), b"value2".to_vec());

    assert_eq!(store.get(b"key1"), Some(b"value2".to_vec()));
}

#[test]
fn test_contains_key() {
    let store = KeyValueStore::new();

    store.put(b"here".to_vec(), b"v".to_vec());

    assert!(store.contains_key(b"here"));
    assert!(!store.contains_key(b"gone"));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_readers() {
    let store = KeyValueStore::new();
    for i in 0..100 {
        store.put(format!("key{}", i).into_bytes(), format!("value{}", i).into_bytes());
    }

    crossbeam::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|_| {
                for i in 0..100 {
                    let key = format!("key{}", i).into_bytes();
                    assert_eq!(store.get(&key), Some(format!("value{}", i).into_bytes()));
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_readers_alongside_writer() {
    let store = KeyValueStore::new();
    store.put(b"stable".to_vec(), b"constant".to_vec());

    crossbeam::thread::scope(|s| {
        // One writer churning its own key
        s.spawn(|_| {
            for i in 0..1000u32 {
                store.put(b"hot".to_vec(), i.to_be_bytes().to_vec());
            }
        });

        // Readers observe a consistent world throughout
        for _ in 0..4 {
            s.spawn(|_| {
                for _ in 0..1000 {
                    assert_eq!(store.get(b"stable"), Some(b"constant".to_vec()));
                }
            });
        }
    })
    .unwrap();

    assert_eq!(store.get(b"hot"), Some(999u32.to_be_bytes().to_vec()));
}

#[test]
fn test_concurrent_distinct_key_writers() {
    let store = KeyValueStore::new();

    crossbeam::thread::scope(|s| {
        for t in 0..8 {
            let store = &store;
            s.spawn(move |_| {
                for i in 0..100 {
                    store.put(
                        format!("t{}-key{}", t, i).into_bytes(),
                        format!("t{}-value{}", t, i).into_bytes(),
                    );
                }
            });
        }
    })
    .unwrap();

    assert_eq!(store.len(), 800);
    assert_eq!(store.get(b"t3-key42"), Some(b"t3-value42".to_vec()));
}
