//! Integration tests for the concurrent-writer atom table.

use std::sync::{Arc, Barrier};
use std::thread;

use araneae_memory::{AtomError, SharedAtomTable, TableConfig};

#[test]
fn test_intern_scenario() {
    let table = SharedAtomTable::new();
    let parent = table.intern("parent");
    let child = table.intern("child");

    assert_eq!(parent.index(), 0);
    assert_eq!(child.index(), 1);
    assert_eq!(table.intern("parent"), parent);
    assert_eq!(table.size(), 2);
    assert_eq!(table.resolve(child).as_deref(), Ok("child"));
}

#[test]
fn test_empty_label() {
    let table = SharedAtomTable::new();
    let empty = table.intern("");
    assert_eq!(empty.index(), 0);
    assert_eq!(table.resolve(empty).as_deref(), Ok(""));
}

#[test]
fn test_racing_on_one_novel_label() {
    const THREADS: usize = 16;

    let table = SharedAtomTable::new();
    table.intern("warm");
    let before = table.size();
    let barrier = Barrier::new(THREADS);

    let atoms: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    table.intern("novel")
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(atoms.iter().all(|&atom| atom == atoms[0]));
    assert_eq!(table.size(), before + 1);
    assert_eq!(table.resolve(atoms[0]).as_deref(), Ok("novel"));
}

#[test]
fn test_many_writers_keep_identities_dense() {
    let table = SharedAtomTable::with_capacity(64);

    thread::scope(|s| {
        for worker in 0..8 {
            let table = &table;
            s.spawn(move || {
                for i in 0..500 {
                    table.intern(&format!("label-{}", (i * 7 + worker) % 250));
                }
            });
        }
    });

    assert_eq!(table.size(), 250);
    let labels = table.labels();
    for (index, label) in labels.iter().enumerate() {
        let atom = table.get(label).unwrap();
        assert_eq!(atom.as_usize(), index);
        assert_eq!(table.resolve(atom).unwrap(), *label);
    }
}

#[test]
fn test_readers_during_writes() {
    let table = Arc::new(SharedAtomTable::new());
    let writer = {
        let table = Arc::clone(&table);
        thread::spawn(move || {
            for i in 0..1000 {
                table.intern(&i.to_string());
            }
        })
    };

    let mut seen = 0;
    while seen < 1000 {
        let size = table.size();
        assert!(size >= seen);
        for label in table.labels().iter().skip(seen) {
            let atom = table.get(label).unwrap_or_else(|| table.intern(label));
            assert_eq!(table.resolve(atom).unwrap(), *label);
        }
        seen = size;
        thread::yield_now();
    }

    writer.join().unwrap();
    assert_eq!(table.size(), 1000);
}

#[test]
fn test_resolve_foreign_atom() {
    let ours = SharedAtomTable::new();
    let theirs = SharedAtomTable::new();
    ours.intern("a");
    let foreign = theirs.intern("a");

    assert!(matches!(
        ours.resolve(foreign),
        Err(AtomError::OutOfRange { size: 1, .. })
    ));
}

#[test]
fn test_contains_does_not_intern() {
    let table = SharedAtomTable::new();
    assert!(!table.contains("x"));
    assert_eq!(table.get("x"), None);
    assert!(table.is_empty());
}

#[test]
fn test_from_config() {
    let config = TableConfig {
        initial_capacity: 8,
        shard_amount: Some(4),
    };
    let table = SharedAtomTable::from_config(&config).unwrap();
    for label in ["a", "b", "c", "a"] {
        table.intern(label);
    }
    assert_eq!(table.size(), 3);
}

#[test]
fn test_into_table_keeps_atoms_valid() {
    let shared = SharedAtomTable::new();
    let parent = shared.intern("parent");
    let child = shared.intern("child");

    let mut table = shared.into_table();
    assert_eq!(table.resolve(parent), Ok("parent"));
    assert_eq!(table.resolve(child), Ok("child"));
    assert_eq!(table.intern("parent"), parent);
    assert_eq!(table.intern("grandparent").index(), 2);
}
