// Copyright 2025 Keydex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Index Concurrency Tests
//!
//! Multi-threaded insert/delete workloads over both duplicate-handling
//! variants. Every thread runs the same keyed workload; the totals the
//! scans observe afterwards must be exact.

use std::sync::atomic::{AtomicU64, Ordering};

use keydex::{
    Catalog, Column, DataType, Index, IndexConstraint, IndexFactory, IndexMethod, ItemPointer,
    Operator, ScanDirection, Schema, Tuple, Value, VarlenPool,
};

const NUM_THREADS: usize = 4;

fn item0() -> ItemPointer {
    ItemPointer::new(120, 5)
}

fn item1() -> ItemPointer {
    ItemPointer::new(120, 7)
}

fn item2() -> ItemPointer {
    ItemPointer::new(123, 19)
}

fn build_index(unique_keys: bool) -> Box<dyn Index> {
    let catalog = Catalog::new();
    catalog
        .register_table(
            "test_table",
            Schema::new(vec![
                Column::fixed(DataType::Integer, "A", true),
                Column::varchar(1024, "B"),
            ]),
        )
        .expect("Failed to register table");

    let metadata = catalog
        .index_metadata(
            "test_table",
            "test_index",
            125,
            IndexMethod::BTree,
            IndexConstraint::Default,
            vec![0, 1],
            unique_keys,
        )
        .expect("Failed to build metadata");

    IndexFactory::build(metadata).expect("Failed to build index")
}

fn key(index: &dyn Index, pool: &VarlenPool, a: i32, b: &str) -> Tuple {
    let mut tuple = Tuple::new(index.metadata().key_schema().clone());
    tuple.set_value(0, Value::integer(a), pool).unwrap();
    tuple.set_value(1, Value::varchar(b), pool).unwrap();
    tuple
}

/// Per-thread insert workload, 9 entries over 5 keys:
/// (100,a) item0; (100,b) item1 x3, item2, item0; (100,c) item1;
/// (400,d) item1; (500,e) item1
fn insert_workload(index: &dyn Index, scale_factor: i32) {
    let pool = VarlenPool::new();
    for scale in 1..=scale_factor {
        let key0 = key(index, &pool, 100 * scale, "a");
        let key1 = key(index, &pool, 100 * scale, "b");
        let key2 = key(index, &pool, 100 * scale, "c");
        let key3 = key(index, &pool, 400 * scale, "d");
        let key4 = key(index, &pool, 500 * scale, &"e".repeat(1000));

        index.insert(&key0, item0()).unwrap();
        index.insert(&key1, item1()).unwrap();
        index.insert(&key1, item2()).unwrap();
        index.insert(&key1, item1()).unwrap();
        index.insert(&key1, item1()).unwrap();
        index.insert(&key1, item0()).unwrap();
        index.insert(&key2, item1()).unwrap();
        index.insert(&key3, item1()).unwrap();
        index.insert(&key4, item1()).unwrap();
    }
}

/// Per-thread delete workload: one exact (key, item) removal per key,
/// including a miss on (100,c) whose stored item is item1
fn delete_workload(index: &dyn Index, scale_factor: i32) {
    let pool = VarlenPool::new();
    for scale in 1..=scale_factor {
        index
            .delete(&key(index, &pool, 100 * scale, "a"), item0())
            .unwrap();
        index
            .delete(&key(index, &pool, 100 * scale, "b"), item1())
            .unwrap();
        index
            .delete(&key(index, &pool, 100 * scale, "c"), item2())
            .unwrap();
        index
            .delete(&key(index, &pool, 400 * scale, "d"), item1())
            .unwrap();
        index
            .delete(&key(index, &pool, 500 * scale, &"e".repeat(1000)), item1())
            .unwrap();
    }
}

fn scan_key_count(index: &dyn Index, pool: &VarlenPool, a: i32, b: &str) -> usize {
    let mut locations = Vec::new();
    index.scan_key(&key(index, pool, a, b), &mut locations).unwrap();
    locations.len()
}

/// Property 9 (multi-map): observable occurrences equal the sum of
/// per-thread inserts
#[test]
fn test_multi_threaded_insert_totals() {
    let index = build_index(false);

    std::thread::scope(|scope| {
        for _ in 0..NUM_THREADS {
            scope.spawn(|| insert_workload(index.as_ref(), 1));
        }
    });

    let mut locations = Vec::new();
    index.scan_all(&mut locations).unwrap();
    assert_eq!(locations.len(), 9 * NUM_THREADS);
    assert_eq!(index.stats().number_of_tuples() as usize, 9 * NUM_THREADS);

    let pool = VarlenPool::new();
    assert_eq!(scan_key_count(index.as_ref(), &pool, 100, "a"), NUM_THREADS);
    assert_eq!(
        scan_key_count(index.as_ref(), &pool, 100, "b"),
        5 * NUM_THREADS
    );
    assert_eq!(scan_key_count(index.as_ref(), &pool, 1000, "f"), 0);
}

/// Deletes remove exactly one matching occurrence per call, across threads
#[test]
fn test_multi_threaded_insert_then_delete() {
    let index = build_index(false);

    std::thread::scope(|scope| {
        for _ in 0..NUM_THREADS {
            scope.spawn(|| insert_workload(index.as_ref(), 1));
        }
    });
    std::thread::scope(|scope| {
        for _ in 0..NUM_THREADS {
            scope.spawn(|| delete_workload(index.as_ref(), 1));
        }
    });

    let pool = VarlenPool::new();
    // (100,a): T inserted, T deleted
    assert_eq!(scan_key_count(index.as_ref(), &pool, 100, "a"), 0);
    // (100,b): 5T inserted, T item1 occurrences removed
    assert_eq!(
        scan_key_count(index.as_ref(), &pool, 100, "b"),
        4 * NUM_THREADS
    );
    // (100,c): the delete targeted item2, which was never stored there
    assert_eq!(scan_key_count(index.as_ref(), &pool, 100, "c"), NUM_THREADS);
    // (400,d) and (500,e...): fully removed
    assert_eq!(scan_key_count(index.as_ref(), &pool, 400, "d"), 0);
    assert_eq!(
        scan_key_count(index.as_ref(), &pool, 500, &"e".repeat(1000)),
        0
    );

    let mut locations = Vec::new();
    index.scan_all(&mut locations).unwrap();
    assert_eq!(locations.len(), 5 * NUM_THREADS);
}

/// Property 9 (unique): concurrent inserts of one key admit exactly one
/// winner; every loser observes DuplicateKey
#[test]
fn test_unique_concurrent_single_winner() {
    let index = build_index(true);
    let successes = AtomicU64::new(0);
    let duplicates = AtomicU64::new(0);

    std::thread::scope(|scope| {
        for thread in 0..NUM_THREADS as u32 {
            let successes = &successes;
            let duplicates = &duplicates;
            let index = index.as_ref();
            scope.spawn(move || {
                let pool = VarlenPool::new();
                for a in [100, 200, 300, 400, 500] {
                    let key_a = key(index, &pool, a, "k");
                    match index.insert(&key_a, ItemPointer::new(a as u32, thread)) {
                        Ok(()) => {
                            successes.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(err) => {
                            assert!(err.is_constraint_violation());
                            duplicates.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            });
        }
    });

    assert_eq!(successes.load(Ordering::Relaxed), 5);
    assert_eq!(
        duplicates.load(Ordering::Relaxed),
        5 * (NUM_THREADS as u64 - 1)
    );

    let mut locations = Vec::new();
    index.scan_all(&mut locations).unwrap();
    assert_eq!(locations.len(), 5);
    assert_eq!(index.stats().inserts(), 5);

    let pool = VarlenPool::new();
    for a in [100, 200, 300, 400, 500] {
        assert_eq!(scan_key_count(index.as_ref(), &pool, a, "k"), 1);
    }
}

/// Readers run concurrently with writers without observing torn state
#[test]
fn test_concurrent_scans_during_inserts() {
    let index = build_index(false);

    std::thread::scope(|scope| {
        for _ in 0..NUM_THREADS {
            scope.spawn(|| insert_workload(index.as_ref(), 3));
        }
        for _ in 0..2 {
            scope.spawn(|| {
                let pool = VarlenPool::new();
                for _ in 0..50 {
                    let mut locations = Vec::new();
                    index.scan_all(&mut locations).unwrap();
                    index
                        .scan(
                            &[Value::integer(100)],
                            &[0],
                            &[Operator::Eq],
                            ScanDirection::Forward,
                            &mut locations,
                        )
                        .unwrap();
                    index
                        .scan_key(&key(index.as_ref(), &pool, 100, "b"), &mut locations)
                        .unwrap();
                }
            });
        }
    });

    // scale factor 3 per thread: 9 entries per scale
    let mut locations = Vec::new();
    index.scan_all(&mut locations).unwrap();
    assert_eq!(locations.len(), 27 * NUM_THREADS);
}
