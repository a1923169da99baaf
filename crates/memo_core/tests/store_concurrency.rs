use memo_core::db::open_db;
use memo_core::{SqliteTaskRepository, TaskStore};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const WRITER_THREADS: usize = 8;
const ADDS_PER_THREAD: usize = 25;

#[test]
fn concurrent_adds_from_distinct_threads_all_land() {
    // File-backed so the test exercises the same durable path as production.
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("memo.db")).unwrap();
    let store = Arc::new(TaskStore::new(SqliteTaskRepository::try_new(conn).unwrap()));

    let handles: Vec<_> = (0..WRITER_THREADS)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut ids = Vec::with_capacity(ADDS_PER_THREAD);
                for n in 0..ADDS_PER_THREAD {
                    let task = store.add(&format!("worker {worker} task {n}")).unwrap();
                    ids.push(task.id);
                }
                ids
            })
        })
        .collect();

    let mut all_ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(all_ids.insert(id), "id {id} was assigned twice");
        }
    }
    assert_eq!(all_ids.len(), WRITER_THREADS * ADDS_PER_THREAD);

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), WRITER_THREADS * ADDS_PER_THREAD);

    let listed_ids: HashSet<_> = listed.iter().map(|task| task.id).collect();
    assert_eq!(listed_ids, all_ids);
}

#[test]
fn concurrent_toggles_and_reads_never_tear() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("memo.db")).unwrap();
    let store = Arc::new(TaskStore::new(SqliteTaskRepository::try_new(conn).unwrap()));

    let task = store.add("contended").unwrap();

    let togglers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let id = task.id;
            thread::spawn(move || {
                for _ in 0..10 {
                    store.toggle(id).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..10 {
                    let tasks = store.list().unwrap();
                    assert_eq!(tasks.len(), 1);
                    assert_eq!(tasks[0].text, "contended");
                }
            })
        })
        .collect();

    for handle in togglers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    // 4 threads x 10 toggles is an even number of flips.
    assert!(!store.list().unwrap()[0].completed);
}
