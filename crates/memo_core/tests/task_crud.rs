use memo_core::db::migrations::latest_version;
use memo_core::db::open_db_in_memory;
use memo_core::{RepoError, SqliteTaskRepository, TaskRepository};
use rusqlite::Connection;

fn new_repo() -> SqliteTaskRepository {
    let conn = open_db_in_memory().unwrap();
    SqliteTaskRepository::try_new(conn).unwrap()
}

#[test]
fn insert_and_query_roundtrip() {
    let mut repo = new_repo();

    let id = repo.insert("first task", false, 1_000).unwrap();
    assert!(id > 0);

    let tasks = repo.query_all().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].text, "first task");
    assert!(!tasks[0].completed);
    assert_eq!(tasks[0].created_at, 1_000);
}

#[test]
fn query_all_orders_newest_first_with_id_tiebreak() {
    let mut repo = new_repo();

    let id_a = repo.insert("a", false, 1_000).unwrap();
    let id_b = repo.insert("b", false, 2_000).unwrap();
    // Same timestamp as b: the higher id must come first.
    let id_c = repo.insert("c", false, 2_000).unwrap();

    let ids: Vec<_> = repo.query_all().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![id_c, id_b, id_a]);
}

#[test]
fn update_completed_reports_affected_rows() {
    let mut repo = new_repo();

    let id = repo.insert("toggle me", false, 1_000).unwrap();
    assert_eq!(repo.update_completed(id, true).unwrap(), 1);
    assert!(repo.query_all().unwrap()[0].completed);

    assert_eq!(repo.update_completed(id + 100, true).unwrap(), 0);
}

#[test]
fn delete_reports_affected_rows() {
    let mut repo = new_repo();

    let id = repo.insert("remove me", false, 1_000).unwrap();
    assert_eq!(repo.delete(id).unwrap(), 1);
    assert!(repo.query_all().unwrap().is_empty());

    assert_eq!(repo.delete(id).unwrap(), 0);
}

#[test]
fn ids_are_never_reused_after_delete() {
    let mut repo = new_repo();

    let first = repo.insert("short lived", false, 1_000).unwrap();
    repo.delete(first).unwrap();

    let second = repo.insert("successor", false, 2_000).unwrap();
    assert!(second > first);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTaskRepository::try_new(conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteTaskRepository::try_new(conn),
        Err(RepoError::MissingRequiredTable("tasks"))
    ));
}

#[test]
fn query_all_rejects_corrupt_completed_value() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (text, completed, created_at) VALUES ('bad row', 7, 1000);",
        [],
    )
    .unwrap();

    let repo = SqliteTaskRepository::try_new(conn).unwrap();
    assert!(matches!(
        repo.query_all(),
        Err(RepoError::InvalidData(message)) if message.contains("completed")
    ));
}
