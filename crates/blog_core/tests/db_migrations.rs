use blog_core::db::migrations::latest_version;
use blog_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_article_schema() {
    let conn = open_db_in_memory().expect("open in-memory db");

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "articles");
    assert_table_exists(&conn, "articles_fts");
}

#[test]
fn comments_have_no_table_of_their_own() {
    let conn = open_db_in_memory().expect("open in-memory db");

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name LIKE '%comment%';",
            [],
            |row| row.get(0),
        )
        .expect("query row");
    assert_eq!(count, 0);
}

#[test]
fn reopening_file_database_keeps_schema_version() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("blog.db");

    let conn_first = open_db(&path).expect("open db file");
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).expect("open db file");
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "articles");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).expect("open raw connection");
    conn.execute_batch("PRAGMA user_version = 999;").expect("run sql");
    drop(conn);

    match open_db(&path).expect_err("open fails") {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("query row")
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .expect("query row");
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
