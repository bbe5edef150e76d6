use blog_core::db::open_db_in_memory;
use blog_core::{
    Article, ArticleField, ArticleRepository, Comment, RepoError, SqliteArticleRepository,
    ValidationRule,
};
use rusqlite::Connection;

#[test]
fn insert_and_find_roundtrip() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    let created = repo
        .insert(" Hello World ", "This is a test content.", "Alice")
        .expect("insert article");
    assert_eq!(created.title, "Hello World");
    assert_eq!(created.likes, 0);
    assert!(created.comments.is_empty());

    let loaded = repo
        .find_by_id(&created.id.to_string())
        .expect("load article")
        .expect("article exists");
    assert_eq!(loaded, created);
}

#[test]
fn insert_rejects_invalid_fields_and_persists_nothing() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    let err = repo.insert("x", "This is a test content.", "Alice").expect_err("insert is rejected");
    match err {
        RepoError::Validation(err) => {
            assert_eq!(err.field, ArticleField::Title);
            assert_eq!(err.rule, ValidationRule::MinLength { min: 3 });
        }
        other => panic!("unexpected error: {other}"),
    }

    repo.insert("Hello", "short", "Alice").expect_err("insert is rejected");
    repo.insert("Hello", "This is a test content.", " ").expect_err("insert is rejected");

    assert_eq!(article_count(&conn), 0);
}

#[test]
fn find_by_id_treats_malformed_ids_as_missing() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    assert!(repo.find_by_id("not-a-uuid").expect("load article").is_none());
    assert!(repo.find_by_id("").expect("load article").is_none());
    assert!(repo
        .find_by_id("11111111-2222-4333-8444-555555555555")
        .expect("load article")
        .is_none());
}

#[test]
fn find_all_returns_newest_first() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    let first = repo.insert("First post", "first body content", "alice").expect("insert article");
    let second = repo.insert("Second post", "second body content", "bob").expect("insert article");
    let third = repo.insert("Third post", "third body content", "carol").expect("insert article");

    let ids: Vec<_> = repo.find_all().expect("list articles").iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn find_all_orders_by_created_at_before_insertion_order() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    let older = repo.insert("Older post", "older body content", "alice").expect("insert article");
    let newer = repo.insert("Newer post", "newer body content", "bob").expect("insert article");
    conn.execute(
        "UPDATE articles SET created_at = ?1 WHERE uuid = ?2;",
        rusqlite::params![newer.created_at - 60_000, newer.id.to_string()],
    )
    .expect("run sql");

    let ids: Vec<_> = repo.find_all().expect("list articles").iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);
}

#[test]
fn save_rewrites_document_but_not_created_at() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    let mut article = repo.insert("Hello World", "This is a test content.", "Alice").expect("insert article");
    let created_at = article.created_at;

    article.record_like();
    article.push_comment(Comment::new("Bob", "Nice post!"));
    article.created_at = created_at + 1_000;
    repo.save(&article).expect("save article");

    let loaded = repo.find_by_id(&article.id.to_string()).expect("load article").expect("article exists");
    assert_eq!(loaded.likes, 1);
    assert_eq!(loaded.comments.len(), 1);
    assert_eq!(loaded.comments[0].author, "Bob");
    assert_eq!(loaded.created_at, created_at);
}

#[test]
fn save_of_missing_article_returns_not_found() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    let article = Article::new("Never stored", "This body was never inserted", "ghost");
    let err = repo.save(&article).expect_err("save is rejected");
    assert!(matches!(err, RepoError::NotFound(id) if id == article.id));
}

#[test]
fn save_validates_before_writing() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);

    let mut article = repo.insert("Hello World", "This is a test content.", "Alice").expect("insert article");
    article.push_comment(Comment::new("", "orphan text"));
    let err = repo.save(&article).expect_err("save is rejected");
    assert!(matches!(err, RepoError::Validation(_)));

    let loaded = repo.find_by_id(&article.id.to_string()).expect("load article").expect("article exists");
    assert!(loaded.comments.is_empty());
}

#[test]
fn concurrent_read_modify_write_is_last_write_wins() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);
    let article = repo.insert("Hello World", "This is a test content.", "Alice").expect("insert article");
    let id = article.id.to_string();

    let mut first = repo.find_by_id(&id).expect("load article").expect("article exists");
    let mut second = repo.find_by_id(&id).expect("load article").expect("article exists");
    first.record_like();
    second.record_like();
    repo.save(&first).expect("save article");
    repo.save(&second).expect("save article");

    assert_eq!(repo.find_by_id(&id).expect("load article").expect("article exists").likes, 1);
}

#[test]
fn corrupted_comment_document_is_reported_not_masked() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);
    let article = repo.insert("Hello World", "This is a test content.", "Alice").expect("insert article");

    conn.execute(
        "UPDATE articles SET comments = 'not json' WHERE uuid = ?1;",
        [article.id.to_string()],
    )
    .expect("run sql");

    let err = repo.find_all().expect_err("listing fails");
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn stored_field_that_breaks_validation_is_invalid_data() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let repo = SqliteArticleRepository::new(&conn);
    let article = repo
        .insert("Hello World", "This is a test content.", "Alice")
        .expect("insert article");

    conn.execute(
        "UPDATE articles SET title = 'x' WHERE uuid = ?1;",
        [article.id.to_string()],
    )
    .expect("run sql");

    let err = repo.find_all().expect_err("listing fails");
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("title")));

    let err = repo
        .find_by_id(&article.id.to_string())
        .expect_err("lookup fails");
    assert!(matches!(err, RepoError::InvalidData(_)));

    let err = repo.search("").expect_err("scanned search fails");
    assert!(matches!(err, RepoError::InvalidData(_)));

    let err = repo.search("hello").expect_err("indexed search fails");
    assert!(matches!(err, RepoError::InvalidData(_)));
}

fn article_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get(0))
        .expect("query row")
}
