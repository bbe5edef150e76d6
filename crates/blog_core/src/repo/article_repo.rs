//! Article repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist article documents, comments embedded as a JSON array.
//! - Serve id lookup, newest-first listing and substring search.
//!
//! # Invariants
//! - Write paths call `Article::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `created_at` is written by insert only.
//! - `*_folded` columns are rewritten with their source fields on every write.
//! - Listings are ordered `created_at DESC, seq DESC`.

use crate::db::DbError;
use crate::model::article::{Article, ArticleId, ArticleValidationError, Comment};
use crate::search::{fold_case, fts};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub(crate) const ARTICLE_SELECT_SQL: &str = "SELECT
    articles.uuid AS uuid,
    articles.title AS title,
    articles.body AS body,
    articles.author AS author,
    articles.likes AS likes,
    articles.comments AS comments,
    articles.created_at AS created_at
FROM articles";

pub(crate) const ARTICLE_ORDER_SQL: &str = "ORDER BY articles.created_at DESC, articles.seq DESC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for article persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ArticleValidationError),
    Db(DbError),
    NotFound(ArticleId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted article data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ArticleValidationError> for RepoError {
    fn from(value: ArticleValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for the article store.
pub trait ArticleRepository {
    /// Validates and persists a new article, returning the stored document.
    fn insert(&self, title: &str, content: &str, author: &str) -> RepoResult<Article>;
    /// Looks up one article. Ids that are not valid UUIDs yield `None`.
    fn find_by_id(&self, id: &str) -> RepoResult<Option<Article>>;
    /// Lists every article, newest first.
    fn find_all(&self) -> RepoResult<Vec<Article>>;
    /// Case-insensitive substring match on title, content or author,
    /// newest first. An empty query matches everything.
    fn search(&self, query: &str) -> RepoResult<Vec<Article>>;
    /// Rewrites the full document of an existing article.
    fn save(&self, article: &Article) -> RepoResult<()>;
}

/// SQLite-backed article repository over a caller-owned connection.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn insert(&self, title: &str, content: &str, author: &str) -> RepoResult<Article> {
        let article = Article::new(title, content, author);
        article.validate()?;

        self.conn.execute(
            "INSERT INTO articles (
                uuid,
                title,
                body,
                author,
                likes,
                comments,
                created_at,
                title_folded,
                body_folded,
                author_folded
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                article.id.to_string(),
                article.title.as_str(),
                article.content.as_str(),
                article.author.as_str(),
                likes_to_db(article.likes)?,
                comments_to_db(&article.comments)?,
                article.created_at,
                fold_case(&article.title),
                fold_case(&article.content),
                fold_case(&article.author),
            ],
        )?;

        Ok(article)
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Article>> {
        let Ok(uuid) = Uuid::parse_str(id.trim()) else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} WHERE articles.uuid = ?1;"))?;
        let mut rows = stmt.query([uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_article_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Article>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} {ARTICLE_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut articles = Vec::new();

        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }

        Ok(articles)
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Article>> {
        fts::search_articles(self.conn, query)
    }

    fn save(&self, article: &Article) -> RepoResult<()> {
        article.validate()?;

        let changed = self.conn.execute(
            "UPDATE articles
             SET
                title = ?1,
                body = ?2,
                author = ?3,
                likes = ?4,
                comments = ?5,
                title_folded = ?6,
                body_folded = ?7,
                author_folded = ?8
             WHERE uuid = ?9;",
            params![
                article.title.as_str(),
                article.content.as_str(),
                article.author.as_str(),
                likes_to_db(article.likes)?,
                comments_to_db(&article.comments)?,
                fold_case(&article.title),
                fold_case(&article.content),
                fold_case(&article.author),
                article.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(article.id));
        }

        Ok(())
    }
}

pub(crate) fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in articles.uuid"))
    })?;

    let likes_value: i64 = row.get("likes")?;
    let likes = u64::try_from(likes_value).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid likes value `{likes_value}` in articles.likes"
        ))
    })?;

    let comments_text: String = row.get("comments")?;
    let comments: Vec<Comment> = serde_json::from_str(&comments_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid comments document for {id}: {err}"))
    })?;

    let article = Article {
        id,
        title: row.get("title")?,
        content: row.get("body")?,
        author: row.get("author")?,
        likes,
        comments,
        created_at: row.get("created_at")?,
    };
    article
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("article {id}: {err}")))?;
    Ok(article)
}

fn likes_to_db(likes: u64) -> RepoResult<i64> {
    i64::try_from(likes)
        .map_err(|_| RepoError::InvalidData(format!("likes value `{likes}` exceeds storage range")))
}

fn comments_to_db(comments: &[Comment]) -> RepoResult<String> {
    serde_json::to_string(comments)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode comments: {err}")))
}
