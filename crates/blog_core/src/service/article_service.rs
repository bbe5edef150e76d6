//! Article access service.
//!
//! # Responsibility
//! - Provide the create/comment/like/list/search entry points.
//! - Translate missing aggregates into `ArticleNotFound`.
//!
//! # Invariants
//! - Each call touches exactly one article aggregate.
//! - Comment and like are unguarded read-modify-write cycles: concurrent
//!   calls on the same article resolve as last write wins.
//! - Errors are re-signalled or classified, never swallowed.

use crate::model::article::{Article, ArticleValidationError, Comment};
use crate::repo::article_repo::{ArticleRepository, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ArticleServiceError>;

/// Service error for article use-cases.
#[derive(Debug)]
pub enum ArticleServiceError {
    /// Input failed store-level validation.
    Validation(ArticleValidationError),
    /// Referenced article does not exist. Carries the id as given.
    ArticleNotFound(String),
    /// Any other persistence failure.
    Store(RepoError),
}

impl Display for ArticleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ArticleNotFound(id) => write!(f, "Article with ID {id} not found"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ArticleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::ArticleNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ArticleServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::ArticleNotFound(id.to_string()),
            other => Self::Store(other),
        }
    }
}

/// Article service facade over a repository implementation.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one article. Validation errors propagate unchanged.
    pub fn create_article(
        &self,
        title: &str,
        content: &str,
        author: &str,
    ) -> ServiceResult<Article> {
        let article = self
            .repo
            .insert(title, content, author)
            .inspect_err(|err| log_failure("article_create", err))?;
        info!(
            "event=article_create module=service status=ok article_id={}",
            article.id
        );
        Ok(article)
    }

    /// Appends one comment to the end of an article's comment sequence.
    ///
    /// # Errors
    /// - `ArticleNotFound` when `article_id` does not resolve.
    /// - `Validation` when the comment fails store validation.
    pub fn add_comment(
        &self,
        article_id: &str,
        author: &str,
        content: &str,
    ) -> ServiceResult<Article> {
        let mut article = self.load(article_id, "article_comment")?;
        article.push_comment(Comment::new(author, content));
        self.repo
            .save(&article)
            .inspect_err(|err| log_failure("article_comment", err))?;
        info!(
            "event=article_comment module=service status=ok article_id={} comment_count={}",
            article.id,
            article.comments.len()
        );
        Ok(article)
    }

    /// Increments an article's like counter by one.
    pub fn like_article(&self, article_id: &str) -> ServiceResult<Article> {
        let mut article = self.load(article_id, "article_like")?;
        article.record_like();
        self.repo
            .save(&article)
            .inspect_err(|err| log_failure("article_like", err))?;
        info!(
            "event=article_like module=service status=ok article_id={} likes={}",
            article.id, article.likes
        );
        Ok(article)
    }

    /// Lists every article, newest first.
    pub fn get_all_articles(&self) -> ServiceResult<Vec<Article>> {
        let articles = self
            .repo
            .find_all()
            .inspect_err(|err| log_failure("article_list", err))?;
        Ok(articles)
    }

    /// Searches articles by substring, newest first.
    ///
    /// Callers reject blank queries before calling; the store matches
    /// an empty query against everything.
    pub fn search_articles(&self, query: &str) -> ServiceResult<Vec<Article>> {
        let articles = self
            .repo
            .search(query)
            .inspect_err(|err| log_failure("article_search", err))?;
        info!(
            "event=article_search module=service status=ok hits={}",
            articles.len()
        );
        Ok(articles)
    }

    fn load(&self, article_id: &str, event: &'static str) -> ServiceResult<Article> {
        match self.repo.find_by_id(article_id) {
            Ok(Some(article)) => Ok(article),
            Ok(None) => {
                warn!("event={event} module=service status=error error_code=article_not_found");
                Err(ArticleServiceError::ArticleNotFound(article_id.to_string()))
            }
            Err(err) => {
                log_failure(event, &err);
                Err(err.into())
            }
        }
    }
}

fn log_failure(event: &str, err: &RepoError) {
    match err {
        RepoError::Validation(_) => {
            warn!("event={event} module=service status=error error_code=validation_failed");
        }
        RepoError::NotFound(_) => {
            warn!("event={event} module=service status=error error_code=article_not_found");
        }
        RepoError::Db(_) => {
            error!("event={event} module=service status=error error_code=db_error");
        }
        RepoError::InvalidData(_) => {
            error!("event={event} module=service status=error error_code=invalid_data");
        }
    }
}
