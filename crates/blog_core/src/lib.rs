//! Core domain logic for the blog backend.
//! Articles, their embedded comments, validation rules, the SQLite-backed
//! article store and the access service built on top of it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::{
    Article, ArticleField, ArticleId, ArticleValidationError, Comment, ValidationRule,
};
pub use repo::article_repo::{ArticleRepository, RepoError, RepoResult, SqliteArticleRepository};
pub use service::article_service::{ArticleService, ArticleServiceError, ServiceResult};
pub use validation::{ArticleDraft, CommentDraft};
