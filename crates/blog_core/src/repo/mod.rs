//! Repository layer for the article store.
//!
//! # Responsibility
//! - Define the data access contract the access service depends on.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Writes enforce `Article::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod article_repo;
