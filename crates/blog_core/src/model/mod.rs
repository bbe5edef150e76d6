//! Domain model for blog articles and their embedded comments.
//!
//! # Responsibility
//! - Define the article aggregate persisted by the store.
//! - Own the store-level (authoritative) field constraints.
//!
//! # Invariants
//! - Every article is identified by a stable `ArticleId`.
//! - Comments only exist inside the article that owns them.

pub mod article;
