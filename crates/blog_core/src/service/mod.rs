//! Core use-case services.
//!
//! # Responsibility
//! - Compose repository calls into caller-facing domain operations.
//! - Keep boundary layers decoupled from storage details.

pub mod article_service;
