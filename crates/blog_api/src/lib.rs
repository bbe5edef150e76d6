//! Request-handling boundary for the blog backend.
//!
//! # Responsibility
//! - Run boundary validation on request bodies before calling the service.
//! - Map service results onto status classes and JSON bodies.
//! - Log failures; the core only classifies them.
//!
//! # Invariants
//! - Handlers never panic; every outcome is an [`ApiResponse`].
//! - Not-found is always reported as [`ApiStatus::NotFound`], never as a
//!   generic failure.

mod api;

pub use api::{ApiResponse, ApiStatus, BlogApi, WELCOME_MESSAGE};
