//! Core use-case services.
//!
//! # Responsibility
//! - Compose repository reads into search and presentation queries.
//! - Keep UI/API layers decoupled from storage details.

pub mod query_service;
