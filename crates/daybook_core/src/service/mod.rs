//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory event state and orchestrate validation and persistence.
//! - Keep view layers decoupled from storage details.

pub mod event_store;
