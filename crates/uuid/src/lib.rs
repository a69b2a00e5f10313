//! Request identifiers.
//!
//! Every request and prescription Pharmalert creates carries an identifier that must never
//! collide with another one over the lifetime of the process. Identifiers are random
//! (128 bits drawn from the caller's RNG or from the OS) and always rendered in one
//! *canonical* form: **32 lowercase hexadecimal characters** (no hyphens).
//!
//! This crate provides [`RequestId`], a wrapper that guarantees the canonical form once
//! constructed.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Identifiers coming from outside the core (CLI arguments, a future backend feed) must already
//! be canonical; use [`RequestId::parse`] to validate them. Hyphenated or uppercase forms are
//! rejected rather than normalised, so two spellings of the same id can never coexist.

mod request_id;

pub use request_id::{RequestId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
