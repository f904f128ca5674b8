//! Error types for the fallible parts of the public API.
//!
//! `add` is the only operation that can fail: `remove`/`get`/`reverse`/
//! `get_reverse` are total over their inputs (invalid input yields a
//! silent no-op or an empty [`crate::PhoneNumbers`]). Allocation
//! failure isn't modeled as a `Result` variant: Rust's global allocator
//! aborts the process on OOM rather than handing back a recoverable
//! error, so there's no caller-actionable state to represent.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum AddRuleError {
    /// `s` or `t` was empty or contained a byte outside Σ.
    #[error("source or target is not a valid digit string")]
    InvalidInput,
    /// `s == t`: a rule can't forward a prefix to itself.
    #[error("source and target prefixes are identical")]
    IdentityRule,
}
