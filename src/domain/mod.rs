//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs` — Rich domain types (validated, view-ready)
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `state.rs` — State containers with update methods
//! - `client.rs` — Sub-client with HTTP methods

pub mod chart;
pub mod message;
pub mod price;
pub mod product;

/// A response that made it through transport, split on the backend's `ok` flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// `ok: true` with a converted payload.
    Ok(T),
    /// `ok: false` with the server-supplied explanation.
    SoftError(String),
}

impl<T> Reply<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Reply::Ok(value) => Some(value),
            Reply::SoftError(_) => None,
        }
    }
}

/// Text used when the backend reports `ok: false` without a message.
pub(crate) const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";
