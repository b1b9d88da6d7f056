//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! Entities, ports and the account/post services live here; this crate has no
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::Subject;
pub use error::DomainError;
