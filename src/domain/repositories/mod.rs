//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - [`RedirectRepository`] defines the contract for redirect storage
//! - Implementations live in `crate::infrastructure::persistence`
//! - A mock implementation is auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod redirect_repository;

pub use redirect_repository::{RedirectRepository, StorageError};

#[cfg(test)]
pub use redirect_repository::MockRedirectRepository;
