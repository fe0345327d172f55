//! Infrastructure layer for external integrations.
//!
//! This layer implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Storage engines and the engine registry

pub mod persistence;
