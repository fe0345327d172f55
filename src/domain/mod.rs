//! Domain layer containing the redirect model and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::Redirect`] entity and its persisted record
//! - [`key_codec`] - Key generation and validation against the configured pattern
//! - [`repositories`] - Storage trait implemented by every engine
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Validation happens here, before any I/O
//! - Engines live in [`crate::infrastructure::persistence`]

pub mod entities;
pub mod key_codec;
pub mod repositories;
