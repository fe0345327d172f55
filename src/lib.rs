//! # Redirector
//!
//! A URL redirector: short keys map to target locations and are resolved
//! either with an HTTP redirect or through an interstitial page.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Redirect entity, key codec and storage contract
//! - **Application Layer** ([`application`]) - Redirect service
//! - **Infrastructure Layer** ([`infrastructure`]) - Storage engines and engine selection
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Storage Engines
//!
//! Selected by `STORAGE_TYPE`:
//!
//! - `memory` - process-local, forced when `DEBUG=true`
//! - `mongodb` - MongoDB collection with a unique index on `key`
//! - `postgres` - PostgreSQL table keyed by `key`
//! - `redis` - Redis keys written with `SET NX`
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_TYPE="mongodb"
//! export STORAGE_URI="mongodb://localhost:27017"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::RedirectService;
    pub use crate::domain::entities::Redirect;
    pub use crate::domain::key_codec::KeyCodec;
    pub use crate::domain::repositories::{RedirectRepository, StorageError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::EngineRegistry;
    pub use crate::state::AppState;
}
