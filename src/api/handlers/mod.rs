//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod delete;
pub mod health;
pub mod key;
pub mod lookup;
pub mod redirect;

pub use create::{create_handler, create_with_key_handler};
pub use delete::delete_handler;
pub use health::health_handler;
pub use key::key_handler;
pub use lookup::lookup_handler;
pub use redirect::redirect_handler;
