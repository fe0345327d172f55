//! Application layer services.
//!
//! Services combine the key codec with the selected storage engine and give
//! HTTP handlers and the admin CLI one API to work against.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Redirect creation, resolution and removal

pub mod services;
