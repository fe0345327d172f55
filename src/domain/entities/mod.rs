//! Core domain entities.
//!
//! - [`Redirect`] - An immutable short key to location mapping
//! - [`RedirectRecord`] - The flat field set storage engines persist

pub mod redirect;

pub use redirect::{Redirect, RedirectRecord, ValidationError};
