//! Helpers shared across layers.
//!
//! - [`uri_codec`] - Percent-encoding of stored locations
//! - [`db_error`] - Backend error classification for the storage engines

pub mod db_error;
pub mod uri_codec;
