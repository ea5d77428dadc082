//! Backend API
//!
//! HTTP client for the external agent backend and its error taxonomy.

pub mod client;
pub mod error;

pub use client::*;
pub use error::ApiError;
