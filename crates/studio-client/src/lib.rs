#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust HTTP client for the Pocket Studio synthesis service
//!
//! Covers the voice listing, health and generation endpoints. Generation
//! uses a JSON body for preset voices and a multipart body when a voice
//! sample is attached for cloning

mod client;
pub mod error;
pub mod types;

pub use client::{StudioClient, failure_detail};
pub use error::{Result, StudioClientError};
pub use types::*;
