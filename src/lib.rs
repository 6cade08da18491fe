//! # Stockast Client SDK for Rust
//!
//! `stockast-client` is a Rust client for the Stockast stock-information
//! API, covering the same surface as the browser client it replaces: user
//! and company management, follow lists, historical and real-time stock
//! lookups, and short/long-term predictions, authenticated with `Basic`
//! credentials.
//!
//! The `Basic` credential is built with the crate's own Base64 text codec,
//! which keeps the permissive decoding behavior of the original client's
//! encoder (see [`codec`]).
//!
//! ## Features
//!
//! - Thin, complete coverage of the Stockast REST routes
//! - Asynchronous API using Tokio
//! - Pluggable credential source via [`CredentialProvider`]
//! - Hand-implemented Base64 text codec with a tolerant decoder
//! - Comprehensive error handling

pub mod auth;
pub mod client;
pub mod codec;
pub mod error;

// Re-export commonly used types for convenience
pub use auth::{CredentialProvider, Credentials, StaticCredentials};
pub use client::Client;
pub use client::ClientBuilder;
pub use client::PredictionParams;
pub use codec::{decode, encode};
pub use error::Error;
