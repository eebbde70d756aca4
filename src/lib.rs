//! # FatSecret Library
//!
//! Async client for the FatSecret Platform REST API (foods, recipes,
//! exercises, saved meals, profiles and weight tracking).
//!
//! ## Client
//!
//! [`FatsecretClient`] signs every call with OAuth 1.0a and multiplexes all
//! API methods through the single REST endpoint. Calls return the decoded
//! JSON body; error envelopes become a typed [`FatsecretError`].
//!
//! ## Authentication
//!
//! [`client::auth`] turns [`Credentials`] into an authenticated client,
//! either from a saved access token pair or by driving FatSecret's login
//! page. It returns `None` instead of failing, so callers can fall back to a
//! consumer-only client.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fatsecret::{fatsecret_authenticate, FatsecretClient};
//!
//! # async fn example() -> fatsecret::Result<()> {
//! let client = match fatsecret_authenticate(Some("user"), Some("pass"), "key", "secret").await {
//!     Some(client) => client,
//!     None => FatsecretClient::new("key", "secret")?,
//! };
//! let recipe = client.recipe_get("88339").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::auth::{authenticate, authenticate_with, fatsecret_authenticate};
pub use client::{ClientConfig, Credentials, FatsecretClient, FatsecretError, Result, SessionToken};
