//! # FatSecret HTTP Client
//!
//! This module provides a direct HTTP client for the FatSecret Platform REST
//! API: food and recipe lookup, the food and exercise diaries, saved meals,
//! profiles and weight tracking.
//!
//! ## Modules
//!
//! - [`auth`] - Token resolution and the emulated login form
//! - [`client`] - Core client: OAuth token dance and signed request dispatch
//! - [`response`] - Error envelope detection and mapping
//! - [`error`] - Error taxonomy
//! - [`types`] - Credentials, configuration and argument types
//!
//! The API methods themselves live in one file per domain (`foods`,
//! `recipes`, `exercises`, `meals`, `profile`, `weight`), all as methods on
//! [`FatsecretClient`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use fatsecret::client::{auth, Credentials, FatsecretClient};
//!
//! # async fn example() -> fatsecret::Result<()> {
//! let public = FatsecretClient::new("consumer-key", "consumer-secret")?;
//! let foods = public.foods_search("Tacos", None, None, None, None).await?;
//! println!("{foods:#}");
//!
//! let credentials = Credentials::new("consumer-key", "consumer-secret")
//!     .with_login("username", "password");
//! if let Some(user) = auth::authenticate(&credentials).await {
//!     let profile = user.profile_get().await?;
//!     println!("{profile:#}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod error;
mod exercises;
mod foods;
mod meals;
mod oauth;
mod profile;
mod recipes;
pub mod response;
pub mod types;
mod weight;

pub use client::FatsecretClient;
pub use error::{FatsecretError, Result};
pub use types::*;
