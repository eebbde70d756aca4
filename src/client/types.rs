//! Type definitions for the FatSecret client.
//!
//! ## Key Types
//!
//! - [`Credentials`] - consumer key/secret plus optional user login and token pair
//! - [`ClientConfig`] - endpoint URLs, timeout and user agent
//! - [`SessionToken`] - an OAuth token/secret pair
//! - [`Meal`], [`WeightType`], [`HeightType`] - enumerated API values
//! - [`ExerciseEntryEdit`], [`WeightUpdate`] - argument bundles for the
//!   operations with many optional fields

use std::env;
use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::error::{FatsecretError, Result};

pub const DEFAULT_API_URL: &str = "https://platform.fatsecret.com/rest/server.api";
pub const DEFAULT_REQUEST_TOKEN_URL: &str = "https://www.fatsecret.com/oauth/request_token";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://www.fatsecret.com/oauth/authorize";
pub const DEFAULT_ACCESS_TOKEN_URL: &str = "https://www.fatsecret.com/oauth/access_token";

/// An OAuth token and its secret.
///
/// Used both for the short-lived request token and the long-lived access
/// token. Access tokens never expire on FatSecret, so callers are expected to
/// persist them (see `FATSECRET_ACCESS_TOKEN` / `FATSECRET_ACCESS_SECRET`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub secret: String,
}

impl SessionToken {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Application and user credentials.
#[derive(Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// A previously acquired access token pair; skips the login flow entirely
    pub session_token: Option<SessionToken>,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            username: None,
            password: None,
            session_token: None,
        }
    }

    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_session_token(mut self, token: SessionToken) -> Self {
        self.session_token = Some(token);
        self
    }

    /// Read credentials from the `FATSECRET_*` environment variables.
    ///
    /// The consumer key and secret are required. Username, password and the
    /// access token pair are optional; empty values count as unset.
    pub fn from_env() -> Result<Self> {
        let consumer_key = non_empty_var("FATSECRET_CONSUMER_KEY").ok_or_else(|| {
            FatsecretError::Config("FATSECRET_CONSUMER_KEY is not set".to_string())
        })?;
        let consumer_secret = non_empty_var("FATSECRET_CONSUMER_SECRET").ok_or_else(|| {
            FatsecretError::Config("FATSECRET_CONSUMER_SECRET is not set".to_string())
        })?;

        Ok(Self {
            consumer_key,
            consumer_secret,
            username: non_empty_var("FATSECRET_USERNAME"),
            password: non_empty_var("FATSECRET_PASSWORD"),
            session_token: session_token_from_env(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .field("session_token", &self.session_token)
            .finish()
    }
}

/// The access token pair from `FATSECRET_ACCESS_TOKEN` and
/// `FATSECRET_ACCESS_SECRET`, if both are set.
pub fn session_token_from_env() -> Option<SessionToken> {
    let token = non_empty_var("FATSECRET_ACCESS_TOKEN")?;
    let secret = non_empty_var("FATSECRET_ACCESS_SECRET")?;
    Some(SessionToken { token, secret })
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Configuration for the FatSecret client.
///
/// ```
/// use fatsecret::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST endpoint every API method is multiplexed through
    pub api_url: String,
    pub request_token_url: String,
    pub authorize_url: String,
    pub access_token_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_token_url: DEFAULT_REQUEST_TOKEN_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            access_token_url: DEFAULT_ACCESS_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("fatsecret-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Point all three OAuth endpoints at `{base}/oauth/...`.
    pub fn with_oauth_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.request_token_url = format!("{}/oauth/request_token", base);
        self.authorize_url = format!("{}/oauth/authorize", base);
        self.access_token_url = format!("{}/oauth/access_token", base);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Meal slots used throughout the food diary and saved meal methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Other,
}

impl Meal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
            Meal::Other => "other",
        }
    }

    /// Comma-separated list as expected by the saved meal methods.
    pub fn join(meals: &[Meal]) -> String {
        meals
            .iter()
            .map(Meal::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightType {
    #[default]
    Kg,
    Lb,
}

impl fmt::Display for WeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeightType::Kg => "kg",
            WeightType::Lb => "lb",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightType {
    #[default]
    Cm,
    Inch,
}

impl fmt::Display for HeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeightType::Cm => "cm",
            HeightType::Inch => "inch",
        })
    }
}

/// Arguments for `exercise_entry.edit`.
///
/// Every edit moves `minutes` from one activity to another. Exercise id `0`
/// is the custom "Other" type and needs a name on that side of the shift.
#[derive(Debug, Clone, Default)]
pub struct ExerciseEntryEdit {
    pub shift_to_id: i64,
    pub shift_from_id: i64,
    pub minutes: u32,
    pub date: Option<NaiveDate>,
    pub shift_to_name: Option<String>,
    pub shift_from_name: Option<String>,
    pub kcals: Option<u32>,
}

impl ExerciseEntryEdit {
    pub fn new(shift_to_id: i64, shift_from_id: i64, minutes: u32) -> Self {
        Self {
            shift_to_id,
            shift_from_id,
            minutes,
            ..Default::default()
        }
    }
}

/// Arguments for `weight.update`.
///
/// First weigh-ins must carry `goal_weight_kg` and `current_height_cm`.
#[derive(Debug, Clone, Default)]
pub struct WeightUpdate {
    pub current_weight_kg: f64,
    pub date: Option<NaiveDate>,
    pub weight_type: WeightType,
    pub height_type: HeightType,
    pub goal_weight_kg: Option<f64>,
    pub current_height_cm: Option<f64>,
    pub comment: Option<String>,
}

impl WeightUpdate {
    pub fn new(current_weight_kg: f64) -> Self {
        Self {
            current_weight_kg,
            ..Default::default()
        }
    }
}

/// Flat query parameters for one REST call.
///
/// Always starts with `method` and `format=json`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiParams {
    pairs: Vec<(String, String)>,
}

impl ApiParams {
    pub fn new(method: &str) -> Self {
        Self {
            pairs: vec![
                ("method".to_string(), method.to_string()),
                ("format".to_string(), "json".to_string()),
            ],
        }
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn method(&self) -> &str {
        self.get("method").unwrap_or_default()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
