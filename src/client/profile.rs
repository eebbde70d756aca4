use serde_json::Value;

use crate::client::{client::FatsecretClient, error::Result, types::ApiParams};

impl FatsecretClient {
    /// Create a profile and return its `auth_token` / `auth_secret`.
    ///
    /// Passing a `user_id` lets the profile's credentials be fetched later
    /// with [`profile_get_auth`](Self::profile_get_auth) instead of stored.
    pub async fn profile_create(&self, user_id: Option<&str>) -> Result<Value> {
        let mut params = ApiParams::new("profile.create");
        params.push_opt("user_id", user_id);
        self.call(params).await
    }

    pub async fn profile_get(&self) -> Result<Value> {
        self.call(ApiParams::new("profile.get")).await
    }

    pub async fn profile_get_auth(&self, user_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("profile.get_auth");
        params.push("user_id", user_id);
        self.call(params).await
    }
}
