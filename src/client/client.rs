use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

use crate::client::{
    error::{FatsecretError, Result},
    oauth::OAuthSigner,
    response,
    types::{ApiParams, ClientConfig, SessionToken},
};

/// Callback value telling FatSecret to display the verifier PIN instead of
/// redirecting.
const OUT_OF_BAND: &str = "oob";

pub struct FatsecretClient {
    consumer_key: String,
    consumer_secret: String,
    client: Client,
    config: ClientConfig,
    request_token: Option<SessionToken>,
    session_token: Option<SessionToken>,
}

impl FatsecretClient {
    /// Consumer-only client; enough for the public food and recipe methods.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
        Self::with_config(consumer_key, consumer_secret, ClientConfig::default())
    }

    pub fn with_config(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            client,
            config,
            request_token: None,
            session_token: None,
        })
    }

    /// Client acting on behalf of a user whose access token is already known.
    /// Performs no network I/O.
    pub fn with_session_token(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        session_token: SessionToken,
        config: ClientConfig,
    ) -> Result<Self> {
        let mut client = Self::with_config(consumer_key, consumer_secret, config)?;
        client.session_token = Some(session_token);
        Ok(client)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_token.is_some()
    }

    pub fn session_token(&self) -> Option<&SessionToken> {
        self.session_token.as_ref()
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whole days between the Unix epoch and `date`; the epoch itself is day 0.
    pub fn unix_time(date: NaiveDate) -> i64 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
        (date - epoch).num_days()
    }

    /// Fetch a request token and return the URL the user must visit to
    /// authorize this application.
    pub async fn get_authorize_url(&mut self) -> Result<String> {
        self.get_authorize_url_with_callback(OUT_OF_BAND).await
    }

    pub async fn get_authorize_url_with_callback(&mut self, callback_url: &str) -> Result<String> {
        let params = vec![("oauth_callback".to_string(), callback_url.to_string())];
        let request_token = self
            .fetch_token(&self.config.request_token_url, params, None)
            .await?;

        let mut url = url::Url::parse(&self.config.authorize_url)?;
        url.query_pairs_mut()
            .append_pair("oauth_token", &request_token.token);

        tracing::debug!("Obtained request token, authorize at: {}", url);
        self.request_token = Some(request_token);
        Ok(url.into())
    }

    /// Exchange the verifier PIN shown after login for an access token.
    pub async fn authenticate(&mut self, verifier: &str) -> Result<SessionToken> {
        let request_token = self.request_token.as_ref().ok_or_else(|| {
            FatsecretError::OAuth("no request token; call get_authorize_url first".to_string())
        })?;

        // Kept until the exchange succeeds so a mistyped PIN can be retried.
        let params = vec![("oauth_verifier".to_string(), verifier.to_string())];
        let access_token = self
            .fetch_token(&self.config.access_token_url, params, Some(request_token))
            .await?;

        tracing::info!("Exchanged verifier for access token");
        self.request_token = None;
        self.session_token = Some(access_token.clone());
        Ok(access_token)
    }

    async fn fetch_token(
        &self,
        url: &str,
        params: Vec<(String, String)>,
        token: Option<&SessionToken>,
    ) -> Result<SessionToken> {
        let signed = OAuthSigner::new(&self.consumer_key, &self.consumer_secret, token)
            .sign("GET", url, params);

        tracing::debug!("Requesting OAuth token from: {}", url);
        let response = self.client.get(url).query(&signed).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("OAuth token request failed with status {}: {}", status, body);
            return Err(FatsecretError::OAuth(format!(
                "token request to {} failed with status {}: {}",
                url, status, body
            )));
        }

        parse_token_response(&body)
    }

    /// Sign and send one REST call, then validate the body.
    pub(crate) async fn call(&self, params: ApiParams) -> Result<Value> {
        tracing::debug!("Calling FatSecret method: {}", params.method());

        let signed = OAuthSigner::new(
            &self.consumer_key,
            &self.consumer_secret,
            self.session_token.as_ref(),
        )
        .sign("GET", &self.config.api_url, params.into_pairs());

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&signed)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error calling FatSecret API: {}", e);
                e
            })?;

        response::valid_response(response).await
    }
}

/// Parse a form-encoded `oauth_token=..&oauth_token_secret=..` body.
fn parse_token_response(body: &str) -> Result<SessionToken> {
    let mut token = None;
    let mut secret = None;
    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) => Ok(SessionToken { token, secret }),
        _ => Err(FatsecretError::OAuth(format!(
            "token response is missing oauth_token/oauth_token_secret: {}",
            body
        ))),
    }
}
