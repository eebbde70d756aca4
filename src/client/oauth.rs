//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! FatSecret signs every REST call with the consumer secret and, once a user
//! has authorized the application, the access token secret. During the token
//! dance the request token pair takes the access token's place.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{distributions::Alphanumeric, Rng};
use ring::hmac;
use url::Url;

use crate::client::types::SessionToken;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// RFC 3986 percent-encoding; only `A-Za-z0-9-._~` pass through.
pub(crate) fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

pub(crate) struct OAuthSigner<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: Option<&'a SessionToken>,
}

impl<'a> OAuthSigner<'a> {
    pub(crate) fn new(
        consumer_key: &'a str,
        consumer_secret: &'a str,
        token: Option<&'a SessionToken>,
    ) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token,
        }
    }

    /// Returns `params` extended with the `oauth_*` fields and signature.
    pub(crate) fn sign(
        &self,
        method: &str,
        url: &str,
        params: Vec<(String, String)>,
    ) -> Vec<(String, String)> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp();
        self.sign_with(method, url, params, &nonce, timestamp)
    }

    fn sign_with(
        &self,
        method: &str,
        url: &str,
        mut params: Vec<(String, String)>,
        nonce: &str,
        timestamp: i64,
    ) -> Vec<(String, String)> {
        params.push(("oauth_consumer_key".to_string(), self.consumer_key.to_string()));
        params.push(("oauth_nonce".to_string(), nonce.to_string()));
        params.push(("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()));
        params.push(("oauth_timestamp".to_string(), timestamp.to_string()));
        params.push(("oauth_version".to_string(), OAUTH_VERSION.to_string()));
        if let Some(token) = self.token {
            params.push(("oauth_token".to_string(), token.token.clone()));
        }

        let base = signature_base_string(method, url, &params);
        let signature = self.signature(&base);
        params.push(("oauth_signature".to_string(), signature));
        params
    }

    fn signature(&self, base: &str) -> String {
        let token_secret = self.token.map(|t| t.secret.as_str()).unwrap_or("");
        let signing_key = format!(
            "{}&{}",
            percent_encode(self.consumer_secret),
            percent_encode(token_secret)
        );
        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, signing_key.as_bytes());
        STANDARD.encode(hmac::sign(&key, base.as_bytes()).as_ref())
    }
}

/// `METHOD&url&params`, every piece percent-encoded, params sorted by
/// encoded key then encoded value. Any query string on `url` is moved into
/// the parameter set.
pub(crate) fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let (base_url, query_pairs) = split_query(url);
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .chain(query_pairs.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_url),
        percent_encode(&normalized)
    )
}

fn split_query(url: &str) -> (String, Vec<(String, String)>) {
    match Url::parse(url) {
        Ok(mut parsed) => {
            let pairs = parsed.query_pairs().into_owned().collect();
            parsed.set_query(None);
            parsed.set_fragment(None);
            (parsed.into(), pairs)
        }
        Err(_) => (url.to_string(), Vec::new()),
    }
}
