//! Authentication handling for FatSecret.
//!
//! FatSecret only offers three-legged OAuth 1.0a for user data: the user has
//! to visit an authorize page, log in, and copy a verifier PIN back. This
//! module automates that by emulating the ASP.NET login form.
//!
//! ## Resolution order
//!
//! 1. A pre-acquired access token pair is used as-is, with no network call.
//! 2. Without both a username and a password nothing is attempted.
//! 3. Otherwise the login form is driven to obtain a verifier PIN, which is
//!    exchanged for an access token.
//!
//! Failures never propagate: every path returns `None` so callers can fall
//! back to a consumer-only client.
//!
//! **NOTE**: The form emulation depends on undocumented markup and will break
//! if FatSecret changes the login page. It sits behind [`VerifierSource`] so
//! a different flow can be dropped in without touching callers.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use url::Url;

use crate::client::{
    client::FatsecretClient,
    error::{FatsecretError, Result},
    types::{session_token_from_env, ClientConfig, Credentials},
};

const VIEWSTATE: &str = "__VIEWSTATE";
const VIEWSTATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";

/// Produces the OAuth verifier PIN for a user, given the authorize URL.
#[async_trait]
pub trait VerifierSource: Send + Sync {
    async fn obtain_verifier(
        &self,
        authorize_url: &str,
        username: &str,
        password: &str,
    ) -> Result<String>;
}

/// Drives the interactive login page (`authorize.aspx`) like a browser would.
pub struct FormLogin {
    config: ClientConfig,
}

impl FormLogin {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn http_client(&self) -> Result<Client> {
        // The postback only validates with the session cookie from the GET.
        Ok(Client::builder()
            .cookie_store(true)
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .build()?)
    }
}

impl Default for FormLogin {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[async_trait]
impl VerifierSource for FormLogin {
    async fn obtain_verifier(
        &self,
        authorize_url: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let session = self.http_client()?;

        tracing::debug!("Fetching login page: {}", authorize_url);
        let login_page = session
            .get(authorize_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let (Some(viewstate), Some(generator)) = (
            hidden_input_value(&login_page, VIEWSTATE),
            hidden_input_value(&login_page, VIEWSTATE_GENERATOR),
        ) else {
            return Err(FatsecretError::LoginForm(
                "missing __VIEWSTATE inputs on login page".to_string(),
            ));
        };

        let payload = [
            (VIEWSTATE, viewstate.as_str()),
            (VIEWSTATE_GENERATOR, generator.as_str()),
            ("Name", username),
            ("Password", password),
            ("Login.x", "0"),
            ("Login.y", "0"),
        ];

        tracing::debug!("Submitting login form");
        let pin_page = session
            .post(authorize_url)
            .form(&payload)
            .send()
            .await?
            .text()
            .await?;

        let pin = first_bold_text(&pin_page).ok_or_else(|| {
            FatsecretError::LoginForm(
                "failed to find PIN in response; login may have failed".to_string(),
            )
        })?;

        tracing::info!("Obtained verifier PIN ({} chars)", pin.len());
        Ok(pin)
    }
}

/// Resolve `credentials` into an authenticated client using the default
/// endpoints and the HTML form login.
pub async fn authenticate(credentials: &Credentials) -> Option<FatsecretClient> {
    let config = ClientConfig::default();
    let login = FormLogin::new(config.clone());
    authenticate_with(credentials, config, &login).await
}

/// Same as [`authenticate`], with the access token pair taken from
/// `FATSECRET_ACCESS_TOKEN` / `FATSECRET_ACCESS_SECRET` when both are set.
pub async fn fatsecret_authenticate(
    username: Option<&str>,
    password: Option<&str>,
    consumer_key: &str,
    consumer_secret: &str,
) -> Option<FatsecretClient> {
    let mut credentials = Credentials::new(consumer_key, consumer_secret);
    credentials.username = username.map(str::to_string);
    credentials.password = password.map(str::to_string);
    credentials.session_token = session_token_from_env();
    authenticate(&credentials).await
}

pub async fn authenticate_with<V: VerifierSource + ?Sized>(
    credentials: &Credentials,
    config: ClientConfig,
    verifier_source: &V,
) -> Option<FatsecretClient> {
    let saved_token = credentials
        .session_token
        .as_ref()
        .filter(|t| !t.token.is_empty() && !t.secret.is_empty());
    if let Some(token) = saved_token {
        tracing::debug!("Using pre-acquired access token");
        return match FatsecretClient::with_session_token(
            credentials.consumer_key.clone(),
            credentials.consumer_secret.clone(),
            token.clone(),
            config,
        ) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Failed to build client for access token: {}", e);
                None
            }
        };
    }

    let (Some(username), Some(password)) = (
        credentials.username.as_deref().filter(|u| !u.is_empty()),
        credentials.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        tracing::debug!("No username/password supplied; skipping login");
        return None;
    };

    match login(credentials, config, verifier_source, username, password).await {
        Ok(client) => {
            tracing::info!("Authentication successful");
            Some(client)
        }
        Err(e) => {
            tracing::warn!("Failed to authenticate: {}", e);
            None
        }
    }
}

async fn login<V: VerifierSource + ?Sized>(
    credentials: &Credentials,
    config: ClientConfig,
    verifier_source: &V,
    username: &str,
    password: &str,
) -> Result<FatsecretClient> {
    let mut client = FatsecretClient::with_config(
        credentials.consumer_key.clone(),
        credentials.consumer_secret.clone(),
        config,
    )?;

    let raw_authorize = client.get_authorize_url().await?;
    let authorize_url = login_page_url(&raw_authorize)?;

    let pin = verifier_source
        .obtain_verifier(&authorize_url, username, password)
        .await?;
    client.authenticate(&pin).await?;
    Ok(client)
}

/// Rewrite `.../authorize?oauth_token=..` to the interactive
/// `.../authorize.aspx?oauth_token=..` login page.
pub fn login_page_url(raw_authorize: &str) -> Result<String> {
    let mut url = Url::parse(raw_authorize)?;
    let path = url.path().trim_end_matches('/');

    if let Some(prefix) = path.strip_suffix("authorize") {
        let new_path = format!("{}authorize.aspx", prefix);
        url.set_path(&new_path);
        return Ok(url.into());
    }

    Ok(raw_authorize.replace("authorize", "authorize.aspx"))
}

fn cached_regex(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn input_tag_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached_regex(&RE, r"(?is)<input\b[^>]*>")
}

fn attribute_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached_regex(
        &RE,
        r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#,
    )
}

fn bold_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached_regex(&RE, r"(?is)<b(?:\s[^>]*)?>(.*?)</b\s*>")
}

fn hidden_markup_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached_regex(&RE, r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>")
}

/// `html` without comments and script bodies, which browsers never render.
fn visible_markup(html: &str) -> Option<std::borrow::Cow<'_, str>> {
    Some(hidden_markup_regex()?.replace_all(html, ""))
}

fn tag_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached_regex(&RE, r"(?s)<[^>]*>")
}

/// Value of the first `<input name="{name}">` that carries a value attribute.
fn hidden_input_value(html: &str, name: &str) -> Option<String> {
    let attributes = attribute_regex()?;
    let html = visible_markup(html)?;
    input_tag_regex()?.find_iter(&html).find_map(|tag| {
        let mut tag_name = None;
        let mut value = None;
        for caps in attributes.captures_iter(tag.as_str()) {
            let attr_value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "name" => tag_name = Some(attr_value.to_string()),
                "value" => value = Some(html_escape::decode_html_entities(attr_value).into_owned()),
                _ => {}
            }
        }
        if tag_name.as_deref() == Some(name) {
            value
        } else {
            None
        }
    })
}

/// Trimmed text content of the first `<b>` element, if it has any.
fn first_bold_text(html: &str) -> Option<String> {
    let html = visible_markup(html)?;
    let inner = bold_regex()?.captures(&html)?.get(1)?.as_str();
    let text = tag_regex()?.replace_all(inner, "");
    let text = html_escape::decode_html_entities(text.trim()).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOGIN_PAGE: &str = r#"
        <html><body>
        <form method="post" action="./authorize.aspx?oauth_token=abc" id="form1">
          <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="dDwtMTA4MTY2&amp;Mzk=" />
          <input type='hidden' name='__VIEWSTATEGENERATOR' id='__VIEWSTATEGENERATOR' value='C2EE9ABB' />
          <input name="Name" type="text" id="Name" />
          <input name="Password" type="password" id="Password" />
          <input type="image" name="Login" src="/images/login.gif" />
        </form>
        </body></html>
    "#;

    #[test]
    fn test_hidden_input_value() {
        assert_eq!(
            hidden_input_value(LOGIN_PAGE, VIEWSTATE).as_deref(),
            Some("dDwtMTA4MTY2&Mzk=")
        );
        assert_eq!(
            hidden_input_value(LOGIN_PAGE, VIEWSTATE_GENERATOR).as_deref(),
            Some("C2EE9ABB")
        );
    }

    #[test]
    fn test_hidden_input_missing() {
        assert_eq!(hidden_input_value(LOGIN_PAGE, "__EVENTVALIDATION"), None);
        // present but without a value attribute
        assert_eq!(hidden_input_value(LOGIN_PAGE, "Name"), None);
        assert_eq!(hidden_input_value("<html></html>", VIEWSTATE), None);
    }

    #[test]
    fn test_name_match_is_exact() {
        let html = r#"<input name="__VIEWSTATEGENERATOR" value="GEN"><input name="__VIEWSTATE" value="STATE">"#;
        assert_eq!(hidden_input_value(html, VIEWSTATE).as_deref(), Some("STATE"));
        assert_eq!(hidden_input_value(html, VIEWSTATE_GENERATOR).as_deref(), Some("GEN"));
    }

    #[test]
    fn test_first_bold_text() {
        let html = "<p>Your verifier is:</p>\n<B class=\"pin\">\n  4819203 \n</B><b>later</b>";
        assert_eq!(first_bold_text(html).as_deref(), Some("4819203"));
        assert_eq!(first_bold_text("<b><span>77</span></b>").as_deref(), Some("77"));
    }

    #[test]
    fn test_commented_markup_is_skipped() {
        let html = "<!-- <b>old</b> --><script>var s = '<b>42</b>';</script><b>12345</b>";
        assert_eq!(first_bold_text(html).as_deref(), Some("12345"));

        let form = r#"<!-- <input name="__VIEWSTATE" value="STALE"> -->
            <input name="__VIEWSTATE" value="FRESH">"#;
        assert_eq!(hidden_input_value(form, VIEWSTATE).as_deref(), Some("FRESH"));
        assert_eq!(hidden_input_value("<!-- <input name=\"__VIEWSTATE\" value=\"X\"> -->", VIEWSTATE), None);
    }

    #[test]
    fn test_first_bold_text_missing() {
        assert_eq!(first_bold_text("<p>Invalid username or password</p>"), None);
        assert_eq!(first_bold_text("<b>  </b>"), None);
        assert_eq!(first_bold_text("<body>no bold here</body>"), None);
    }

    #[test]
    fn test_login_page_url() {
        assert_eq!(
            login_page_url("https://www.fatsecret.com/oauth/authorize?oauth_token=abc").unwrap(),
            "https://www.fatsecret.com/oauth/authorize.aspx?oauth_token=abc"
        );
        assert_eq!(
            login_page_url("https://example.com/authorize").unwrap(),
            "https://example.com/authorize.aspx"
        );
        assert_eq!(
            login_page_url("http://127.0.0.1:8080/oauth/authorize/?oauth_token=t").unwrap(),
            "http://127.0.0.1:8080/oauth/authorize.aspx?oauth_token=t"
        );
    }

    #[test]
    fn test_login_page_url_fallback() {
        assert_eq!(
            login_page_url("https://example.com/login?next=authorize").unwrap(),
            "https://example.com/login?next=authorize.aspx"
        );
        assert!(login_page_url("not a url").is_err());
    }

    struct PanickingVerifier;

    #[async_trait]
    impl VerifierSource for PanickingVerifier {
        async fn obtain_verifier(&self, _: &str, _: &str, _: &str) -> Result<String> {
            panic!("login flow must not run");
        }
    }

    #[tokio::test]
    async fn test_session_token_short_circuits() {
        let credentials = Credentials::new("key", "secret")
            .with_login("user", "pass")
            .with_session_token(crate::client::types::SessionToken::new("t", "s"));
        // unroutable endpoints: any network call would fail
        let config = ClientConfig::default()
            .with_api_url("http://127.0.0.1:1/rest/server.api")
            .with_oauth_base("http://127.0.0.1:1");

        let client = authenticate_with(&credentials, config, &PanickingVerifier).await;
        let client = client.expect("token pair should yield a client");
        assert!(client.is_authenticated());
        assert_eq!(client.session_token().unwrap().token, "t");
    }

    #[tokio::test]
    async fn test_empty_session_token_is_ignored() {
        let config = ClientConfig::default().with_oauth_base("http://127.0.0.1:1");

        for token in [
            crate::client::types::SessionToken::new("", ""),
            crate::client::types::SessionToken::new("t", ""),
            crate::client::types::SessionToken::new("", "s"),
        ] {
            let credentials = Credentials::new("key", "secret").with_session_token(token);
            assert!(authenticate_with(&credentials, config.clone(), &PanickingVerifier)
                .await
                .is_none());
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_login_does_not_log_username() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let credentials = Credentials::new("key", "secret").with_login("jane.doe@example.com", "pw");
        let config = ClientConfig::default()
            .with_api_url("http://127.0.0.1:1/rest/server.api")
            .with_oauth_base("http://127.0.0.1:1");
        assert!(authenticate_with(&credentials, config, &PanickingVerifier)
            .await
            .is_none());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Failed to authenticate"), "{output}");
        assert!(!output.contains("jane.doe"), "{output}");
    }

    #[tokio::test]
    async fn test_missing_login_returns_none() {
        let config = ClientConfig::default().with_oauth_base("http://127.0.0.1:1");

        let no_login = Credentials::new("key", "secret");
        assert!(authenticate_with(&no_login, config.clone(), &PanickingVerifier)
            .await
            .is_none());

        let mut no_password = Credentials::new("key", "secret");
        no_password.username = Some("user".to_string());
        assert!(authenticate_with(&no_password, config.clone(), &PanickingVerifier)
            .await
            .is_none());

        let empty_password = Credentials::new("key", "secret").with_login("user", "");
        assert!(authenticate_with(&empty_password, config, &PanickingVerifier)
            .await
            .is_none());
    }
}
