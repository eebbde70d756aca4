#![allow(dead_code)]

use fatsecret::{ClientConfig, FatsecretClient, SessionToken};
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_PATH: &str = "/rest/server.api";
pub const CONSUMER_KEY: &str = "test-consumer-key";
pub const CONSUMER_SECRET: &str = "test-consumer-secret";

/// Client configuration with every endpoint pointed at the mock server.
pub fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_api_url(format!("{}{}", server.uri(), API_PATH))
        .with_oauth_base(&server.uri())
}

pub fn consumer_client(server: &MockServer) -> FatsecretClient {
    FatsecretClient::with_config(CONSUMER_KEY, CONSUMER_SECRET, mock_config(server))
        .expect("Failed to build client")
}

pub fn user_client(server: &MockServer) -> FatsecretClient {
    FatsecretClient::with_session_token(
        CONSUMER_KEY,
        CONSUMER_SECRET,
        SessionToken::new("access-token", "access-secret"),
        mock_config(server),
    )
    .expect("Failed to build client")
}

/// Answer one API method with a JSON body, expecting exactly one call.
pub async fn mount_method(server: &MockServer, api_method: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("method", api_method))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

pub fn login_page(viewstate: Option<&str>, generator: Option<&str>) -> String {
    let mut hidden = String::new();
    if let Some(viewstate) = viewstate {
        hidden.push_str(&format!(
            r#"<input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="{viewstate}" />"#
        ));
    }
    if let Some(generator) = generator {
        hidden.push_str(&format!(
            r#"<input type="hidden" name="__VIEWSTATEGENERATOR" id="__VIEWSTATEGENERATOR" value="{generator}" />"#
        ));
    }
    format!(
        r#"<html><body><form method="post" id="form1">{hidden}
        <input name="Name" type="text" /><input name="Password" type="password" />
        <input type="image" name="Login" src="/login.gif" /></form></body></html>"#
    )
}

pub fn pin_page(pin: Option<&str>) -> String {
    match pin {
        Some(pin) => format!(
            "<html><body><p>Enter the following PIN in the application:</p><b>{pin}</b></body></html>"
        ),
        None => "<html><body><p>Invalid username or password.</p></body></html>".to_string(),
    }
}
