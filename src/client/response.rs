//! Response validation for FatSecret API calls.
//!
//! The REST endpoint answers almost everything with HTTP 200 and reports
//! failures inside the body, so validation looks at the decoded JSON rather
//! than the status line.

use reqwest::Response;
use serde::Deserialize;
use serde_json::Value;

use crate::client::error::{FatsecretError, Result};

/// The `error` object embedded in a failed API response.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Decode a raw API response and surface any error envelope it carries.
pub async fn valid_response(response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    tracing::debug!("API response status: {}, {} bytes", status, text.len());

    let body: Value = serde_json::from_str(&text).map_err(|e| {
        tracing::error!("Failed to decode API response ({}): {}", status, e);
        FatsecretError::from(e)
    })?;

    validate_body(body)
}

/// Check an already decoded body. Bodies without an `error` key are
/// returned unchanged, whether object or list.
pub fn validate_body(body: Value) -> Result<Value> {
    let Some(error) = body.get("error") else {
        return Ok(body);
    };

    let envelope = ErrorEnvelope::deserialize(error)?;
    tracing::error!(
        "FatSecret API error {}: {}",
        envelope.code,
        envelope.message
    );
    Err(FatsecretError::from_code(envelope.code, envelope.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn error_body(code: i64) -> Value {
        json!({"error": {"code": code, "message": format!("error {code}")}})
    }

    #[test]
    fn test_body_without_error_is_returned_verbatim() {
        let body = json!({"food": {"food_id": "4380", "food_name": "Tomato"}});
        assert_eq!(validate_body(body.clone()).unwrap(), body);

        let list = json!([{"recipe_type": "Appetizer"}, {"recipe_type": "Soup"}]);
        assert_eq!(validate_body(list.clone()).unwrap(), list);
    }

    #[test]
    fn test_error_envelope_categories() {
        for code in [1, 10, 11, 12, 20, 21] {
            assert!(matches!(
                validate_body(error_body(code)),
                Err(FatsecretError::General { .. })
            ));
        }
        for code in 2..=9 {
            assert!(matches!(
                validate_body(error_body(code)),
                Err(FatsecretError::Authentication { .. })
            ));
        }
        for code in 101..=108 {
            assert!(matches!(
                validate_body(error_body(code)),
                Err(FatsecretError::Parameter { .. })
            ));
        }
        for code in 201..=207 {
            assert!(matches!(
                validate_body(error_body(code)),
                Err(FatsecretError::Application { .. })
            ));
        }
    }

    #[test]
    fn test_error_carries_code_and_message() {
        match validate_body(json!({"error": {"code": 2, "message": "Authentication required"}})) {
            Err(FatsecretError::Authentication { code, message }) => {
                assert_eq!(code, 2);
                assert_eq!(message, "Authentication required");
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_without_message() {
        match validate_body(json!({"error": {"code": 107}})) {
            Err(FatsecretError::Parameter { code, message }) => {
                assert_eq!(code, 107);
                assert!(message.is_empty());
            }
            other => panic!("expected parameter error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_error_envelope() {
        let result = validate_body(json!({"error": "something went wrong"}));
        assert!(matches!(result, Err(FatsecretError::Json(_))));
    }
}
