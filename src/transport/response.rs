use serde::Deserialize;

use super::TransportError;
use super::number::TransportNumber;
use crate::domain::{ApiResult, Status};

#[derive(Debug, Clone, Deserialize)]
struct ApiJsonResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Cost", default)]
    cost: Option<TransportNumber>,
    #[serde(rename = "Currency", default)]
    currency: Option<String>,
    #[serde(rename = "MsgFollowUpUniqueCode", default)]
    follow_up_code: Option<String>,
    #[serde(rename = "Balance", default)]
    balance: Option<TransportNumber>,
}

fn decode_status(raw: &str) -> Result<Status, TransportError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("ok") {
        Ok(Status::Ok)
    } else if trimmed.eq_ignore_ascii_case("failed") {
        Ok(Status::Failed)
    } else {
        Err(TransportError::UnknownStatus {
            status: raw.to_owned(),
        })
    }
}

/// Decode a gateway answer. Both `SendSms` and `Balance` share this shape.
pub fn decode_api_response(json: &str) -> Result<ApiResult, TransportError> {
    let parsed: ApiJsonResponse = serde_json::from_str(json)?;
    Ok(ApiResult {
        status: decode_status(&parsed.status)?,
        message: parsed.message,
        cost: parsed.cost.and_then(TransportNumber::into_f64),
        currency: parsed.currency,
        follow_up_code: parsed.follow_up_code,
        balance: parsed.balance.and_then(TransportNumber::into_f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_send_response_with_follow_up_code() {
        let json = r#"
        {
          "Status": "OK",
          "Cost": 50,
          "Currency": "UGX",
          "MsgFollowUpUniqueCode": "egosms-4f1c2a"
        }
        "#;

        let result = decode_api_response(json).unwrap();
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.cost, Some(50.0));
        assert_eq!(result.currency.as_deref(), Some("UGX"));
        assert_eq!(result.follow_up_code.as_deref(), Some("egosms-4f1c2a"));
        assert_eq!(result.balance, None);
        assert_eq!(result.message, None);
    }

    #[test]
    fn decode_balance_given_as_string() {
        let json = r#"{ "Status": "OK", "Balance": "1500.75", "Cost": "" }"#;

        let result = decode_api_response(json).unwrap();
        assert_eq!(result.balance, Some(1500.75));
        assert_eq!(result.cost, None);
    }

    #[test]
    fn decode_failed_keeps_gateway_message() {
        let json = r#"{ "Status": "Failed", "Message": "Invalid credentials" }"#;

        let result = decode_api_response(json).unwrap();
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn status_matching_ignores_ascii_case() {
        for raw in ["OK", "ok", "Ok"] {
            let json = format!(r#"{{ "Status": "{raw}" }}"#);
            assert_eq!(decode_api_response(&json).unwrap().status, Status::Ok);
        }
        for raw in ["Failed", "FAILED", "failed"] {
            let json = format!(r#"{{ "Status": "{raw}" }}"#);
            assert_eq!(decode_api_response(&json).unwrap().status, Status::Failed);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = decode_api_response(r#"{ "Status": "Pending" }"#).unwrap_err();
        assert!(matches!(
            err,
            TransportError::UnknownStatus { status } if status == "Pending"
        ));
    }

    #[test]
    fn missing_status_or_bad_json_is_a_json_error() {
        assert!(matches!(
            decode_api_response(r#"{ "Message": "hi" }"#),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_api_response("<html>502</html>"),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_api_response(r#"{ "Status": "OK", "Balance": "lots" }"#),
            Err(TransportError::Json(_))
        ));
    }
}
