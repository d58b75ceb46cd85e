use serde::Serialize;

use super::TransportError;

pub const METHOD_SEND_SMS: &str = "SendSms";
pub const METHOD_BALANCE: &str = "Balance";

#[derive(Debug, Clone, Copy)]
/// Borrowed account credentials as they travel in `userdata`.
///
/// The gateway names the secret `password` whether it is a password or an API key.
pub struct UserData<'a> {
    pub username: &'a str,
    pub secret: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct ApiRequestJson<'a> {
    pub method: &'static str,
    pub userdata: UserDataJson<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgdata: Option<Vec<MessageJson<'a>>>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserDataJson<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<UserData<'a>> for UserDataJson<'a> {
    fn from(value: UserData<'a>) -> Self {
        Self {
            username: value.username,
            password: value.secret,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct MessageJson<'a> {
    pub number: &'a str,
    pub message: &'a str,
    pub senderid: &'a str,
    pub priority: &'static str,
}

/// Encode a `Balance` request. The same body doubles as the credential check.
pub fn encode_balance_request(userdata: UserData<'_>) -> Result<serde_json::Value, TransportError> {
    let request = ApiRequestJson {
        method: METHOD_BALANCE,
        userdata: userdata.into(),
        msgdata: None,
    };
    Ok(serde_json::to_value(&request)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn balance_request_has_no_msgdata() {
        let body = encode_balance_request(UserData {
            username: "user",
            secret: "key",
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "method": "Balance",
                "userdata": { "username": "user", "password": "key" }
            })
        );
        assert!(body.get("msgdata").is_none());
    }
}
