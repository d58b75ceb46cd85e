//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod number;
mod request;
mod response;
mod send_sms;

pub use request::{METHOD_BALANCE, METHOD_SEND_SMS, UserData, encode_balance_request};
pub use response::decode_api_response;
pub use send_sms::encode_send_sms_request;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized response status: {status:?}")]
    UnknownStatus { status: String },
}
