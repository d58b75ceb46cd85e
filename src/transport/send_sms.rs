use super::TransportError;
use super::request::{ApiRequestJson, METHOD_SEND_SMS, MessageJson, UserData};
use crate::domain::{MessageText, PhoneNumber, Priority, SenderId};

/// Encode a `SendSms` request with one `msgdata` entry per canonical recipient.
///
/// Body, sender id, and priority are shared by every entry.
pub fn encode_send_sms_request(
    userdata: UserData<'_>,
    recipients: &[PhoneNumber],
    message: &MessageText,
    sender_id: &SenderId,
    priority: Priority,
) -> Result<serde_json::Value, TransportError> {
    let msgdata = recipients
        .iter()
        .map(|number| MessageJson {
            number: number.as_str(),
            message: message.as_str(),
            senderid: sender_id.as_str(),
            priority: priority.as_wire_str(),
        })
        .collect::<Vec<_>>();

    let request = ApiRequestJson {
        method: METHOD_SEND_SMS,
        userdata: userdata.into(),
        msgdata: Some(msgdata),
    };
    Ok(serde_json::to_value(&request)?)
}
