use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Priority, SenderId};

/// Field name reported when the recipient list is empty.
pub const RECIPIENTS_FIELD: &str = "numbers";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Per-send overrides. Unset values fall back to the client defaults.
///
/// - `sender_id`: the client's default sender id,
/// - `priority`: [`Priority::Highest`].
pub struct SendOptions {
    pub sender_id: Option<SenderId>,
    pub priority: Option<Priority>,
}

impl SendOptions {
    /// Use `value` as the sender label. A blank value leaves the client default in place.
    pub fn with_sender_id(mut self, value: impl Into<String>) -> Self {
        self.sender_id = SenderId::new(value).ok();
        self
    }

    /// Override the delivery priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// The priority to send with.
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
/// A message to deliver to one or more raw recipient numbers.
///
/// Numbers are kept as given; they are normalized when the request is sent, and
/// entries that fail normalization are skipped rather than failing the request.
pub struct SendSms {
    recipients: Vec<String>,
    message: MessageText,
    options: SendOptions,
}

impl SendSms {
    /// Build a request for `recipients`.
    ///
    /// Fails with [`ValidationError::Empty`] when `recipients` is empty.
    pub fn new<I, S>(
        recipients: I,
        message: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let recipients: Vec<String> = recipients.into_iter().map(Into::into).collect();
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RECIPIENTS_FIELD,
            });
        }
        Ok(Self {
            recipients,
            message,
            options,
        })
    }

    /// Build a request for a single recipient.
    pub fn to_one(number: impl Into<String>, message: MessageText, options: SendOptions) -> Self {
        Self {
            recipients: vec![number.into()],
            message,
            options,
        }
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}
