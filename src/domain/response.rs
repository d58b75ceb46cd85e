#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
/// Decoded gateway answer, shared by `SendSms` and `Balance`.
pub struct ApiResult {
    pub status: Status,
    pub message: Option<String>,
    pub cost: Option<f64>,
    pub currency: Option<String>,
    pub follow_up_code: Option<String>,
    pub balance: Option<f64>,
}

impl ApiResult {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of a send attempt that did not fail with an error.
pub enum SendOutcome {
    /// The gateway answered; inspect [`ApiResult::status`].
    Response(ApiResult),
    /// Credentials could not be validated, so nothing was sent.
    Unauthenticated,
    /// Every recipient was rejected by normalization, so nothing was sent.
    NoValidRecipients,
}

impl SendOutcome {
    /// The gateway answer, if a request was actually sent.
    pub fn response(&self) -> Option<&ApiResult> {
        match self {
            Self::Response(result) => Some(result),
            Self::Unauthenticated | Self::NoValidRecipients => None,
        }
    }

    /// `true` only when the gateway accepted the message.
    pub fn is_sent(&self) -> bool {
        self.response().is_some_and(ApiResult::is_ok)
    }
}
