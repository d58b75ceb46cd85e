use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// JSON field name used inside `userdata` (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Account API key issued by the Comms gateway.
///
/// Invariant: non-empty after trimming. `Debug` output never shows the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Logical field name (`api_key`); on the wire the key travels as `password`.
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// JSON field name used inside `userdata` (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender label shown to the recipient (`senderid`).
///
/// Invariant: non-empty after trimming. Labels longer than
/// [`SenderId::RECOMMENDED_MAX_LEN`] are accepted, but some networks truncate them.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used in `msgdata` entries (`senderid`).
    pub const FIELD: &'static str = "senderid";

    /// Longest label that every network is known to deliver untouched.
    pub const RECOMMENDED_MAX_LEN: usize = 11;

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the label exceeds [`SenderId::RECOMMENDED_MAX_LEN`] characters.
    pub fn exceeds_recommended_len(&self) -> bool {
        self.0.chars().count() > Self::RECOMMENDED_MAX_LEN
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`message`).
///
/// Invariant: at least [`MessageText::MIN_LEN`] characters. The value is not
/// trimmed.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used in `msgdata` entries (`message`).
    pub const FIELD: &'static str = "message";

    /// The gateway refuses single-character bodies.
    pub const MIN_LEN: usize = 2;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let len = value.chars().count();
        if len < Self::MIN_LEN {
            return Err(ValidationError::MessageTooShort {
                min: Self::MIN_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Delivery priority for a message (`priority`).
pub enum Priority {
    #[default]
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl Priority {
    /// JSON field name used in `msgdata` entries (`priority`).
    pub const FIELD: &'static str = "priority";

    /// Ordinal string sent on the wire (`"0"` for [`Priority::Highest`] up to `"4"`).
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Self::Highest => "0",
            Self::High => "1",
            Self::Medium => "2",
            Self::Low => "3",
            Self::Lowest => "4",
        }
    }

    /// Parse the ordinal wire string back into a priority.
    pub fn from_wire_str(value: &str) -> Option<Self> {
        Some(match value.trim() {
            "0" => Self::Highest,
            "1" => Self::High,
            "2" => Self::Medium,
            "3" => Self::Low,
            "4" => Self::Lowest,
            _ => return None,
        })
    }
}
