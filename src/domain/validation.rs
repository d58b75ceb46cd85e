use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    MessageTooShort {
        min: usize,
        actual: usize,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidEndpoint {
        value: String,
    },
    UnsupportedCredentials {
        gateway: &'static str,
        credentials: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MessageTooShort { min, actual } => {
                write!(
                    f,
                    "message too short: {actual} character(s) (min {min})"
                )
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidEndpoint { value } => write!(f, "invalid endpoint URL: {value}"),
            Self::UnsupportedCredentials {
                gateway,
                credentials,
            } => write!(
                f,
                "{credentials} credentials are not supported by the {gateway} gateway"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
