//! Gateway adapters and environment selection.

use std::fmt;

use super::auth::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Which deployment the client talks to. Resolved to a base URL when the client is built.
pub enum Environment {
    #[default]
    Production,
    /// Test deployment; requires a separate sandbox account.
    Sandbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Gateway family. Both speak the same JSON protocol and differ only in base URLs,
/// default sender id, and the credential shapes they accept.
pub enum Gateway {
    /// `comms.egosms.co`: username with an API key or a password.
    #[default]
    Comms,
    /// `www.egosms.co`: username with a password only.
    EgoSms,
}

impl Gateway {
    /// Base URL of the JSON API for `environment`.
    pub fn base_url(self, environment: Environment) -> &'static str {
        match (self, environment) {
            (Self::Comms, Environment::Production) => "https://comms.egosms.co/api/v1/json/",
            (Self::Comms, Environment::Sandbox) => "https://comms-test.pahappa.net/api/v1/json/",
            (Self::EgoSms, Environment::Production) => "https://www.egosms.co/api/v1/json/",
            (Self::EgoSms, Environment::Sandbox) => "http://sandbox.egosms.co/api/v1/json/",
        }
    }

    /// Sender label used when neither the client nor the request sets one.
    pub fn default_sender_id(self) -> &'static str {
        match self {
            Self::Comms => "EgoSMS",
            Self::EgoSms => "EgoSms",
        }
    }

    /// Whether this gateway accepts the given credential shape.
    pub fn supports(self, credentials: &Credentials) -> bool {
        match self {
            Self::Comms => true,
            Self::EgoSms => matches!(credentials, Credentials::Password { .. }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Comms => "Comms",
            Self::EgoSms => "EgoSms",
        }
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
