//! Credentials and the authentication gate.

use crate::domain::{ApiKey, Password, Status, Username, ValidationError};
use crate::transport::{METHOD_BALANCE, UserData, encode_balance_request};

use super::{SmsClient, SmsError, transport_error};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account credentials sent with every gateway request.
///
/// Use [`Credentials::api_key`] for Comms API keys, or [`Credentials::password`]
/// for a username/password pair. Both travel as `userdata.username` and
/// `userdata.password` on the wire.
pub enum Credentials {
    ApiKey { username: Username, api_key: ApiKey },
    Password { username: Username, password: Password },
}

impl Credentials {
    /// Create [`Credentials::ApiKey`] and validate that both parts are non-empty.
    pub fn api_key(
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::ApiKey {
            username: Username::new(username)?,
            api_key: ApiKey::new(api_key)?,
        })
    }

    /// Create [`Credentials::Password`] and validate that both parts are non-empty.
    pub fn password(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Password {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        match self {
            Self::ApiKey { username, .. } | Self::Password { username, .. } => username,
        }
    }

    /// Human-readable credential shape, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey { .. } => "API key",
            Self::Password { .. } => "password",
        }
    }

    pub(crate) fn userdata(&self) -> UserData<'_> {
        let secret = match self {
            Self::ApiKey { api_key, .. } => api_key.as_str(),
            Self::Password { password, .. } => password.as_str(),
        };
        UserData {
            username: self.username().as_str(),
            secret,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Whether the held credentials have been confirmed by the gateway.
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl SmsClient {
    /// Validate the held credentials against the gateway.
    ///
    /// Sends a `Balance` request without message data. On `OK` the client becomes
    /// [`AuthState::Authenticated`]; on any other outcome it stays (or becomes)
    /// [`AuthState::Unauthenticated`] and [`SmsError::AuthenticationFailed`] is returned.
    pub async fn authenticate(&mut self) -> Result<(), SmsError> {
        match self.validate_credentials().await {
            Ok(()) => {
                self.state = AuthState::Authenticated;
                tracing::info!(
                    username = self.credentials.username().as_str(),
                    credentials = self.credentials.kind(),
                    "credentials validated"
                );
                Ok(())
            }
            Err(err) => {
                self.state = AuthState::Unauthenticated;
                let reason = match err {
                    SmsError::AuthenticationFailed { reason } => reason,
                    other => other.to_string(),
                };
                tracing::warn!(
                    username = self.credentials.username().as_str(),
                    %reason,
                    "credential validation failed"
                );
                Err(SmsError::AuthenticationFailed { reason })
            }
        }
    }

    pub fn auth_state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    /// Gate for gateway operations: re-validates once when not yet authenticated.
    pub(super) async fn ensure_authenticated(&mut self) -> bool {
        if self.is_authenticated() {
            return true;
        }
        tracing::warn!("client is not authenticated; re-validating held credentials");
        self.authenticate().await.is_ok()
    }

    async fn validate_credentials(&self) -> Result<(), SmsError> {
        let body = encode_balance_request(self.credentials.userdata()).map_err(transport_error)?;
        let result = self.post(METHOD_BALANCE, body).await?;
        match result.status {
            Status::Ok => Ok(()),
            Status::Failed => Err(SmsError::AuthenticationFailed {
                reason: result
                    .message
                    .unwrap_or_else(|| "credentials rejected by gateway".to_owned()),
            }),
        }
    }
}
