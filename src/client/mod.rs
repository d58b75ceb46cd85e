//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod auth;
mod gateway;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::domain::{
    ApiResult, SendOutcome, SendSms, SenderId, Status, ValidationError, normalize_numbers,
};
use crate::transport::{
    METHOD_BALANCE, METHOD_SEND_SMS, TransportError, decode_api_response, encode_balance_request,
    encode_send_sms_request,
};

pub use auth::{AuthState, Credentials};
pub use gateway::{Environment, Gateway};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).json(&body).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`].
///
/// Gateway-level outcomes (a `Failed` answer, unvalidated credentials during a
/// send, no valid recipients) are reported as values, not errors. This type covers:
/// - invalid arguments,
/// - explicit authentication failures,
/// - protocol violations (transport failures, non-2xx status, unparsable or
///   unrecognized responses).
pub enum SmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a status other than `OK` or `Failed`.
    #[error("unexpected response status: {status:?}")]
    UnexpectedStatus { status: String },

    /// The gateway did not confirm the credentials.
    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn transport_error(err: TransportError) -> SmsError {
    match err {
        TransportError::UnknownStatus { status } => SmsError::UnexpectedStatus { status },
        other => SmsError::Parse(Box::new(other)),
    }
}

#[derive(Debug, Clone)]
/// Builder for [`SmsClient`].
///
/// Use this to pick the gateway and environment, or to customize the endpoint,
/// default sender id, timeout, or user-agent.
pub struct SmsClientBuilder {
    credentials: Credentials,
    gateway: Gateway,
    environment: Environment,
    endpoint: Option<String>,
    sender_id: Option<SenderId>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsClientBuilder {
    /// Create a builder for the Comms gateway in production.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            gateway: Gateway::default(),
            environment: Environment::default(),
            endpoint: None,
            sender_id: None,
            timeout: None,
            user_agent: None,
        }
    }

    pub fn gateway(mut self, gateway: Gateway) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Shorthand for `environment(Environment::Sandbox)`.
    pub fn sandbox(self) -> Self {
        self.environment(Environment::Sandbox)
    }

    /// Override the endpoint URL resolved from gateway and environment.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Replace the gateway's default sender id.
    pub fn sender_id(mut self, sender_id: SenderId) -> Self {
        self.sender_id = Some(sender_id);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an unauthenticated [`SmsClient`]. No request is made.
    ///
    /// Errors:
    /// - [`ValidationError::UnsupportedCredentials`] when the gateway does not accept
    ///   the credential shape,
    /// - [`ValidationError::InvalidEndpoint`] for an endpoint override that is not an
    ///   `http`/`https` URL.
    pub fn build(self) -> Result<SmsClient, SmsError> {
        if !self.gateway.supports(&self.credentials) {
            return Err(ValidationError::UnsupportedCredentials {
                gateway: self.gateway.name(),
                credentials: self.credentials.kind(),
            }
            .into());
        }

        let endpoint = match self.endpoint {
            Some(raw) => parse_endpoint(&raw)?,
            None => self.gateway.base_url(self.environment).to_owned(),
        };

        let default_sender = match self.sender_id {
            Some(sender_id) => sender_id,
            None => SenderId::new(self.gateway.default_sender_id())?,
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsError::Transport(Box::new(err)))?;

        Ok(SmsClient {
            credentials: self.credentials,
            gateway: self.gateway,
            endpoint,
            default_sender,
            state: AuthState::Unauthenticated,
            http: Box::new(ReqwestTransport { client }),
        })
    }

    /// Build a client and validate its credentials in one step.
    ///
    /// Fails with [`SmsError::AuthenticationFailed`] unless the gateway confirms the
    /// credentials.
    pub async fn authenticate(self) -> Result<SmsClient, SmsError> {
        let mut client = self.build()?;
        client.authenticate().await?;
        Ok(client)
    }
}

fn parse_endpoint(raw: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidEndpoint {
        value: raw.to_owned(),
    };
    let url = url::Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url.into())
}

/// High-level client for the EgoSMS / Comms JSON gateway.
///
/// Every gateway operation goes through the authentication gate: an
/// unauthenticated client re-validates its credentials once before giving up.
/// Operations that may change that state take `&mut self`.
pub struct SmsClient {
    credentials: Credentials,
    gateway: Gateway,
    endpoint: String,
    default_sender: SenderId,
    state: AuthState,
    http: Box<dyn HttpTransport>,
}

impl SmsClient {
    /// Create an unauthenticated client for the Comms gateway in production.
    ///
    /// For more customization, use [`SmsClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, SmsError> {
        SmsClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsClientBuilder {
        SmsClientBuilder::new(credentials)
    }

    /// Replace the default sender id used when a request does not set one.
    pub fn with_sender_id(mut self, sender_id: SenderId) -> Self {
        self.default_sender = sender_id;
        self
    }

    pub fn gateway(&self) -> Gateway {
        self.gateway
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_sender_id(&self) -> &SenderId {
        &self.default_sender
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send a message and report whether the gateway accepted it.
    ///
    /// Returns `Ok(false)` when the gateway answers `Failed`, when credentials
    /// cannot be validated, or when no recipient survives normalization.
    ///
    /// Errors: see [`SmsClient::send_detailed`].
    pub async fn send(&mut self, request: SendSms) -> Result<bool, SmsError> {
        match self.send_detailed(request).await? {
            SendOutcome::Response(result) => match result.status {
                Status::Ok => {
                    tracing::info!(
                        follow_up_code = result.follow_up_code.as_deref().unwrap_or_default(),
                        cost = ?result.cost,
                        "SMS sent"
                    );
                    Ok(true)
                }
                Status::Failed => {
                    tracing::warn!(
                        message = result.message.as_deref().unwrap_or_default(),
                        "gateway rejected SMS"
                    );
                    Ok(false)
                }
            },
            SendOutcome::Unauthenticated | SendOutcome::NoValidRecipients => Ok(false),
        }
    }

    /// Send a message and return the full outcome.
    ///
    /// Recipients are normalized first; if none survive, nothing is sent and
    /// [`SendOutcome::NoValidRecipients`] is returned without touching the network.
    /// A request is posted only after the authentication gate passes.
    ///
    /// Errors:
    /// - [`SmsError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`SmsError::UnexpectedStatus`] when the gateway answers with an unknown status,
    /// - [`SmsError::Parse`] / [`SmsError::Transport`] for unreadable answers or
    ///   connection failures.
    pub async fn send_detailed(&mut self, request: SendSms) -> Result<SendOutcome, SmsError> {
        let recipients = normalize_numbers(request.recipients());
        if recipients.is_empty() {
            tracing::warn!("no valid phone numbers provided; nothing to send");
            return Ok(SendOutcome::NoValidRecipients);
        }

        let sender_id = request
            .options()
            .sender_id
            .clone()
            .unwrap_or_else(|| self.default_sender.clone());
        if sender_id.exceeds_recommended_len() {
            tracing::warn!(
                sender_id = sender_id.as_str(),
                "sender id exceeds {} characters; some networks may truncate or reject the message",
                SenderId::RECOMMENDED_MAX_LEN
            );
        }
        let priority = request.options().effective_priority();

        if !self.ensure_authenticated().await {
            return Ok(SendOutcome::Unauthenticated);
        }

        let body = encode_send_sms_request(
            self.credentials.userdata(),
            &recipients,
            request.message(),
            &sender_id,
            priority,
        )
        .map_err(transport_error)?;

        tracing::debug!(recipients = recipients.len(), ?priority, "sending SMS");
        let result = self.post(METHOD_SEND_SMS, body).await?;
        Ok(SendOutcome::Response(result))
    }

    /// Query the account balance and return the full gateway answer.
    ///
    /// Returns `Ok(None)` when credentials cannot be validated.
    pub async fn query_balance(&mut self) -> Result<Option<ApiResult>, SmsError> {
        if !self.ensure_authenticated().await {
            return Ok(None);
        }
        let body =
            encode_balance_request(self.credentials.userdata()).map_err(transport_error)?;
        let result = self.post(METHOD_BALANCE, body).await?;
        Ok(Some(result))
    }

    /// Current account balance.
    ///
    /// Returns `Ok(None)` when credentials cannot be validated, when the gateway
    /// answers `Failed`, or when the answer carries no balance.
    pub async fn balance(&mut self) -> Result<Option<f64>, SmsError> {
        let Some(result) = self.query_balance().await? else {
            return Ok(None);
        };
        if !result.is_ok() {
            tracing::warn!(
                message = result.message.as_deref().unwrap_or_default(),
                "gateway rejected balance query"
            );
            return Ok(None);
        }
        Ok(result.balance)
    }

    async fn post(
        &self,
        method: &'static str,
        body: serde_json::Value,
    ) -> Result<ApiResult, SmsError> {
        tracing::debug!(method, endpoint = %self.endpoint, "posting gateway request");
        let response = self
            .http
            .post_json(&self.endpoint, body)
            .await
            .map_err(SmsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        decode_api_response(&response.body).map_err(transport_error)
    }
}

impl fmt::Display for SmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SmsClient({} @ {})",
            self.credentials.username().as_str(),
            self.gateway
        )
    }
}

impl fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsClient")
            .field("credentials", &self.credentials)
            .field("gateway", &self.gateway)
            .field("endpoint", &self.endpoint)
            .field("default_sender", &self.default_sender)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::domain::{MessageText, Priority, SendOptions};

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug, Default)]
    struct FakeTransportState {
        requests: Vec<(String, serde_json::Value)>,
        responses: VecDeque<(u16, String)>,
    }

    impl FakeTransport {
        fn new() -> Self {
            Self::default()
        }

        fn respond(self, status: u16, body: impl Into<String>) -> Self {
            self.state
                .lock()
                .unwrap()
                .responses
                .push_back((status, body.into()));
            self
        }

        fn requests(&self) -> Vec<(String, serde_json::Value)> {
            self.state.lock().unwrap().requests.clone()
        }

        fn methods(&self) -> Vec<String> {
            self.requests()
                .into_iter()
                .map(|(_, body)| body["method"].as_str().unwrap_or_default().to_owned())
                .collect()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_json<'a>(
            &'a self,
            url: &'a str,
            body: serde_json::Value,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let mut state = self.state.lock().unwrap();
                state.requests.push((url.to_owned(), body));
                match state.responses.pop_front() {
                    Some((status, body)) => Ok(HttpResponse { status, body }),
                    None => Err("no scripted response left".into()),
                }
            })
        }
    }

    const OK_BALANCE: &str = r#"{ "Status": "OK", "Balance": 2500 }"#;
    const FAILED_AUTH: &str = r#"{ "Status": "Failed", "Message": "Invalid credentials" }"#;

    fn make_client(credentials: Credentials, transport: FakeTransport) -> SmsClient {
        SmsClient {
            credentials,
            gateway: Gateway::Comms,
            endpoint: "https://example.invalid/api/v1/json/".to_owned(),
            default_sender: SenderId::new("EgoSMS").unwrap(),
            state: AuthState::Unauthenticated,
            http: Box::new(transport),
        }
    }

    fn api_key() -> Credentials {
        Credentials::api_key("user", "key").unwrap()
    }

    fn request(numbers: &[&str], options: SendOptions) -> SendSms {
        SendSms::new(
            numbers.iter().copied(),
            MessageText::new("Hello from the test suite").unwrap(),
            options,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn authenticate_sends_balance_without_msgdata() {
        let transport = FakeTransport::new().respond(200, OK_BALANCE);
        let mut client = make_client(api_key(), transport.clone());

        client.authenticate().await.unwrap();
        assert_eq!(client.auth_state(), AuthState::Authenticated);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let (url, body) = &requests[0];
        assert_eq!(url, "https://example.invalid/api/v1/json/");
        assert_eq!(
            body,
            &json!({
                "method": "Balance",
                "userdata": { "username": "user", "password": "key" }
            })
        );
    }

    #[tokio::test]
    async fn authenticate_surfaces_gateway_message_on_failure() {
        let transport = FakeTransport::new().respond(200, FAILED_AUTH);
        let mut client = make_client(api_key(), transport);

        let err = client.authenticate().await.unwrap_err();
        match err {
            SmsError::AuthenticationFailed { reason } => {
                assert_eq!(reason, "Invalid credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn authenticate_treats_unreachable_gateway_as_auth_failure() {
        let transport = FakeTransport::new();
        let mut client = make_client(api_key(), transport);

        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, SmsError::AuthenticationFailed { .. }));
        assert_eq!(client.auth_state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn authenticate_treats_unknown_status_as_auth_failure() {
        let transport = FakeTransport::new().respond(200, r#"{ "Status": "Maybe" }"#);
        let mut client = make_client(api_key(), transport);

        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, SmsError::AuthenticationFailed { .. }));
    }

    #[tokio::test]
    async fn send_revalidates_then_posts_one_request_for_all_recipients() {
        let transport = FakeTransport::new().respond(200, OK_BALANCE).respond(
            200,
            r#"{ "Status": "OK", "Cost": "100", "MsgFollowUpUniqueCode": "fu-123" }"#,
        );
        let mut client = make_client(api_key(), transport.clone());

        let sent = client
            .send(request(
                &["0712345678", "+256712345678", "256772123456", "0745"],
                SendOptions::default(),
            ))
            .await
            .unwrap();

        assert!(sent);
        assert!(client.is_authenticated());
        assert_eq!(transport.methods(), vec!["Balance", "SendSms"]);

        let (_, body) = &transport.requests()[1];
        assert_eq!(
            body,
            &json!({
                "method": "SendSms",
                "userdata": { "username": "user", "password": "key" },
                "msgdata": [
                    {
                        "number": "256712345678",
                        "message": "Hello from the test suite",
                        "senderid": "EgoSMS",
                        "priority": "0"
                    },
                    {
                        "number": "256772123456",
                        "message": "Hello from the test suite",
                        "senderid": "EgoSMS",
                        "priority": "0"
                    }
                ]
            })
        );
    }

    #[tokio::test]
    async fn send_detailed_exposes_follow_up_code_unchanged() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{ "Status": "OK", "Cost": 50, "Currency": "UGX", "MsgFollowUpUniqueCode": "AbC-0042" }"#,
        );
        let mut client = make_client(api_key(), transport.clone());
        client.state = AuthState::Authenticated;

        let outcome = client
            .send_detailed(request(&["0712345678"], SendOptions::default()))
            .await
            .unwrap();

        assert!(outcome.is_sent());
        let result = outcome.response().unwrap();
        assert_eq!(result.follow_up_code.as_deref(), Some("AbC-0042"));
        assert_eq!(result.cost, Some(50.0));
        assert_eq!(result.currency.as_deref(), Some("UGX"));
        assert_eq!(transport.methods(), vec!["SendSms"]);
    }

    #[tokio::test]
    async fn send_uses_request_sender_id_and_priority() {
        let transport = FakeTransport::new().respond(200, r#"{ "Status": "OK" }"#);
        let mut client = make_client(api_key(), transport.clone());
        client.state = AuthState::Authenticated;

        let options = SendOptions::default()
            .with_sender_id("A-Very-Long-Sender")
            .with_priority(Priority::Lowest);
        assert!(client.send(request(&["0712345678"], options)).await.unwrap());

        let (_, body) = &transport.requests()[0];
        assert_eq!(body["msgdata"][0]["senderid"], "A-Very-Long-Sender");
        assert_eq!(body["msgdata"][0]["priority"], "4");
    }

    #[tokio::test]
    async fn blank_request_sender_id_falls_back_to_client_default() {
        let transport = FakeTransport::new().respond(200, r#"{ "Status": "OK" }"#);
        let mut client = make_client(api_key(), transport.clone())
            .with_sender_id(SenderId::new("MyShop").unwrap());
        client.state = AuthState::Authenticated;

        let options = SendOptions::default().with_sender_id("  ");
        client.send(request(&["0712345678"], options)).await.unwrap();

        let (_, body) = &transport.requests()[0];
        assert_eq!(body["msgdata"][0]["senderid"], "MyShop");
    }

    #[tokio::test]
    async fn send_returns_false_with_gateway_failure() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{ "Status": "Failed", "Message": "Insufficient balance" }"#,
        );
        let mut client = make_client(api_key(), transport.clone());
        client.state = AuthState::Authenticated;

        let outcome = client
            .send_detailed(request(&["0712345678"], SendOptions::default()))
            .await
            .unwrap();
        let result = outcome.response().unwrap();
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.message.as_deref(), Some("Insufficient balance"));
        assert!(!outcome.is_sent());
    }

    #[tokio::test]
    async fn send_with_no_valid_recipients_never_touches_the_transport() {
        let transport = FakeTransport::new();
        let mut client = make_client(api_key(), transport.clone());

        let outcome = client
            .send_detailed(request(&["0745", "", "not a number"], SendOptions::default()))
            .await
            .unwrap();
        assert_eq!(outcome, SendOutcome::NoValidRecipients);

        let sent = client
            .send(request(&["123"], SendOptions::default()))
            .await
            .unwrap();
        assert!(!sent);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_credentials_are_retried_once_per_call_and_never_upgrade() {
        let transport = FakeTransport::new()
            .respond(200, FAILED_AUTH)
            .respond(200, FAILED_AUTH)
            .respond(200, FAILED_AUTH);
        let mut client = make_client(api_key(), transport.clone());

        let outcome = client
            .send_detailed(request(&["0712345678"], SendOptions::default()))
            .await
            .unwrap();
        assert_eq!(outcome, SendOutcome::Unauthenticated);
        assert!(!client.is_authenticated());

        assert!(
            !client
                .send(request(&["0712345678"], SendOptions::default()))
                .await
                .unwrap()
        );
        assert!(!client.is_authenticated());

        assert_eq!(client.balance().await.unwrap(), None);
        assert!(!client.is_authenticated());

        assert_eq!(transport.methods(), vec!["Balance", "Balance", "Balance"]);
    }

    #[tokio::test]
    async fn unknown_send_status_is_a_protocol_error() {
        let transport = FakeTransport::new().respond(200, r#"{ "Status": "Queued" }"#);
        let mut client = make_client(api_key(), transport);
        client.state = AuthState::Authenticated;

        let err = client
            .send(request(&["0712345678"], SendOptions::default()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SmsError::UnexpectedStatus { status } if status == "Queued"
        ));
    }

    #[tokio::test]
    async fn send_maps_invalid_json_to_parse_error() {
        let transport = FakeTransport::new().respond(200, "{ not json }");
        let mut client = make_client(api_key(), transport);
        client.state = AuthState::Authenticated;

        let err = client
            .send(request(&["0712345678"], SendOptions::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsError::Parse(_)));
    }

    #[tokio::test]
    async fn send_maps_non_success_http_status() {
        let transport = FakeTransport::new()
            .respond(500, "oops")
            .respond(503, "   ");
        let mut client = make_client(api_key(), transport);
        client.state = AuthState::Authenticated;

        let err = client
            .send(request(&["0712345678"], SendOptions::default()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SmsError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));

        let err = client.query_balance().await.unwrap_err();
        assert!(matches!(
            err,
            SmsError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn send_propagates_transport_failure_after_authentication() {
        let transport = FakeTransport::new();
        let mut client = make_client(api_key(), transport);
        client.state = AuthState::Authenticated;

        let err = client
            .send(request(&["0712345678"], SendOptions::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsError::Transport(_)));
    }

    #[tokio::test]
    async fn balance_extracts_numeric_or_string_balance() {
        let transport = FakeTransport::new()
            .respond(200, OK_BALANCE)
            .respond(200, r#"{ "Status": "OK", "Balance": "1500.75" }"#)
            .respond(200, r#"{ "Status": "OK", "Balance": 99.5 }"#);
        let mut client = make_client(api_key(), transport.clone());

        assert_eq!(client.balance().await.unwrap(), Some(1500.75));
        assert_eq!(client.balance().await.unwrap(), Some(99.5));
        assert_eq!(transport.methods(), vec!["Balance", "Balance", "Balance"]);
        assert!(transport.requests()[2].1.get("msgdata").is_none());
    }

    #[tokio::test]
    async fn balance_is_none_when_gateway_fails_after_authentication() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{ "Status": "Failed", "Message": "Account suspended" }"#,
        );
        let mut client = make_client(api_key(), transport);
        client.state = AuthState::Authenticated;

        assert_eq!(client.balance().await.unwrap(), None);

        let transport = FakeTransport::new().respond(
            200,
            r#"{ "Status": "Failed", "Message": "Account suspended" }"#,
        );
        let mut client = make_client(api_key(), transport);
        client.state = AuthState::Authenticated;
        let result = client.query_balance().await.unwrap().unwrap();
        assert_eq!(result.message.as_deref(), Some("Account suspended"));
    }

    #[test]
    fn builder_resolves_endpoint_from_gateway_and_environment() {
        let client = SmsClient::new(api_key()).unwrap();
        assert_eq!(client.gateway(), Gateway::Comms);
        assert_eq!(client.endpoint(), "https://comms.egosms.co/api/v1/json/");
        assert_eq!(client.default_sender_id().as_str(), "EgoSMS");
        assert!(!client.is_authenticated());

        let client = SmsClient::builder(Credentials::password("user", "pass").unwrap())
            .gateway(Gateway::EgoSms)
            .sandbox()
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://sandbox.egosms.co/api/v1/json/");
        assert_eq!(client.default_sender_id().as_str(), "EgoSms");
    }

    #[test]
    fn builder_endpoint_and_sender_overrides_are_applied() {
        let client = SmsClient::builder(api_key())
            .environment(Environment::Sandbox)
            .endpoint("https://example.invalid/api/v1/json/")
            .sender_id(SenderId::new("Clinic").unwrap())
            .timeout(Duration::from_secs(5))
            .user_agent("egosms-tests")
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "https://example.invalid/api/v1/json/");
        assert_eq!(client.default_sender_id().as_str(), "Clinic");
    }

    #[test]
    fn builder_rejects_invalid_endpoints() {
        for endpoint in ["not a url", "ftp://example.invalid/"] {
            let err = SmsClient::builder(api_key())
                .endpoint(endpoint)
                .build()
                .unwrap_err();
            assert!(matches!(
                err,
                SmsError::Validation(ValidationError::InvalidEndpoint { .. })
            ));
        }
    }

    #[test]
    fn builder_rejects_api_key_for_ego_sms_gateway() {
        let err = SmsClient::builder(api_key())
            .gateway(Gateway::EgoSms)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SmsError::Validation(ValidationError::UnsupportedCredentials {
                gateway: "EgoSms",
                credentials: "API key"
            })
        ));
    }

    #[test]
    fn display_does_not_leak_the_secret() {
        let client = make_client(api_key(), FakeTransport::new());
        assert_eq!(client.to_string(), "SmsClient(user @ Comms)");
        assert!(!format!("{client:?}").contains("\"key\""));
    }
}
