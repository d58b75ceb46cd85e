//! Typed Rust client for the EgoSMS / Comms JSON SMS gateway.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format quirks, and a small client layer that drives the
//! authentication gate and the `SendSms` / `Balance` requests.
//!
//! ```rust,no_run
//! use egosms::{Credentials, MessageText, SendOptions, SendSms, SmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), egosms::SmsError> {
//!     let mut client = SmsClient::builder(Credentials::api_key("user", "...")?)
//!         .authenticate()
//!         .await?;
//!     let msg = MessageText::new("hello")?;
//!     let request = SendSms::to_one("0712345678", msg, SendOptions::default());
//!     let sent = client.send(request).await?;
//!     println!("sent: {sent}, balance: {:?}", client.balance().await?);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AuthState, Credentials, Environment, Gateway, SmsClient, SmsClientBuilder, SmsError,
};
pub use domain::{
    ApiKey, ApiResult, DEFAULT_COUNTRY_CODE, MessageText, Password, PhoneNumber, Priority,
    SendOptions, SendOutcome, SendSms, SenderId, Status, Username, ValidationError,
    normalize_numbers,
};
