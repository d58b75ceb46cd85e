use std::io;

use egosms::{Credentials, MessageText, SendOptions, SendOutcome, SendSms, SmsClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn credentials() -> Result<Credentials, Box<dyn std::error::Error>> {
    let username = required("EGOSMS_USERNAME")?;
    let credentials = match std::env::var("EGOSMS_API_KEY") {
        Ok(api_key) => Credentials::api_key(username, api_key)?,
        Err(_) => Credentials::password(username, required("EGOSMS_PASSWORD")?)?,
    };
    Ok(credentials)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egosms=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let phone = required("EGOSMS_PHONE")?;
    let message = std::env::var("EGOSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the egosms demo.".to_owned());

    let mut builder = SmsClient::builder(credentials()?);
    if std::env::var_os("EGOSMS_SANDBOX").is_some() {
        builder = builder.sandbox();
    }
    let mut client = builder.authenticate().await?;

    let request = SendSms::to_one(phone, MessageText::new(message)?, SendOptions::default());
    match client.send_detailed(request).await? {
        SendOutcome::Response(result) => println!(
            "status: {:?}, message: {:?}, cost: {:?}, follow-up code: {:?}",
            result.status, result.message, result.cost, result.follow_up_code
        ),
        other => println!("nothing sent: {other:?}"),
    }

    Ok(())
}
