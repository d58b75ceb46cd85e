use std::io;

use egosms::{Credentials, Environment, SmsClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
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

    let username = required("EGOSMS_USERNAME")?;
    let credentials = match std::env::var("EGOSMS_API_KEY") {
        Ok(api_key) => Credentials::api_key(username, api_key)?,
        Err(_) => Credentials::password(username, required("EGOSMS_PASSWORD")?)?,
    };
    let environment = if std::env::var_os("EGOSMS_SANDBOX").is_some() {
        Environment::Sandbox
    } else {
        Environment::Production
    };

    let mut client = SmsClient::builder(credentials)
        .environment(environment)
        .build()?;
    println!("client: {client}, endpoint: {}", client.endpoint());

    match client.query_balance().await? {
        Some(result) => println!(
            "status: {:?}, balance: {:?}, currency: {:?}",
            result.status, result.balance, result.currency
        ),
        None => println!("credentials were not accepted by the gateway"),
    }

    Ok(())
}
