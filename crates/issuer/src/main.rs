use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod server;
mod signer;

use config::IssuerConfig;
use server::IssuerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issuer=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting token issuer");

    dotenvy::dotenv().ok();
    let config = IssuerConfig::from_env();

    info!("Signing key: {}", config.signing_key_path.display());
    info!("Max batch size: {}", config.max_batch_size);

    let state = Arc::new(IssuerState::new(config)?);
    info!("Public key: {}", state.signer.public_key_base64()?);

    server::run(state).await?;
    Ok(())
}
