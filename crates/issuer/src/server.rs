use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use rewards_sdk::privacy::{BlindedToken, SignedTokensResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::config::IssuerConfig;
use crate::error::{IssuerError, Result};
use crate::signer::TokenSigner;

/// Base64 blinded tokens are 44 characters; leave room for JSON framing
const BYTES_PER_BLINDED_TOKEN: usize = 64;

pub struct IssuerState {
    pub config: IssuerConfig,
    pub signer: TokenSigner,
}

impl IssuerState {
    pub fn new(config: IssuerConfig) -> Result<Self> {
        let signer = TokenSigner::new_or_load(&config.signing_key_path)?;
        Ok(Self { config, signer })
    }
}

/// Routes without rate limiting
pub fn router(state: Arc<IssuerState>) -> Router {
    let body_limit = 1024 + state.config.max_batch_size * BYTES_PER_BLINDED_TOKEN;

    Router::new()
        .route("/health", get(health))
        .route("/v1/issuer", get(get_issuer))
        .route("/v1/sign", post(sign_tokens))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

/// Milliseconds for one request slot to refill at `rate` requests per second
fn replenish_interval_ms(rate: u64) -> u64 {
    (1000 / rate.max(1)).max(1)
}

/// Per-IP limit of `rate` requests per second with bursts up to twice that
fn rate_limited(app: Router, rate: u64) -> anyhow::Result<Router> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_interval_ms(rate))
        .burst_size(rate.saturating_mul(2).min(u32::MAX as u64) as u32)
        .key_extractor(tower_governor::key_extractor::SmartIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    Ok(app.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

pub async fn run(state: Arc<IssuerState>) -> anyhow::Result<()> {
    let rate = state.config.rate_limit_per_second;
    let app = rate_limited(router(state.clone()), rate)?
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Issuer listening on {} (rate limited: {} req/s per IP, burst {})",
        addr,
        rate,
        rate.saturating_mul(2)
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;
    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IssuerResponse {
    public_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    blinded_tokens: Vec<String>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn get_issuer(State(state): State<Arc<IssuerState>>) -> Result<Json<IssuerResponse>> {
    Ok(Json(IssuerResponse {
        public_key: state.signer.public_key_base64()?,
    }))
}

async fn sign_tokens(
    State(state): State<Arc<IssuerState>>,
    Json(req): Json<SignRequest>,
) -> Result<Json<SignedTokensResponse>> {
    let max = state.config.max_batch_size;
    if req.blinded_tokens.len() > max {
        return Err(IssuerError::BatchTooLarge {
            max,
            got: req.blinded_tokens.len(),
        });
    }

    let blinded_tokens = req
        .blinded_tokens
        .iter()
        .enumerate()
        .map(|(index, encoded)| {
            let blinded_token = BlindedToken::decode_base64(encoded);
            if blinded_token.has_value() {
                Ok(blinded_token)
            } else {
                Err(IssuerError::InvalidBlindedToken(index))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let batch = state.signer.sign_batch(&blinded_tokens)?;
    debug!("Signed batch of {} blinded tokens", blinded_tokens.len());

    Ok(Json(batch.to_response()?))
}
