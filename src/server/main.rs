//! HTTP server for address verification.
//!
//! Accepts an address over `POST /enhance` and answers with the verification
//! envelope. Each request drives its own headless browser, so requests are
//! slow (several seconds) but independent.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mapverify::config::Config;
use mapverify::{Envelope, Verifier};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Address verification server")]
struct Args {
    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Listen port on all interfaces (overrides config, ignored with --listen)
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

/// Application state shared across handlers
struct AppState {
    verifier: Verifier,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;

    let listen = match (&args.listen, args.port) {
        (Some(listen), _) => listen.clone(),
        (None, Some(port)) => format!("0.0.0.0:{}", port),
        (None, None) => config.server.listen.clone(),
    };

    info!("Mapverify Server");
    info!("Search base: {}", config.search.base_url);

    let state = Arc::new(AppState {
        verifier: Verifier::new(&config),
    });

    let app = router(state);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind {}", listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/enhance", post(enhance_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serialize `value` as indented JSON
fn pretty_json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => (status, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Serialize)]
struct HomeResponse {
    message: &'static str,
    usage: &'static str,
}

async fn home_handler() -> Response {
    pretty_json(
        StatusCode::OK,
        &HomeResponse {
            message: "Google Maps Verification API (Scraper Edition) is running.",
            usage: "Send POST to /enhance with {'address': '...'}. Warning: Slower than API.",
        },
    )
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_handler() -> Response {
    pretty_json(StatusCode::OK, &HealthResponse { status: "ok" })
}

#[derive(Deserialize, Default)]
struct EnhanceRequest {
    address: Option<String>,
}

/// Pull the address from a JSON or form-encoded body.
/// A body that fails to parse counts as no address.
fn request_address(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

    let address = if is_form {
        url::form_urlencoded::parse(body)
            .find(|(key, _)| key == "address")
            .map(|(_, value)| value.into_owned())
    } else {
        serde_json::from_slice::<EnhanceRequest>(body)
            .unwrap_or_default()
            .address
    };

    address.filter(|a| !a.trim().is_empty())
}

async fn enhance_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(address) = request_address(&headers, &body) else {
        return pretty_json(
            StatusCode::BAD_REQUEST,
            &Envelope::rejected("Address is required"),
        );
    };

    let outcome = state.verifier.verify(&address).await;
    let envelope = Envelope::from(outcome);
    pretty_json(envelope.http_status(), &envelope)
}
