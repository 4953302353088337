//! BMI Insight Backend
//!
//! A stateless health metrics API: BMI, BMR, daily calorie needs, and macro
//! splits with unit conversion, plus optional AI-generated dietary advice.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Validation, calculation, and the advice provider boundary
//! - Shared: The pure calculation engine (no I/O)

use std::sync::Arc;

use anyhow::Result;
use bmi_insight_backend::services::{AdviceGenerator, DisabledAdviceGenerator, GeminiClient};
use bmi_insight_backend::{config, routes, state::AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting BMI Insight Backend"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    // Build the advice provider
    let advice = build_advice_generator(&config);

    // Create application state
    let state = AppState::new(config.clone(), advice);

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the generative advice provider from configuration
///
/// A disabled or misconfigured provider degrades to the fallback text rather
/// than failing startup; the readiness probe reports the misconfiguration.
fn build_advice_generator(config: &config::AppConfig) -> Arc<dyn AdviceGenerator> {
    if !config.advice.enabled {
        info!("Generative advice disabled, fallback text will be served");
        return Arc::new(DisabledAdviceGenerator);
    }

    match GeminiClient::new(&config.advice) {
        Ok(client) => {
            info!(model = %config.advice.model, "Generative advice enabled");
            Arc::new(client)
        }
        Err(e) => {
            warn!("Failed to configure advice provider: {}. Fallback text will be served.", e);
            Arc::new(DisabledAdviceGenerator)
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "bmi_insight_backend=info,tower_http=info".into()
        } else {
            "bmi_insight_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    // An enabled advice provider without a key would silently serve the
    // fallback on every request
    if config.advice.enabled && config.advice.api_key.is_none() {
        errors.push("advice is enabled but no API key is configured");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
