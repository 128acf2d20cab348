//! decide-for-me server binary.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use decide_for_me::adapters::ai::{OpenAIConfig, OpenAIProvider};
use decide_for_me::adapters::http::{app_router, DecisionAppState};
use decide_for_me::application::DecisionAgent;
use decide_for_me::config::{AiConfig, AppConfig, API_KEY_FALLBACK_VAR};
use decide_for_me::ports::AIProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config);

    if !config.ai.has_api_key() {
        tracing::warn!(
            "no API key configured (set {} or DECIDE_FOR_ME__AI__API_KEY); decision requests will fail authentication",
            API_KEY_FALLBACK_VAR
        );
    }

    let provider: Arc<dyn AIProvider> = Arc::new(
        OpenAIProvider::new(provider_config(&config.ai)).context("failed to build AI provider")?,
    );
    let agent = DecisionAgent::new(provider)
        .with_max_tokens(config.ai.max_tokens)
        .with_temperature(config.ai.temperature);

    let app = app_router(DecisionAppState::new(Arc::new(agent)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        address = %addr,
        environment = ?config.server.environment,
        provider = %config.ai.provider_name,
        model = %config.ai.model,
        "decide-for-me listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn provider_config(ai: &AiConfig) -> OpenAIConfig {
    let mut config = OpenAIConfig::default()
        .with_provider_name(&ai.provider_name)
        .with_base_url(&ai.base_url)
        .with_model(&ai.model)
        .with_timeout(ai.timeout())
        .with_max_retries(ai.max_retries)
        .with_retry_backoff(ai.retry_backoff());

    if let Some(ref key) = ai.api_key {
        config = config.with_api_key(key);
    }
    config
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
