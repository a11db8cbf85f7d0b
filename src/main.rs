//! PEARLS Debrief HTTP server.

use std::process::ExitCode;
use std::sync::Arc;

use pearls_debrief::adapters::{
    build_router, DebriefAppState, InMemorySessionStore, OpenAICompatConfig,
    OpenAICompatProvider,
};
use pearls_debrief::config::{AiConfig, AppConfig, ConfigError, ValidationError};
use pearls_debrief::ports::AIProvider;
use pearls_debrief::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init_tracing(&config.server) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server terminated");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn provider_config(ai: &AiConfig) -> Result<OpenAICompatConfig, ValidationError> {
    let api_key = ai
        .api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("AI__API_KEY"))?;
    let base_url = ai
        .effective_base_url()
        .ok_or(ValidationError::MissingRequired("AI__BASE_URL"))?;
    let model = ai
        .effective_model()
        .ok_or(ValidationError::MissingRequired("AI__MODEL"))?;

    Ok(OpenAICompatConfig::new(api_key, base_url, model)
        .with_provider_name(ai.provider.name())
        .with_timeout(ai.timeout()))
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider = OpenAICompatProvider::new(provider_config(&config.ai)?)?;
    let info = provider.provider_info();
    let state = DebriefAppState::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(provider),
        config.debrief.clone(),
    )
    .with_verbose_errors(config.features.verbose_errors);

    let router = build_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        provider = %info.name,
        model = %info.model,
        environment = ?config.server.environment,
        "PEARLS debrief server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
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
}
