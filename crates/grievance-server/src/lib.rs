//! Grievance Server
//!
//! The HTTP surface of the complaint-intake service: wires the SQLite
//! store, the Ollama provider, the extractor, and the retrieval responder
//! into an axum application.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod responder;

use config::ServerConfig;
use grievance_extractor::ComplaintExtractor;
use grievance_llm::OllamaProvider;
use grievance_store::SqliteStore;
use handlers::{create_router, AppState};
use responder::RetrievalResponder;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store initialization error
    #[error("Store error: {0}")]
    Store(#[from] grievance_store::StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the grievance HTTP server
///
/// Initializes the database schema, constructs the Ollama provider from
/// config, and serves the axum application until the process exits.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting grievance server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database path: {}", config.database_path);
    info!(
        "Ollama backend: {} (model {})",
        config.ollama.endpoint, config.ollama.model
    );

    // Explicit, idempotent initialization: schema is applied here, once,
    // rather than as a module side effect
    let store = SqliteStore::new(&config.database_path)?;

    let provider: Arc<dyn grievance_domain::traits::LlmProvider> =
        Arc::new(OllamaProvider::with_timeout(
            &config.ollama.endpoint,
            &config.ollama.model,
            Duration::from_secs(config.ollama.timeout_secs),
        ));

    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        extractor: Arc::new(ComplaintExtractor::new(Arc::clone(&provider))),
        responder: Arc::new(RetrievalResponder::new(provider)),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.bind_port, 8000);
    }
}
