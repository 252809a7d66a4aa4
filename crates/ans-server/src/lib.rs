//! ANS Web Server
//!
//! Axum-based read-only REST API over the operator/expense store.
//!
//! - Paginated, filterable operator listing
//! - Operator detail and expense history
//! - Aggregated statistics served through a TTL cache
//! - Permissive CORS (any origin)
//! - Sanitized error responses (`{"erro": ...}`)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use ans_core::cache::{StatisticsCache, DEFAULT_TTL};
use ans_core::db::Database;

mod handlers;

/// Message for unknown operator keys
pub const OPERATOR_NOT_FOUND: &str = "Operadora não encontrada";

/// Message for unmatched routes
pub const RESOURCE_NOT_FOUND: &str = "Recurso não encontrado";

/// Message for any internal failure; details are only logged
pub const INTERNAL_ERROR: &str = "Erro interno do servidor";

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// How long computed statistics are served from memory
    pub stats_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            stats_ttl: DEFAULT_TTL,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    /// Statistics cache, owned here and shared by every request
    pub stats_cache: StatisticsCache,
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        stats_cache: StatisticsCache::with_ttl(config.stats_ttl),
    });

    let api_routes = Router::new()
        // Operators
        .route("/operadoras", get(handlers::list_operators))
        .route("/operadoras/:cnpj", get(handlers::get_operator))
        .route(
            "/operadoras/:cnpj/despesas",
            get(handlers::get_operator_expenses),
        )
        // Statistics
        .route("/estatisticas", get(handlers::get_statistics))
        // Health
        .route("/health", get(handlers::health_check));

    // Any origin may read the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(db, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    info!(
        ttl_secs = config.stats_ttl.as_secs(),
        "Statistics cache configured"
    );

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Turn a handler panic into the generic 500 body
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "Handler panicked");
    AppError::internal(INTERNAL_ERROR).into_response()
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "erro": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        let not_found = err
            .downcast_ref::<ans_core::Error>()
            .is_some_and(ans_core::Error::is_not_found);
        if not_found {
            return Self::not_found(OPERATOR_NOT_FOUND);
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: INTERNAL_ERROR.to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
