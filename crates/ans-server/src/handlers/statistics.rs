//! Statistics handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use ans_core::models::Statistics;

/// GET /api/estatisticas - Aggregated statistics (cached)
pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Arc<Statistics>>, AppError> {
    let stats = state.stats_cache.get_statistics(&state.db)?;
    Ok(Json(stats))
}
