// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::http_server::AppState;
use crate::version;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub features: Vec<String>,
    pub embedder: String,
    pub dimension: usize,
    pub catalog_size: usize,
}

/// GET /health handler
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let embedder = state.ranker.embedder();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: version::VERSION.to_string(),
        features: version::FEATURES.iter().map(|f| f.to_string()).collect(),
        embedder: embedder.name().to_string(),
        dimension: embedder.dimension(),
        catalog_size: state.ranker.catalog().len(),
    })
}
