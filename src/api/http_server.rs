// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::health_handler;
use super::suggest::{keyword_suggest_handler, suggest_handler};
use crate::catalog::Catalog;
use crate::embeddings::TextEmbedder;
use crate::ranking::ProjectRanker;

/// Shared, read-only request state
#[derive(Clone, Debug)]
pub struct AppState {
    pub ranker: Arc<ProjectRanker>,
}

impl AppState {
    pub fn new(embedder: Arc<dyn TextEmbedder>, catalog: Catalog) -> Self {
        Self {
            ranker: Arc::new(ProjectRanker::new(embedder, catalog)),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/suggest", post(suggest_handler))
        .route("/suggest/keywords", post(keyword_suggest_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C
pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
