// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use embed_engine::{
    api::{start_server, AppState},
    catalog::Catalog,
    config::{EmbedderKind, EngineConfig},
    embeddings::{HashingEmbedder, OnnxEmbeddingModel, TextEmbedder},
    version,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EngineConfig::parse();
    config.validate()?;

    info!("Starting {}", version::get_version_string());

    let catalog = match &config.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };
    info!(entries = catalog.len(), "Catalog ready");

    let embedder = load_embedder(&config).await?;
    info!(
        embedder = embedder.name(),
        dimension = embedder.dimension(),
        "Embedder ready"
    );

    let addr = config.listen_addr();
    info!("Endpoints:");
    info!("  Health:     GET  http://{}/health", addr);
    info!("  Suggest:    POST http://{}/suggest", addr);
    info!("  Keywords:   POST http://{}/suggest/keywords", addr);

    start_server(addr, AppState::new(embedder, catalog)).await?;

    info!("Goodbye");
    Ok(())
}

async fn load_embedder(config: &EngineConfig) -> Result<Arc<dyn TextEmbedder>> {
    match config.embedder {
        EmbedderKind::Onnx => {
            info!(
                model = %config.model_name,
                path = %config.model_path.display(),
                "Loading ONNX embedding model"
            );
            let model = OnnxEmbeddingModel::new(
                config.model_name.clone(),
                &config.model_path,
                &config.tokenizer_path,
                config.max_length,
            )
            .await
            .context("Failed to load embedding model (use --embedder hash to run without one)")?;
            Ok(Arc::new(model))
        }
        EmbedderKind::Hash => Ok(Arc::new(HashingEmbedder::new(config.hash_dimension)?)),
    }
}
