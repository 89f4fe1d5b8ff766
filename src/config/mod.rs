// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration
//!
//! Every flag can also be set through the environment (a `.env` file in the
//! working directory is loaded first).

use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be greater than 0")]
    MustBePositive { field: &'static str },
}

/// Which embedding backend serves requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmbedderKind {
    /// ONNX sentence transformer loaded from disk
    Onnx,
    /// Deterministic feature hashing, no model files required
    Hash,
}

/// embed-engine: suggests catalog projects for a researcher profile
#[derive(Parser, Debug, Clone)]
#[command(name = "embed-engine")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Ranks catalog projects against a profile by embedding similarity", long_about = None)]
pub struct EngineConfig {
    /// Address to bind the HTTP server to
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Embedding backend
    #[arg(long, env = "EMBEDDER", value_enum, default_value_t = EmbedderKind::Onnx)]
    pub embedder: EmbedderKind,

    /// Model name reported by /health
    #[arg(long, env = "EMBEDDING_MODEL_NAME", default_value = "all-mpnet-base-v2")]
    pub model_name: String,

    /// Path to the ONNX model file
    #[arg(
        long,
        env = "EMBEDDING_MODEL_PATH",
        default_value = "./models/all-mpnet-base-v2-onnx/model.onnx"
    )]
    pub model_path: PathBuf,

    /// Path to tokenizer.json
    #[arg(
        long,
        env = "EMBEDDING_TOKENIZER_PATH",
        default_value = "./models/all-mpnet-base-v2-onnx/tokenizer.json"
    )]
    pub tokenizer_path: PathBuf,

    /// Token limit per text; longer inputs are truncated
    #[arg(long, env = "EMBEDDING_MAX_LENGTH", default_value_t = 384)]
    pub max_length: usize,

    /// Output dimension of the hashing backend
    #[arg(long, env = "HASH_EMBEDDING_DIMENSION", default_value_t = 768)]
    pub hash_dimension: usize,

    /// JSON catalog replacing the built-in project list
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog: Option<PathBuf>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::MustBePositive {
                field: "max_length",
            });
        }
        if self.hash_dimension == 0 {
            return Err(ConfigError::MustBePositive {
                field: "hash_dimension",
            });
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
