// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod suggest;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::HealthResponse;
pub use http_server::{create_app, start_server, AppState};
pub use suggest::{
    keyword_suggest_handler, suggest_handler, KeywordSuggestResponse, Publication,
    SuggestRequest, SuggestResponse,
};
