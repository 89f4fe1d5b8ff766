// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP handlers for the suggestion endpoints

use crate::api::http_server::AppState;
use crate::api::suggest::{KeywordSuggestResponse, SuggestRequest, SuggestResponse};
use crate::api::ApiError;
use crate::ranking::keyword_match;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, error};

/// POST /suggest handler
///
/// Joins skills, interests and publication titles into one query, ranks the
/// catalog against it and returns at most five projects, best first.
///
/// # Errors
/// - 4xx when the body is not a valid `SuggestRequest` (status chosen by
///   the JSON extractor)
/// - 500 when embedding fails
pub async fn suggest_handler(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Json(request) = payload?;
    let query = request.query_text();

    debug!(
        skills = request.skills.len(),
        interests = request.interests.len(),
        publications = request.publications.len(),
        "suggest request"
    );

    let projects = state.ranker.rank(&query).await.map_err(|e| {
        error!("Ranking failed: {:#}", e);
        ApiError::RankingFailed {
            embedder: state.ranker.embedder().name().to_string(),
            message: format!("{:#}", e),
        }
    })?;

    Ok(Json(SuggestResponse { projects }))
}

/// POST /suggest/keywords handler
///
/// Tag-overlap matching; every project with a non-zero score is returned.
pub async fn keyword_suggest_handler(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<KeywordSuggestResponse>, ApiError> {
    let Json(request) = payload?;
    let titles: Vec<&str> = request.publication_titles().collect();

    let projects = keyword_match(
        &request.skills,
        &request.interests,
        &titles,
        state.ranker.catalog(),
    );

    Ok(Json(KeywordSuggestResponse { projects }))
}
