// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /suggest and POST /suggest/keywords end-to-end through the router
//!
//! Uses the feature-hashing embedder so no model files are required.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use embed_engine::{
    api::{create_app, AppState, ErrorResponse, KeywordSuggestResponse, SuggestResponse},
    catalog::{Catalog, CatalogEntry},
    embeddings::{HashingEmbedder, TextEmbedder},
};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Embedder that always fails, to exercise the 500 path
struct FailingEmbedder;

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(anyhow!("inference backend unavailable"))
    }

    fn dimension(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn hashing_state(catalog: Catalog) -> AppState {
    AppState::new(Arc::new(HashingEmbedder::new(768).unwrap()), catalog)
}

async fn post(state: AppState, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    create_app(state).oneshot(request).await.unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_suggest_builtin_catalog() {
    let body = json!({
        "skills": ["Python", "NLP", "transformer models"],
        "interests": ["resumes"],
        "publications": [{"title": "Ranking resumes with NLP"}]
    });

    let response = post(hashing_state(Catalog::builtin()), "/suggest", body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response: SuggestResponse = body_json(response).await;
    assert_eq!(response.projects.len(), 5);
    assert_eq!(response.projects[0].title, "AI-Powered Resume Ranker");

    for pair in response.projects.windows(2) {
        assert!(pair[0].score >= pair[1].score, "results not sorted: {:?}", pair);
    }
    for project in &response.projects {
        assert!((0.0..=100.0).contains(&project.score));
        assert!(!project.tags.is_empty());
    }
}

#[tokio::test]
async fn test_suggest_machine_learning_example() {
    let catalog = Catalog::new(vec![
        CatalogEntry::new("A", "machine learning"),
        CatalogEntry::new("B", "gardening tips"),
    ]);
    let body = json!({
        "skills": ["machine learning expert"],
        "interests": [],
        "publications": []
    });

    let response: SuggestResponse =
        body_json(post(hashing_state(catalog), "/suggest", body.to_string()).await).await;

    assert_eq!(response.projects.len(), 2);
    assert_eq!(response.projects[0].title, "A");
    assert!(response.projects[0].score > response.projects[1].score);
    assert_eq!(response.projects[1].tags, Vec::<String>::new());
}

#[tokio::test]
async fn test_suggest_empty_profile_still_returns_results() {
    let body = json!({"skills": [], "interests": [], "publications": []});

    let response = post(hashing_state(Catalog::builtin()), "/suggest", body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response: SuggestResponse = body_json(response).await;
    assert_eq!(response.projects.len(), 5);
}

#[tokio::test]
async fn test_suggest_empty_catalog() {
    let body = json!({"skills": ["Rust"], "interests": [], "publications": []});

    let response = post(hashing_state(Catalog::default()), "/suggest", body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response: SuggestResponse = body_json(response).await;
    assert!(response.projects.is_empty());
}

#[tokio::test]
async fn test_suggest_malformed_json_rejected() {
    let response = post(
        hashing_state(Catalog::builtin()),
        "/suggest",
        "{not json".to_string(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.error_type, "invalid_request");
}

#[tokio::test]
async fn test_suggest_missing_field_rejected() {
    let body = json!({"skills": ["Rust"], "interests": []});

    let response = post(hashing_state(Catalog::builtin()), "/suggest", body.to_string()).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let error: ErrorResponse = body_json(response).await;
    assert!(error.message.contains("publications"), "{}", error.message);
}

#[tokio::test]
async fn test_suggest_requires_json_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/suggest")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"skills":[],"interests":[],"publications":[]}"#))
        .unwrap();

    let response = create_app(hashing_state(Catalog::builtin()))
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_suggest_embedding_failure_is_500() {
    let state = AppState::new(Arc::new(FailingEmbedder), Catalog::builtin());
    let body = json!({"skills": ["Rust"], "interests": [], "publications": []});

    let response = post(state, "/suggest", body.to_string()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.error_type, "internal_error");
    assert!(error.message.contains("inference backend unavailable"));
    assert_eq!(error.details.unwrap()["embedder"], json!("failing"));
}

#[tokio::test]
async fn test_keywords_endpoint() {
    let body = json!({
        "skills": ["Python"],
        "interests": ["Recommendation"],
        "publications": [{"title": "A graph approach to citations"}]
    });

    let response = post(
        hashing_state(Catalog::builtin()),
        "/suggest/keywords",
        body.to_string(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response: KeywordSuggestResponse = body_json(response).await;
    assert_eq!(response.projects[0].title, "Academic Paper Recommender");
    assert_eq!(response.projects[0].match_score, 5);
    assert!(response.projects.iter().all(|p| p.match_score > 0));
    assert!(response
        .projects
        .iter()
        .all(|p| p.title != "Scholar Citation Visualizer"));
}
