// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Project suggestion API
//!
//! - `POST /suggest`: top-5 catalog projects by embedding similarity
//! - `POST /suggest/keywords`: catalog projects by tag overlap

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{keyword_suggest_handler, suggest_handler};
pub use request::{Publication, SuggestRequest};
pub use response::{KeywordSuggestResponse, SuggestResponse};
