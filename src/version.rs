// Version information for embed-engine

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-semantic-suggest-2026-10-16";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-10-16";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "semantic-suggest",
    "keyword-suggest",
    "onnx-embeddings",
    "hashing-embeddings",
    "catalog-file",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("embed-engine {} ({})", VERSION_NUMBER, BUILD_DATE)
}
