use serde::Serialize;

/// The issue payload submitted, unchanged, to every target repository.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRequest {
    #[serde(skip)]
    pub organization: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Splits a comma-separated flag value, trimming each entry.
///
/// Order and duplicates are preserved; empty entries are dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
