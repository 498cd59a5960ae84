//! Wire shapes for the backend endpoints this client talks to.
//!
//! Only the fields the submission engine reads are modeled; everything else
//! in the backend's responses is ignored.

use serde::Deserialize;

/// Response from `GET categories/{id}/fields`.
///
/// `optional` may be omitted or `null` for categories without optional
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryFieldsResponse {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Option<Vec<String>>,
}

/// Response from `POST products/submit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned alongside a non-2xx submit. The backend uses either
/// `message` or `error`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
