use serde::{Deserialize, Serialize};

use crate::view_tag::ViewTag;

/// One image as the backend expects it. `image_url` is either a remote URL
/// or a self-contained `data:` URL for an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadImage {
    pub image_url: String,
    pub view_type: ViewTag,
}

/// Body of the "submit product" call.
///
/// The six tech-spec fields (`storage_gb` through `display`) are always
/// serialized, as `null` when absent; the backend rejects payloads that omit
/// any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: i64,
    pub category_item_id: i64,
    pub title: String,
    pub color: String,
    pub model: String,
    pub images: Vec<PayloadImage>,
    pub storage_gb: Option<String>,
    pub ram_gb: Option<String>,
    pub processor: Option<String>,
    pub os: Option<String>,
    pub graphics: Option<String>,
    pub display: Option<f64>,
}
