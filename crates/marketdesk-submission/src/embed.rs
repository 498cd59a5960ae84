//! Self-contained `data:` URL encoding for uploaded image files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::image_set::UploadedImage;

/// MIME type guessed from a file name's extension.
#[must_use]
pub fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Encodes an upload as `data:<mime>;base64,<payload>`.
#[must_use]
pub fn to_data_url(image: &UploadedImage) -> String {
    let mime = image
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| mime_for(&image.file_name));
    format!("data:{mime};base64,{}", STANDARD.encode(&image.bytes))
}
