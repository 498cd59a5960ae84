//! Projection of a validated form into the backend's submission payload.

use marketdesk_core::{PayloadImage, ProductForm, SubmissionPayload};

use crate::embed::to_data_url;
use crate::image_set::{ImageSet, ImageSource};

pub const PHONE_CATEGORY: i64 = 4;
pub const LAPTOP_CATEGORY: i64 = 5;
pub const DESKTOP_CATEGORY: i64 = 6;
pub const HEADPHONES_CATEGORY: i64 = 8;
pub const SMART_TV_CATEGORY: i64 = 9;

const DEFAULT_STOCK: i64 = 1;
const DEFAULT_CATEGORY_ITEM: i64 = 1;
const DEFAULT_COLOR: &str = "Black";

/// How one text tech-spec field is emitted for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextRule {
    /// Always `null`.
    Null,
    /// The entered value, or `null` when blank.
    Given,
    /// The entered value, or the fallback when blank.
    OrDefault(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberRule {
    Null,
    /// The entered value parsed as a number, or `null`.
    Given,
}

#[derive(Debug, Clone, Copy)]
struct SpecProjection {
    storage_gb: TextRule,
    ram_gb: TextRule,
    processor: TextRule,
    os: TextRule,
    graphics: TextRule,
    display: NumberRule,
}

fn projection_for(category_id: i64) -> SpecProjection {
    use TextRule::{Given, Null, OrDefault};

    match category_id {
        PHONE_CATEGORY => SpecProjection {
            storage_gb: OrDefault("128"),
            ram_gb: OrDefault("4"),
            processor: OrDefault(""),
            os: OrDefault(""),
            graphics: Null,
            display: NumberRule::Given,
        },
        LAPTOP_CATEGORY => SpecProjection {
            storage_gb: OrDefault("512"),
            ram_gb: OrDefault("8"),
            processor: OrDefault(""),
            os: OrDefault(""),
            graphics: OrDefault(""),
            display: NumberRule::Given,
        },
        DESKTOP_CATEGORY => SpecProjection {
            storage_gb: OrDefault("1000"),
            ram_gb: OrDefault("16"),
            processor: OrDefault(""),
            os: OrDefault(""),
            graphics: OrDefault(""),
            display: NumberRule::Null,
        },
        SMART_TV_CATEGORY => SpecProjection {
            storage_gb: Null,
            ram_gb: Null,
            processor: Null,
            os: OrDefault(""),
            graphics: Null,
            display: NumberRule::Given,
        },
        HEADPHONES_CATEGORY => SpecProjection {
            storage_gb: Null,
            ram_gb: Null,
            processor: Null,
            os: Null,
            graphics: Null,
            display: NumberRule::Null,
        },
        _ => SpecProjection {
            storage_gb: Given,
            ram_gb: Given,
            processor: Given,
            os: Given,
            graphics: Given,
            display: NumberRule::Given,
        },
    }
}

fn apply_text(rule: TextRule, form: &ProductForm, field: &str) -> Option<String> {
    match rule {
        TextRule::Null => None,
        TextRule::Given => form.value(field).map(str::to_owned),
        TextRule::OrDefault(fallback) => {
            Some(form.value(field).unwrap_or(fallback).to_owned())
        }
    }
}

fn apply_number(rule: NumberRule, form: &ProductForm, field: &str) -> Option<f64> {
    match rule {
        NumberRule::Null => None,
        NumberRule::Given => form.value(field).and_then(parse_finite),
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer value of `field`. A finite decimal such as `"2.5"` is truncated
/// toward zero; anything else falls back.
#[allow(clippy::cast_possible_truncation)]
fn parse_int_or(form: &ProductForm, field: &str, fallback: i64) -> i64 {
    let Some(raw) = form.value(field) else {
        return fallback;
    };
    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    match parse_finite(raw) {
        // `as` saturates at the i64 bounds.
        Some(x) => x.trunc() as i64,
        None => fallback,
    }
}

/// Flattens the image set into wire images: uploads (embedded as `data:`
/// URLs) then non-blank URLs, each with its tag, in absolute order.
fn flatten_images(images: &ImageSet) -> Vec<PayloadImage> {
    images
        .entries()
        .iter()
        .filter_map(|entry| {
            let image_url = match &entry.source {
                ImageSource::Upload(file) => to_data_url(file),
                ImageSource::Url(url) if url.trim().is_empty() => return None,
                ImageSource::Url(url) => url.trim().to_owned(),
            };
            Some(PayloadImage {
                image_url,
                view_type: entry.tag,
            })
        })
        .collect()
}

/// Builds the submission payload. Assumes the form already passed
/// [`crate::validate`]; unparseable numbers fall back rather than fail.
/// Decimal `stock`, `categoryId` or `categoryItemId` values are truncated.
#[must_use]
pub fn build_payload(form: &ProductForm, images: &ImageSet) -> SubmissionPayload {
    let category_id = parse_int_or(form, "categoryId", 0);
    let projection = projection_for(category_id);
    let name = form.value("name").unwrap_or_default().to_owned();

    SubmissionPayload {
        title: form.value("title").map_or_else(|| name.clone(), str::to_owned),
        description: form.value("description").unwrap_or_default().to_owned(),
        price: form.value("price").and_then(parse_finite).unwrap_or(0.0),
        stock: parse_int_or(form, "stock", DEFAULT_STOCK),
        category_id,
        category_item_id: parse_int_or(form, "categoryItemId", DEFAULT_CATEGORY_ITEM),
        color: form.value("color").unwrap_or(DEFAULT_COLOR).to_owned(),
        model: form.value("model").unwrap_or_default().to_owned(),
        images: flatten_images(images),
        storage_gb: apply_text(projection.storage_gb, form, "storageGb"),
        ram_gb: apply_text(projection.ram_gb, form, "ramGb"),
        processor: apply_text(projection.processor, form, "processor"),
        os: apply_text(projection.os, form, "os"),
        graphics: apply_text(projection.graphics, form, "graphics"),
        display: apply_number(projection.display, form, "display"),
        name,
    }
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
