//! Submission validation against static rules and the category schema.

use marketdesk_core::{CategorySchema, ProductForm, ValidationResult};

use crate::image_set::ImageSet;

/// Schema entry for the image list; image completeness has its own rule.
const IMAGES_FIELD: &str = "images";

/// Checks a candidate submission.
///
/// Every rule is evaluated; each violation adds one entry keyed by field
/// name. The result is empty exactly when the submission is valid. Pure: the
/// same inputs always give the same result.
#[must_use]
pub fn validate(
    form: &ProductForm,
    schema: &CategorySchema,
    images: &ImageSet,
    has_category_items: bool,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !form.is_filled("categoryId") {
        result.insert("categoryId", "Select a category");
    }
    if !form.is_filled("name") {
        result.insert("name", "Name is required");
    }
    if !form.is_filled("description") {
        result.insert("description", "Description is required");
    }
    match form.value("price") {
        None => result.insert("price", "Price is required"),
        Some(raw) if !is_finite_number(raw) => result.insert("price", "Price must be a number"),
        Some(_) => {}
    }
    if has_category_items && !form.is_filled("categoryItemId") {
        result.insert("categoryItemId", "Select a model");
    }

    for field in schema.required_fields() {
        if field != IMAGES_FIELD && !form.is_filled(field) {
            result.insert(field.clone(), format!("{field} is required"));
        }
    }

    let image_count = images.submittable_count();
    if image_count == 0 {
        result.insert(IMAGES_FIELD, "Add at least one image");
    } else if images.tags().len() < image_count {
        result.insert(IMAGES_FIELD, "Every image needs a view tag");
    }

    result
}

fn is_finite_number(raw: &str) -> bool {
    raw.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
