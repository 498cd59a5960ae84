//! Resolves a category's field schema and model list from the backend.
//!
//! Both lookups fail soft: a failed fetch yields an empty schema or an empty
//! item list, logs a warning, and publishes a [`crate::Notice`]. Nothing here
//! returns an error to the caller.

use marketdesk_core::{CategoryItem, CategorySchema};

use crate::backend::StoreBackend;
use crate::notify::Notifier;

/// Everything the session needs after a category is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryContext {
    pub category_id: i64,
    pub schema: CategorySchema,
    /// When non-empty, the submission must name one of these items.
    pub items: Vec<CategoryItem>,
}

pub struct SchemaResolver<'a, B> {
    backend: &'a B,
    notifier: Notifier,
}

impl<'a, B: StoreBackend> SchemaResolver<'a, B> {
    #[must_use]
    pub fn new(backend: &'a B, notifier: Notifier) -> Self {
        Self { backend, notifier }
    }

    /// Fetches and normalizes the category's field requirements. On any
    /// fetch failure returns [`CategorySchema::empty`].
    pub async fn resolve(&self, category_id: i64) -> CategorySchema {
        match self.backend.category_fields(category_id).await {
            Ok(response) => {
                let schema = CategorySchema::from_field_lists(
                    response.required,
                    response.optional.unwrap_or_default(),
                );
                tracing::debug!(
                    category_id,
                    fields = schema.fields().len(),
                    required = schema.required_fields().len(),
                    "resolved category schema"
                );
                schema
            }
            Err(err) => {
                tracing::warn!(category_id, error = %err, "failed to load category fields");
                self.notifier.warning(
                    "Could not load the fields for this category. Only the basic fields are required.",
                );
                CategorySchema::empty()
            }
        }
    }

    /// Fetches the category's model variants. On failure returns an empty
    /// list, so no item selection will be required.
    pub async fn items(&self, category_id: i64) -> Vec<CategoryItem> {
        match self.backend.category_items(category_id).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(category_id, error = %err, "failed to load category items");
                self.notifier
                    .warning("Could not load the models for this category.");
                Vec::new()
            }
        }
    }

    /// Runs the schema and item lookups concurrently.
    pub async fn load(&self, category_id: i64) -> CategoryContext {
        let (schema, items) = tokio::join!(self.resolve(category_id), self.items(category_id));
        CategoryContext {
            category_id,
            schema,
            items,
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
