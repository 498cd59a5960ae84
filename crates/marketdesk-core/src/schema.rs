use serde::{Deserialize, Serialize};

/// Field requirements declared by a product category.
///
/// `fields` is every field the category exposes (required first, then
/// optional, de-duplicated in first-seen order). `required_fields` is the
/// backend's required list as reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySchema {
    fields: Vec<String>,
    required_fields: Vec<String>,
}

impl CategorySchema {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schema from the backend's `required` and `optional` lists.
    #[must_use]
    pub fn from_field_lists(required: Vec<String>, optional: Vec<String>) -> Self {
        let required_fields = dedupe(required);
        let fields = dedupe(required_fields.iter().cloned().chain(optional));
        Self {
            fields,
            required_fields,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required_fields.iter().any(|f| f == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn dedupe(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// A model variant offered within a category (e.g. a specific phone model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: i64,
    pub name: String,
}
