//! The product submission form as entered by the user.
//!
//! Every value is kept as entered text; numeric interpretation happens at
//! validation and payload time. Fields are addressed by their wire names
//! (`categoryId`, `storageGb`, ...) so schema-driven checks can look them
//! up by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Fields whose presence depends on the selected category's schema.
/// These are cleared whenever a new schema is applied.
pub const VARIABLE_FIELDS: [&str; 7] = [
    "title",
    "storageGb",
    "ramGb",
    "processor",
    "os",
    "graphics",
    "display",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    #[serde(deserialize_with = "scalar_text")]
    pub category_id: String,
    #[serde(deserialize_with = "scalar_text")]
    pub category_item_id: String,
    #[serde(deserialize_with = "scalar_text")]
    pub name: String,
    #[serde(deserialize_with = "scalar_text")]
    pub description: String,
    #[serde(deserialize_with = "scalar_text")]
    pub price: String,
    #[serde(deserialize_with = "scalar_text")]
    pub stock: String,
    #[serde(deserialize_with = "scalar_text")]
    pub color: String,
    #[serde(deserialize_with = "scalar_text")]
    pub model: String,
    #[serde(deserialize_with = "scalar_text")]
    pub title: String,
    #[serde(deserialize_with = "scalar_text")]
    pub storage_gb: String,
    #[serde(deserialize_with = "scalar_text")]
    pub ram_gb: String,
    #[serde(deserialize_with = "scalar_text")]
    pub processor: String,
    #[serde(deserialize_with = "scalar_text")]
    pub os: String,
    #[serde(deserialize_with = "scalar_text")]
    pub graphics: String,
    #[serde(deserialize_with = "scalar_text")]
    pub display: String,
    /// Schema fields this form has no dedicated slot for.
    #[serde(flatten, deserialize_with = "scalar_text_map")]
    pub extra: BTreeMap<String, String>,
}

impl ProductForm {
    /// Raw value of a field by wire name, as entered.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "categoryId" => &self.category_id,
            "categoryItemId" => &self.category_item_id,
            "name" => &self.name,
            "description" => &self.description,
            "price" => &self.price,
            "stock" => &self.stock,
            "color" => &self.color,
            "model" => &self.model,
            "title" => &self.title,
            "storageGb" => &self.storage_gb,
            "ramGb" => &self.ram_gb,
            "processor" => &self.processor,
            "os" => &self.os,
            "graphics" => &self.graphics,
            "display" => &self.display,
            other => return self.extra.get(other).map(String::as_str),
        };
        Some(value.as_str())
    }

    /// Trimmed value of a field, or `None` when absent or blank.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn is_filled(&self, field: &str) -> bool {
        self.value(field).is_some()
    }

    /// Sets a field by wire name. Unknown names land in [`ProductForm::extra`].
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            "categoryId" => &mut self.category_id,
            "categoryItemId" => &mut self.category_item_id,
            "name" => &mut self.name,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "stock" => &mut self.stock,
            "color" => &mut self.color,
            "model" => &mut self.model,
            "title" => &mut self.title,
            "storageGb" => &mut self.storage_gb,
            "ramGb" => &mut self.ram_gb,
            "processor" => &mut self.processor,
            "os" => &mut self.os,
            "graphics" => &mut self.graphics,
            "display" => &mut self.display,
            other => {
                self.extra.insert(other.to_string(), value);
                return;
            }
        };
        *slot = value;
    }

    /// Clears every schema-driven field, keeping the fixed core subset.
    pub fn clear_variable_fields(&mut self) {
        for field in VARIABLE_FIELDS {
            self.set(field, String::new());
        }
        self.extra.clear();
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(value: Option<Self>) -> String {
        match value {
            Some(Scalar::Text(s)) => s,
            Some(Scalar::Int(n)) => n.to_string(),
            Some(Scalar::Float(x)) => x.to_string(),
            Some(Scalar::Bool(b)) => b.to_string(),
            None => String::new(),
        }
    }
}

/// Accepts strings, numbers, booleans or null, so YAML such as `price: 999`
/// loads the same as `price: "999"`.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::into_text(Option::<Scalar>::deserialize(deserializer)?))
}

/// [`scalar_text`] for every value of the leftover schema fields.
fn scalar_text_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<Scalar>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(field, value)| (field, Scalar::into_text(value)))
        .collect())
}
