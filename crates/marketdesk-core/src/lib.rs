pub mod app_config;
pub mod config;
pub mod error;
pub mod form;
pub mod payload;
pub mod schema;
pub mod validation;
pub mod view_tag;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use form::ProductForm;
pub use payload::{PayloadImage, SubmissionPayload};
pub use schema::{CategoryItem, CategorySchema};
pub use validation::ValidationResult;
pub use view_tag::ViewTag;
