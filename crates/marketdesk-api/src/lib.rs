pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::StoreApiClient;
pub use error::ApiError;
pub use types::{CategoryFieldsResponse, SubmitResponse};
