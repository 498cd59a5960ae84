use std::future::Future;

use marketdesk_api::{ApiError, CategoryFieldsResponse, StoreApiClient, SubmitResponse};
use marketdesk_core::{CategoryItem, SubmissionPayload};

/// The backend calls the submission engine depends on.
///
/// Implemented for [`StoreApiClient`]; tests substitute in-memory fakes.
pub trait StoreBackend {
    fn category_fields(
        &self,
        category_id: i64,
    ) -> impl Future<Output = Result<CategoryFieldsResponse, ApiError>>;

    fn category_items(
        &self,
        category_id: i64,
    ) -> impl Future<Output = Result<Vec<CategoryItem>, ApiError>>;

    fn submit_product(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<SubmitResponse, ApiError>>;
}

impl StoreBackend for StoreApiClient {
    fn category_fields(
        &self,
        category_id: i64,
    ) -> impl Future<Output = Result<CategoryFieldsResponse, ApiError>> {
        StoreApiClient::category_fields(self, category_id)
    }

    fn category_items(
        &self,
        category_id: i64,
    ) -> impl Future<Output = Result<Vec<CategoryItem>, ApiError>> {
        StoreApiClient::category_items(self, category_id)
    }

    fn submit_product(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<SubmitResponse, ApiError>> {
        StoreApiClient::submit_product(self, payload)
    }
}
