//! In-memory [`StoreBackend`] for unit tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Mutex;

use marketdesk_api::{ApiError, CategoryFieldsResponse, SubmitResponse};
use marketdesk_core::{CategoryItem, SubmissionPayload};

use crate::backend::StoreBackend;

fn status_error(category_id: i64, status: u16) -> ApiError {
    ApiError::UnexpectedStatus {
        status,
        url: format!("http://fake/categories/{category_id}"),
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    fields: HashMap<i64, Result<CategoryFieldsResponse, u16>>,
    items: HashMap<i64, Result<Vec<CategoryItem>, u16>>,
    submit_outcomes: Mutex<VecDeque<Result<SubmitResponse, (u16, Option<String>)>>>,
    submitted: Mutex<Vec<SubmissionPayload>>,
    field_calls: Mutex<usize>,
}

impl FakeBackend {
    pub(crate) fn with_fields(mut self, category_id: i64, required: &[&str], optional: &[&str]) -> Self {
        let response = CategoryFieldsResponse {
            required: required.iter().map(|s| (*s).to_string()).collect(),
            optional: if optional.is_empty() {
                None
            } else {
                Some(optional.iter().map(|s| (*s).to_string()).collect())
            },
        };
        self.fields.insert(category_id, Ok(response));
        self
    }

    pub(crate) fn with_failing_fields(mut self, category_id: i64, status: u16) -> Self {
        self.fields.insert(category_id, Err(status));
        self
    }

    pub(crate) fn with_items(mut self, category_id: i64, names: &[&str]) -> Self {
        let items = names
            .iter()
            .enumerate()
            .map(|(i, name)| CategoryItem {
                id: i64::try_from(i).unwrap_or_default() + 10,
                name: (*name).to_string(),
            })
            .collect();
        self.items.insert(category_id, Ok(items));
        self
    }

    pub(crate) fn with_failing_items(mut self, category_id: i64, status: u16) -> Self {
        self.items.insert(category_id, Err(status));
        self
    }

    pub(crate) fn then_submit(self, outcome: Result<Option<&str>, (u16, Option<&str>)>) -> Self {
        let outcome = match outcome {
            Ok(message) => Ok(SubmitResponse {
                message: message.map(str::to_owned),
            }),
            Err((status, message)) => Err((status, message.map(str::to_owned))),
        };
        self.submit_outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub(crate) fn submitted(&self) -> Vec<SubmissionPayload> {
        self.submitted.lock().unwrap().clone()
    }

    pub(crate) fn field_calls(&self) -> usize {
        *self.field_calls.lock().unwrap()
    }
}

impl StoreBackend for FakeBackend {
    fn category_fields(
        &self,
        category_id: i64,
    ) -> impl Future<Output = Result<CategoryFieldsResponse, ApiError>> {
        *self.field_calls.lock().unwrap() += 1;
        let outcome = match self.fields.get(&category_id) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(status_error(category_id, *status)),
            None => Err(status_error(category_id, 404)),
        };
        std::future::ready(outcome)
    }

    fn category_items(
        &self,
        category_id: i64,
    ) -> impl Future<Output = Result<Vec<CategoryItem>, ApiError>> {
        let outcome = match self.items.get(&category_id) {
            Some(Ok(items)) => Ok(items.clone()),
            Some(Err(status)) => Err(status_error(category_id, *status)),
            None => Ok(Vec::new()),
        };
        std::future::ready(outcome)
    }

    fn submit_product(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<SubmitResponse, ApiError>> {
        self.submitted.lock().unwrap().push(payload.clone());
        let outcome = match self.submit_outcomes.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err((status, message))) => Err(ApiError::Rejected { status, message }),
            None => Ok(SubmitResponse::default()),
        };
        std::future::ready(outcome)
    }
}
