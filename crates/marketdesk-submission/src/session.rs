//! State machine for one product submission dialog.
//!
//! ```text
//! Idle -> CategorySelected -> SchemaLoaded -> Editing -> Validating
//!      -> Submitting -> Success
//!      -> Submitting -> Failed -> Editing
//! ```
//!
//! Applying a freshly loaded category is the only step that clears the
//! schema-driven form fields. A failed submission keeps every entered value
//! and image. Category lookups are tagged with a [`CategoryTicket`]; a
//! lookup that finishes after the user picked a different category is
//! discarded.

use marketdesk_api::SubmitResponse;
use marketdesk_core::{CategoryItem, CategorySchema, ProductForm, SubmissionPayload, ValidationResult, ViewTag};

use crate::backend::StoreBackend;
use crate::error::SessionError;
use crate::image_set::{ImageCollection, ImageEntry, ImageSet, UploadedImage};
use crate::notify::Notifier;
use crate::payload::build_payload;
use crate::resolver::{CategoryContext, SchemaResolver};
use crate::validator::validate;

const GENERIC_SUBMIT_FAILURE: &str = "Could not submit the product. Please try again.";
const SUBMIT_SUCCESS: &str = "Product submitted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    CategorySelected,
    SchemaLoaded,
    Editing,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// Identifies one category selection. Only the ticket from the latest
/// selection can apply its lookup results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTicket {
    pub category_id: i64,
    generation: u64,
}

pub struct SubmissionSession {
    state: SessionState,
    generation: u64,
    category_id: Option<i64>,
    schema: CategorySchema,
    items: Vec<CategoryItem>,
    form: ProductForm,
    images: ImageSet,
    errors: ValidationResult,
    notifier: Notifier,
}

impl SubmissionSession {
    #[must_use]
    pub fn new(notifier: Notifier) -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
            category_id: None,
            schema: CategorySchema::empty(),
            items: Vec::new(),
            form: ProductForm::default(),
            images: ImageSet::new(),
            errors: ValidationResult::new(),
            notifier,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    #[must_use]
    pub fn schema(&self) -> &CategorySchema {
        &self.schema
    }

    #[must_use]
    pub fn items(&self) -> &[CategoryItem] {
        &self.items
    }

    #[must_use]
    pub fn has_category_items(&self) -> bool {
        !self.items.is_empty()
    }

    #[must_use]
    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    #[must_use]
    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    /// Errors from the last submit attempt.
    #[must_use]
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Starts a new category selection. The previous schema and items are
    /// dropped until [`SubmissionSession::apply_category`] delivers new ones.
    pub fn select_category(&mut self, category_id: i64) -> CategoryTicket {
        self.generation += 1;
        self.category_id = Some(category_id);
        self.schema = CategorySchema::empty();
        self.items.clear();
        self.form.set("categoryId", category_id.to_string());
        self.form.set("categoryItemId", String::new());
        self.state = SessionState::CategorySelected;
        tracing::debug!(category_id, generation = self.generation, "category selected");
        CategoryTicket {
            category_id,
            generation: self.generation,
        }
    }

    /// Clears the category. Any lookup still in flight becomes stale.
    pub fn clear_category(&mut self) {
        self.generation += 1;
        self.category_id = None;
        self.schema = CategorySchema::empty();
        self.items.clear();
        self.form.set("categoryId", String::new());
        self.form.set("categoryItemId", String::new());
        self.state = SessionState::Idle;
    }

    /// Applies lookup results for `ticket`. Returns `false` and changes
    /// nothing if the ticket is no longer the current selection.
    pub fn apply_category(&mut self, ticket: CategoryTicket, context: CategoryContext) -> bool {
        let current = ticket.generation == self.generation
            && self.category_id == Some(ticket.category_id)
            && context.category_id == ticket.category_id;
        if !current {
            tracing::debug!(
                category_id = context.category_id,
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale category lookup"
            );
            return false;
        }

        self.schema = context.schema;
        self.items = context.items;
        self.form.clear_variable_fields();
        self.errors = ValidationResult::new();
        self.state = SessionState::SchemaLoaded;
        true
    }

    /// Selects `category_id` and loads its schema and items.
    pub async fn choose_category<B: StoreBackend>(
        &mut self,
        resolver: &SchemaResolver<'_, B>,
        category_id: i64,
    ) -> bool {
        let ticket = self.select_category(category_id);
        let context = resolver.load(category_id).await;
        self.apply_category(ticket, context)
    }

    fn touch(&mut self) {
        if self.state != SessionState::Submitting {
            self.state = SessionState::Editing;
        }
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        self.form.set(field, value);
        self.touch();
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = UploadedImage>) {
        self.images.add_files(files);
        self.touch();
    }

    pub fn add_url_slot(&mut self) -> usize {
        let index = self.images.add_url_slot();
        self.touch();
        index
    }

    pub fn set_url(&mut self, index: usize, url: impl Into<String>) -> bool {
        let changed = self.images.set_url(index, url);
        self.touch();
        changed
    }

    pub fn remove_image(&mut self, collection: ImageCollection, index: usize) -> Option<ImageEntry> {
        let removed = self.images.remove_at(collection, index);
        self.touch();
        removed
    }

    pub fn set_tag(&mut self, absolute_index: usize, tag: ViewTag) -> bool {
        let changed = self.images.set_tag(absolute_index, tag);
        self.touch();
        changed
    }

    /// Validates and, when valid, moves to `Submitting` and returns the
    /// payload to send.
    ///
    /// # Errors
    ///
    /// - [`SessionError::SubmitInFlight`] if a previous payload has not been
    ///   resolved with [`SubmissionSession::finish_submit`].
    /// - [`SessionError::Validation`] if any rule fails; the session returns
    ///   to `Editing` with the errors recorded.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SessionError> {
        if self.state == SessionState::Submitting {
            return Err(SessionError::SubmitInFlight);
        }

        self.state = SessionState::Validating;
        self.errors = validate(
            &self.form,
            &self.schema,
            &self.images,
            self.has_category_items(),
        );
        if !self.errors.is_valid() {
            tracing::info!(errors = self.errors.len(), "submission failed validation");
            self.notifier.warning(format!(
                "Please fix {} field(s) before submitting.",
                self.errors.len()
            ));
            self.state = SessionState::Editing;
            return Err(SessionError::Validation(self.errors.clone()));
        }

        self.state = SessionState::Submitting;
        Ok(build_payload(&self.form, &self.images))
    }

    /// Records the backend's answer to the payload from
    /// [`SubmissionSession::begin_submit`].
    ///
    /// On success the form, images and category are reset. On failure
    /// everything the user entered is kept.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotSubmitting`] if no payload is outstanding; the
    ///   outcome is ignored and the session is left untouched.
    /// - [`SessionError::Transport`] wrapping the backend error.
    pub fn finish_submit(
        &mut self,
        outcome: Result<SubmitResponse, marketdesk_api::ApiError>,
    ) -> Result<SubmitResponse, SessionError> {
        if self.state != SessionState::Submitting {
            tracing::debug!(
                state = ?self.state,
                succeeded = outcome.is_ok(),
                "ignoring submit outcome with no submission in flight"
            );
            return Err(SessionError::NotSubmitting);
        }

        match outcome {
            Ok(response) => {
                tracing::info!(category_id = ?self.category_id, "product submitted");
                self.notifier
                    .success(response.message.clone().unwrap_or_else(|| SUBMIT_SUCCESS.to_owned()));
                self.reset();
                self.state = SessionState::Success;
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(error = %err, "product submission failed");
                self.notifier.error(
                    err.backend_message()
                        .unwrap_or(GENERIC_SUBMIT_FAILURE)
                        .to_owned(),
                );
                self.state = SessionState::Failed;
                Err(SessionError::Transport(err))
            }
        }
    }

    /// Validates, sends one submit call, and records the outcome.
    ///
    /// # Errors
    ///
    /// See [`SubmissionSession::begin_submit`] and
    /// [`SubmissionSession::finish_submit`].
    pub async fn submit<B: StoreBackend>(
        &mut self,
        backend: &B,
    ) -> Result<SubmitResponse, SessionError> {
        let payload = self.begin_submit()?;
        tracing::info!(
            category_id = payload.category_id,
            images = payload.images.len(),
            "sending product submission"
        );
        let outcome = backend.submit_product(&payload).await;
        self.finish_submit(outcome)
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.category_id = None;
        self.schema = CategorySchema::empty();
        self.items.clear();
        self.form = ProductForm::default();
        self.images.clear();
        self.errors = ValidationResult::new();
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
