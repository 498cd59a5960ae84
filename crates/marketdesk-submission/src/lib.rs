//! Category-aware product submission engine.
//!
//! Resolves a category's field schema, composes the tagged image set,
//! validates the form against static and schema-derived rules, and projects
//! it into the backend's submission payload.

pub mod backend;
pub mod embed;
pub mod error;
#[cfg(test)]
mod fake;
pub mod image_set;
pub mod notify;
pub mod payload;
pub mod resolver;
pub mod session;
pub mod validator;

pub use backend::StoreBackend;
pub use error::SessionError;
pub use image_set::{
    ImageCollection, ImageEntry, ImageSet, ImageSource, UploadedImage, FILE_DEFAULT_TAGS,
    URL_DEFAULT_TAGS,
};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use payload::build_payload;
pub use resolver::{CategoryContext, SchemaResolver};
pub use session::{CategoryTicket, SessionState, SubmissionSession};
pub use validator::validate;
