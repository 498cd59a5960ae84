//! `submit` command: drive a full submission from a YAML file.
//!
//! ```yaml
//! form:
//!   categoryId: 4
//!   categoryItemId: 12
//!   name: Pixel 8
//!   description: Lightly used
//!   price: 399
//!   storageGb: 128
//! images:
//!   - file: photos/front.jpg
//!   - url: https://cdn.example.com/back.png
//!     tag: BACK
//! ```
//!
//! Relative `file` paths are resolved against the YAML file's directory.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use marketdesk_api::StoreApiClient;
use marketdesk_core::{ProductForm, ViewTag};
use marketdesk_submission::{
    ImageCollection, Notifier, SchemaResolver, SessionError, SubmissionSession, UploadedImage,
};
use serde::Deserialize;

use crate::drain_notices;

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionFile {
    #[serde(default)]
    pub form: ProductForm,
    #[serde(default)]
    pub images: Vec<ImageSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ImageSpec {
    File { file: PathBuf, tag: Option<String> },
    Url { url: String, tag: Option<String> },
}

impl ImageSpec {
    fn tag(&self) -> anyhow::Result<Option<ViewTag>> {
        let raw = match self {
            ImageSpec::File { tag, .. } | ImageSpec::Url { tag, .. } => tag.as_deref(),
        };
        raw.map(|t| ViewTag::from_str(t).map_err(|e| anyhow::anyhow!("image tag: {e}")))
            .transpose()
    }
}

/// Parses a submission file's YAML text.
///
/// # Errors
///
/// Returns an error if the YAML does not match the submission file shape.
pub(crate) fn parse_submission_file(text: &str) -> anyhow::Result<SubmissionFile> {
    serde_yaml::from_str(text).map_err(|e| anyhow::anyhow!("invalid submission file: {e}"))
}

fn category_id_of(form: &ProductForm) -> anyhow::Result<i64> {
    let raw = form
        .value("categoryId")
        .ok_or_else(|| anyhow::anyhow!("submission file has no form.categoryId"))?;
    raw.parse::<i64>()
        .map_err(|e| anyhow::anyhow!("form.categoryId {raw:?} is not an integer: {e}"))
}

/// Copies every non-empty form value into the session.
fn apply_form(session: &mut SubmissionSession, form: &ProductForm) -> anyhow::Result<()> {
    let serde_json::Value::Object(fields) = serde_json::to_value(form)? else {
        anyhow::bail!("form did not serialize to an object");
    };
    for (field, value) in fields {
        if let Some(text) = value.as_str().filter(|t| !t.trim().is_empty()) {
            session.set_field(&field, text);
        }
    }
    Ok(())
}

/// Adds the file's images to the session in listed order, applying any
/// explicit tags over the defaults.
fn apply_images(
    session: &mut SubmissionSession,
    images: &[ImageSpec],
    base_dir: &Path,
) -> anyhow::Result<()> {
    for spec in images {
        let tag = spec.tag()?;
        let position = match spec {
            ImageSpec::File { file, .. } => {
                let path = base_dir.join(file);
                let bytes = std::fs::read(&path)
                    .map_err(|e| anyhow::anyhow!("failed to read image {}: {e}", path.display()))?;
                let file_name = file
                    .file_name()
                    .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
                session.add_files([UploadedImage::new(file_name, bytes)]);
                let index = session.images().upload_count() - 1;
                session.images().absolute_index(ImageCollection::Uploads, index)
            }
            ImageSpec::Url { url, .. } => {
                let index = session.add_url_slot();
                session.set_url(index, url.as_str());
                session.images().absolute_index(ImageCollection::Urls, index)
            }
        };
        if let Some(tag) = tag {
            session.set_tag(position, tag);
        }
    }
    Ok(())
}

/// Runs one submission described by the YAML file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if the form fails
/// validation, or if the backend rejects the submission.
pub(crate) async fn run_submit(
    client: &StoreApiClient,
    path: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let file = parse_submission_file(&text)?;
    let category_id = category_id_of(&file.form)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let notifier = Notifier::default();
    let mut notices = notifier.subscribe();
    let resolver = SchemaResolver::new(client, notifier.clone());
    let mut session = SubmissionSession::new(notifier);

    session.choose_category(&resolver, category_id).await;
    apply_form(&mut session, &file.form)?;
    apply_images(&mut session, &file.images, base_dir)?;

    if dry_run {
        let outcome = session.begin_submit();
        drain_notices(&mut notices);
        let payload = outcome.map_err(report_session_error)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        println!("dry-run: payload not sent");
        return Ok(());
    }

    let outcome = session.submit(client).await;
    drain_notices(&mut notices);
    let response = outcome.map_err(report_session_error)?;
    println!(
        "submitted: {}",
        response.message.as_deref().unwrap_or("accepted")
    );
    Ok(())
}

/// Lists validation failures per field on stderr before converting.
fn report_session_error(err: SessionError) -> anyhow::Error {
    match err {
        SessionError::Validation(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
            anyhow::anyhow!("submission has {} invalid field(s)", errors.len())
        }
        other => other.into(),
    }
}
