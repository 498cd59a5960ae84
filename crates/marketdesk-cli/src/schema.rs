//! `schema` command: show what a category asks for.

use marketdesk_api::StoreApiClient;
use marketdesk_submission::{Notifier, SchemaResolver};
use serde_json::json;

use crate::drain_notices;

/// Resolves the schema and items for `category_id` and prints them as JSON.
///
/// Lookup failures are reported as warnings and yield an empty schema, the
/// same as in the submission flow.
///
/// # Errors
///
/// Returns an error only if the output cannot be serialized.
pub(crate) async fn run_schema(client: &StoreApiClient, category_id: i64) -> anyhow::Result<()> {
    let notifier = Notifier::default();
    let mut notices = notifier.subscribe();
    let resolver = SchemaResolver::new(client, notifier);

    let context = resolver.load(category_id).await;
    drain_notices(&mut notices);

    let output = json!({
        "categoryId": context.category_id,
        "schema": context.schema,
        "items": context.items,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
