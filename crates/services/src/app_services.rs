use std::sync::Arc;

use storage::{GroupField, RecordSource, RecordStore, SourceConfig};

use crate::error::AppServicesError;

/// First phase of the two-phase startup: load the store once.
///
/// The result is shared read-only with every session started from it.
///
/// # Errors
///
/// Returns `AppServicesError::Load` when the source fails; no store exists then.
pub async fn initialize(
    source: &dyn RecordSource,
    group_field: GroupField,
) -> Result<Arc<RecordStore>, AppServicesError> {
    let store = RecordStore::load(source, group_field).await?;
    Ok(Arc::new(store))
}

/// Build the configured source and run `initialize` against it.
///
/// # Errors
///
/// Returns `AppServicesError::Load` when the source cannot be built or fails.
pub async fn initialize_from_config(
    config: &SourceConfig,
    group_field: GroupField,
) -> Result<Arc<RecordStore>, AppServicesError> {
    let source = config.build()?;
    initialize(source.as_ref(), group_field).await
}
