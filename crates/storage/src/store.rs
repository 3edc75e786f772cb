use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use cards_core::model::{Record, RecordId};
use tracing::{info, warn};

use crate::mapping::{GroupField, map_record};
use crate::repository::{RecordSource, SourceError};

/// Treats a blank group the same as no group at all.
#[must_use]
pub fn normalize_group(group: Option<&str>) -> Option<&str> {
    group.map(str::trim).filter(|g| !g.is_empty())
}

/// Immutable collection of person records, loaded once.
///
/// Records are handed out as `Arc<Record>` so sessions can hold onto them
/// without copying.
#[derive(Clone, Default)]
pub struct RecordStore {
    records: Vec<Arc<Record>>,
    groups: Vec<String>,
}

impl RecordStore {
    /// Perform the single retrieval from `source` and build the store.
    ///
    /// Malformed entries are dropped with a warning; only a failure of the
    /// source itself fails the load.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the source cannot deliver a well-formed collection.
    pub async fn load(
        source: &dyn RecordSource,
        group_field: GroupField,
    ) -> Result<Self, SourceError> {
        let values = source.fetch().await?;
        let fetched = values.len();

        let mut records = Vec::with_capacity(fetched);
        for (index, value) in values.into_iter().enumerate() {
            match map_record(value, group_field) {
                Ok(record) => records.push(record),
                Err(rejected) => warn!(index, %rejected, "dropping malformed record"),
            }
        }

        let store = Self::from_records(records);
        info!(
            source = %source.describe(),
            fetched,
            loaded = store.len(),
            groups = store.groups.len(),
            group_field = %group_field,
            "record store loaded"
        );
        Ok(store)
    }

    /// Build a store from already-validated records. Later duplicates of an id are dropped.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut seen: HashSet<RecordId> = HashSet::new();
        let mut kept = Vec::new();
        for record in records {
            if !seen.insert(record.id().clone()) {
                warn!(id = %record.id(), "dropping duplicate record id");
                continue;
            }
            kept.push(Arc::new(record));
        }

        let mut groups: Vec<String> = kept
            .iter()
            .filter_map(|r| r.group())
            .map(str::to_owned)
            .collect();
        groups.sort();
        groups.dedup();

        Self {
            records: kept,
            groups,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, duplicate-free group labels.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Every group with the number of records in it, sorted by group.
    #[must_use]
    pub fn group_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for group in self.records.iter().filter_map(|r| r.group()) {
            *counts.entry(group).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(group, count)| (group.to_owned(), count))
            .collect()
    }

    /// Records in `group`, or every record when no group is given.
    #[must_use]
    pub fn filtered(&self, group: Option<&str>) -> Vec<Arc<Record>> {
        match normalize_group(group) {
            None => self.records.clone(),
            Some(group) => self
                .records
                .iter()
                .filter(|r| r.in_group(group))
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Arc<Record>> {
        self.records.iter().find(|r| r.id() == id)
    }
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("records_len", &self.records.len())
            .field("groups", &self.groups)
            .finish()
    }
}
