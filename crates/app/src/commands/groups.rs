//! The `cards groups` command.

use anyhow::{Context, Result};
use comfy_table::Table;
use storage::{GroupField, RecordStore, SourceConfig};
use ui::ALL_LABEL;

pub async fn execute(source: &SourceConfig, group_by: GroupField) -> Result<()> {
    let store = services::initialize_from_config(source, group_by)
        .await
        .context("failed to load directory")?;
    println!("{}", groups_table(&store, group_by));
    Ok(())
}

fn groups_table(store: &RecordStore, group_by: GroupField) -> Table {
    let mut table = Table::new();
    table.set_header(vec![capitalize(group_by.as_str()), "People".to_string()]);
    for (group, count) in store.group_counts() {
        table.add_row(vec![group, count.to_string()]);
    }
    table.add_row(vec![ALL_LABEL.to_string(), store.len().to_string()]);
    table
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
