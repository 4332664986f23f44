use super::types::{
    Cell, ColumnRole, CountColumn, NormalizedRow, NormalizedTable, RawTable, COLUMN_MAP,
};
use super::utils::is_missing_placeholder;
use crate::error::SchemaMismatch;

/// Number of source columns the canonical layout reaches into.
pub fn required_width() -> usize {
    COLUMN_MAP.iter().map(|spec| spec.source_index + 1).max().unwrap_or(0)
}

fn label_index() -> usize {
    COLUMN_MAP
        .iter()
        .find(|spec| spec.role == ColumnRole::Label)
        .map_or(0, |spec| spec.source_index)
}

fn source_index(column: CountColumn) -> usize {
    COLUMN_MAP
        .iter()
        .find(|spec| spec.role == ColumnRole::Count(column))
        .map_or(0, |spec| spec.source_index)
}

/// Checks that every mapped source position exists.
pub fn validate_schema(table: &RawTable) -> Result<(), SchemaMismatch> {
    let found = table.width();
    let missing_columns: Vec<&'static str> = COLUMN_MAP
        .iter()
        .filter(|spec| spec.source_index >= found)
        .map(|spec| spec.name)
        .collect();

    if missing_columns.is_empty() {
        Ok(())
    } else {
        Err(SchemaMismatch {
            required: required_width(),
            found,
            missing_columns,
        })
    }
}

/// Labels of the source columns that the canonical layout does not use.
pub fn dropped_columns(table: &RawTable) -> Vec<String> {
    table
        .headers()
        .iter()
        .enumerate()
        .filter(|(idx, _)| !COLUMN_MAP.iter().any(|spec| spec.source_index == *idx))
        .map(|(_, label)| label.clone())
        .collect()
}

/// Selects the canonical columns and turns dash placeholders into `Missing`.
///
/// Only count columns are scanned for placeholders; the label column and
/// every other value pass through unchanged.
pub fn normalize(table: &RawTable) -> Result<NormalizedTable, SchemaMismatch> {
    validate_schema(table)?;

    let label_idx = label_index();
    let count_indices = CountColumn::ALL.map(source_index);

    let mut replaced = 0usize;
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let counts = count_indices.map(|idx| {
                let cell = &row[idx];
                if is_missing_placeholder(cell) {
                    replaced += 1;
                    Cell::Missing
                } else {
                    cell.clone()
                }
            });
            NormalizedRow {
                label: row[label_idx].clone(),
                counts,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Normalized {} rows, dropped columns {:?}, {} placeholder cells marked missing",
        rows.len(),
        dropped_columns(table),
        replaced
    );

    Ok(NormalizedTable { rows })
}
