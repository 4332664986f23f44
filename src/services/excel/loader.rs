use super::types::{Cell, RawTable};
use crate::error::AppError;
use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, ExcelDateTime, Range, Reader, Xlsx};
use std::io::Cursor;

/// Reads the first worksheet of an xlsx payload into a [`RawTable`].
///
/// The first row of the used range is the header. Everything below it is
/// data; a sheet with no data rows is rejected like a corrupt file.
pub fn load_workbook(file_data: Bytes) -> Result<RawTable, AppError> {
    let start = std::time::Instant::now();
    tracing::info!("Opening workbook ({} bytes)", file_data.len());

    let cursor = Cursor::new(file_data);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| {
        tracing::error!("Failed to open Excel file: {}", e);
        AppError::MalformedSpreadsheet(format!("Failed to open Excel file: {}", e))
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    tracing::debug!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| AppError::MalformedSpreadsheet("No sheets found in workbook".to_string()))?;

    let range = workbook.worksheet_range(sheet_name).map_err(|e| {
        tracing::error!("Failed to read worksheet {}: {}", sheet_name, e);
        AppError::MalformedSpreadsheet(format!("Failed to read worksheet {}: {}", sheet_name, e))
    })?;

    let table = range_to_table(&range)
        .map_err(|msg| AppError::MalformedSpreadsheet(format!("Worksheet {} {}", sheet_name, msg)))?;

    tracing::info!(
        "Loaded sheet {} with {} rows x {} columns in {:?}",
        sheet_name,
        table.height(),
        table.width(),
        start.elapsed()
    );
    Ok(table)
}

fn range_to_table(range: &Range<Data>) -> Result<RawTable, &'static str> {
    // The used range starts at the first non-empty cell; pad back to column A
    // so positions line up with the sheet's own columns.
    let leading_columns = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range.rows().map(|row| {
        std::iter::repeat(Cell::Empty)
            .take(leading_columns)
            .chain(row.iter().map(to_cell))
            .collect::<Vec<_>>()
    });

    let header = rows.next().ok_or("is empty")?;
    let headers = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_label(idx, cell))
        .collect::<Vec<_>>();

    let data: Vec<Vec<Cell>> = rows.collect();
    if data.is_empty() {
        return Err("has a header row but no data rows");
    }

    Ok(RawTable::new(headers, data))
}

fn to_cell(value: &Data) -> Cell {
    match value {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(date_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Empty | Data::Error(_) => Cell::Empty,
    }
}

/// ISO form of a date cell. The serial number itself must not reach the
/// coercer, where it would read as a count.
fn date_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => format!("#DATETIME({})", dt.as_f64()),
    }
}

fn header_label(idx: usize, cell: &Cell) -> String {
    let label = cell.to_string();
    if label.trim().is_empty() {
        format!("Unnamed: {}", idx)
    } else {
        label
    }
}
