use super::types::{Cell, CoercedRow, CoercedTable, Measure, NormalizedRow, NormalizedTable};
use super::utils::parse_number;

/// Converts every count column to [`Measure`]s. Cells that are not numbers
/// degrade to `Missing`; the operation itself cannot fail.
pub fn coerce(table: NormalizedTable) -> CoercedTable {
    let mut degraded = 0usize;
    let rows = table
        .rows
        .into_iter()
        .map(|NormalizedRow { label, counts }| {
            let counts = counts.map(|cell| {
                let measure = to_measure(&cell);
                if measure.is_missing() && !matches!(cell, Cell::Missing | Cell::Empty) {
                    degraded += 1;
                }
                measure
            });
            CoercedRow {
                provinsi: label.to_string(),
                counts,
            }
        })
        .collect::<Vec<_>>();

    if degraded > 0 {
        tracing::debug!("{} non-numeric cells coerced to missing", degraded);
    }

    CoercedTable { rows }
}

fn to_measure(cell: &Cell) -> Measure {
    let value = match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(s) => parse_number(s),
        _ => None,
    };
    value.map_or(Measure::Missing, Measure::Present)
}
