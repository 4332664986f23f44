use super::types::{CoercedTable, CountColumn, Measure};
use crate::error::AnalysisError;
use serde::Serialize;

/// Columns averaged for the national urban/rural comparison, with the
/// category labels shown on the chart.
pub const MEAN_CATEGORIES: [(CountColumn, &str); 4] = [
    (CountColumn::PerkotaanSem1, "Perkotaan Sem 1"),
    (CountColumn::PerkotaanSem2, "Perkotaan Sem 2"),
    (CountColumn::PerdesaanSem1, "Perdesaan Sem 1"),
    (CountColumn::PerdesaanSem2, "Perdesaan Sem 2"),
];

/// Column the highest/lowest insight is computed on.
pub const RANKING_COLUMN: CountColumn = CountColumn::JumlahSem1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMean {
    pub column: &'static str,
    pub category: &'static str,
    pub mean: Measure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremalRow {
    pub provinsi: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremes {
    pub max: ExtremalRow,
    pub min: ExtremalRow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub means: [CategoryMean; 4],
    pub extremes: Result<Extremes, AnalysisError>,
}

/// Arithmetic mean over present cells. No present cell means no mean.
pub fn mean(values: impl Iterator<Item = Measure>) -> Measure {
    let (sum, count) = values
        .filter_map(Measure::value)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        Measure::Missing
    } else {
        Measure::Present(sum / count as f64)
    }
}

/// Rows holding the largest and smallest present value of `column`.
/// On ties the earlier row wins.
pub fn extremes(table: &CoercedTable, column: CountColumn) -> Result<Extremes, AnalysisError> {
    let mut present = table
        .rows
        .iter()
        .filter_map(|row| row.get(column).value().map(|v| (row, v)));

    let first = present
        .next()
        .ok_or(AnalysisError::NoComparableData { column: column.name() })?;

    let (max, min) = present.fold((first, first), |(max, min), candidate| {
        let max = if candidate.1 > max.1 { candidate } else { max };
        let min = if candidate.1 < min.1 { candidate } else { min };
        (max, min)
    });

    Ok(Extremes {
        max: ExtremalRow { provinsi: max.0.provinsi.clone(), value: max.1 },
        min: ExtremalRow { provinsi: min.0.provinsi.clone(), value: min.1 },
    })
}

pub fn aggregate(table: &CoercedTable) -> Metrics {
    let means = MEAN_CATEGORIES.map(|(column, category)| CategoryMean {
        column: column.name(),
        category,
        mean: mean(table.column(column)),
    });

    let extremes = extremes(table, RANKING_COLUMN);
    if let Err(e) = &extremes {
        tracing::warn!("Insight unavailable: {}", e);
    }

    Metrics { means, extremes }
}
