use crate::services::excel::metrics::{CategoryMean, ExtremalRow};
use crate::services::excel::types::{CoercedRow, Measure};
use serde::Serialize;

/// Everything the dashboard page needs to render one upload.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub title: &'static str,
    pub caption: &'static str,
    pub file_name: Option<String>,
    pub generated_at: String,
    pub row_count: usize,
    pub source_columns: Vec<String>,
    pub dropped_columns: Vec<String>,
    pub raw_preview: Vec<Vec<String>>,
    pub columns: [&'static str; 7],
    pub preview: Vec<CoercedRow>,
    pub means: [CategoryMean; 4],
    pub charts: Vec<ChartSpec>,
    pub insight: Insight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x: Vec<String>,
    pub y: Vec<Measure>,
    pub show_values: bool,
    pub color_by_value: bool,
    pub markers: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Insight {
    Available {
        highest: ExtremalRow,
        lowest: ExtremalRow,
        difference: f64,
        text: String,
    },
    Unavailable {
        message: String,
    },
}
