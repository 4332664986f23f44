use crate::error::AnalysisError;
use crate::models::{ChartKind, ChartSpec, DashboardReport, Insight};
use crate::services::excel::metrics::{Extremes, Metrics};
use crate::services::excel::normalizer::dropped_columns;
use crate::services::excel::types::{canonical_names, CoercedTable, CountColumn, RawTable, LABEL_COLUMN};

const TITLE: &str = "Dashboard Analisis Kemiskinan Indonesia";
const CAPTION: &str = "Data: Penduduk Miskin Per Provinsi 2024";
const UNIT: &str = "ribu jiwa";

pub struct ReportInput<'a> {
    pub file_name: Option<String>,
    pub raw: &'a RawTable,
    pub table: &'a CoercedTable,
    pub metrics: Metrics,
    pub preview_rows: usize,
}

pub fn build_report(input: ReportInput<'_>) -> DashboardReport {
    let ReportInput { file_name, raw, table, metrics, preview_rows } = input;

    let raw_preview: Vec<Vec<String>> = raw
        .rows()
        .iter()
        .take(preview_rows)
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    let charts = vec![
        province_bar(
            table,
            CountColumn::JumlahSem1,
            "Jumlah Penduduk Miskin per Provinsi (Semester 1)",
            false,
        ),
        province_bar(
            table,
            CountColumn::JumlahSem2,
            "Jumlah Penduduk Miskin per Provinsi (Semester 2)",
            true,
        ),
        ChartSpec {
            kind: ChartKind::Line,
            title: "Rata-rata Nasional Penduduk Miskin",
            x_label: "Kategori",
            y_label: "Rata_Rata",
            x: metrics.means.iter().map(|m| m.category.to_string()).collect(),
            y: metrics.means.iter().map(|m| m.mean).collect(),
            show_values: false,
            color_by_value: false,
            markers: true,
        },
    ];

    DashboardReport {
        title: TITLE,
        caption: CAPTION,
        file_name,
        generated_at: chrono::Utc::now().to_rfc3339(),
        row_count: table.rows.len(),
        source_columns: raw.headers().to_vec(),
        dropped_columns: dropped_columns(raw),
        raw_preview,
        columns: canonical_names(),
        preview: table.rows.iter().take(preview_rows).cloned().collect(),
        insight: insight(metrics.extremes),
        means: metrics.means,
        charts,
    }
}

fn province_bar(
    table: &CoercedTable,
    column: CountColumn,
    title: &'static str,
    color_by_value: bool,
) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title,
        x_label: LABEL_COLUMN,
        y_label: column.name(),
        x: table.labels().map(str::to_string).collect(),
        y: table.column(column).collect(),
        show_values: true,
        color_by_value,
        markers: false,
    }
}

fn insight(extremes: Result<Extremes, AnalysisError>) -> Insight {
    match extremes {
        Ok(extremes) => {
            let difference = extremes.max.value - extremes.min.value;
            let text = insight_text(&extremes, difference);
            Insight::Available {
                highest: extremes.max,
                lowest: extremes.min,
                difference,
                text,
            }
        }
        Err(AnalysisError::NoComparableData { column }) => Insight::Unavailable {
            message: format!(
                "Tidak ada provinsi dengan nilai {} yang dapat dibandingkan.",
                column
            ),
        },
    }
}

/// Markdown block naming the highest and lowest province for the ranking column.
fn insight_text(extremes: &Extremes, difference: f64) -> String {
    format!(
        "### Insight Penting:\n\
         - Provinsi dengan penduduk miskin **tertinggi** semester 1: **{}** ({:.2} {unit})\n\
         - Provinsi dengan penduduk miskin **terendah** semester 1: **{}** ({:.2} {unit})\n\
         - Perbedaan antara keduanya: **{:.2} {unit}**",
        extremes.max.provinsi,
        extremes.max.value,
        extremes.min.provinsi,
        extremes.min.value,
        difference,
        unit = UNIT,
    )
}
