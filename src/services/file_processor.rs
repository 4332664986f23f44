use crate::error::AppError;
use crate::models::DashboardReport;
use crate::services::excel::{coercer, loader, metrics, normalizer};
use crate::services::report::{build_report, ReportInput};
use bytes::Bytes;

/// Runs one upload through load → normalize → coerce → aggregate → report.
///
/// Loader and schema failures abort the upload. A failed insight does not:
/// it is carried inside the returned report.
pub fn process_upload(
    file_data: Bytes,
    file_name: Option<String>,
    preview_rows: usize,
) -> Result<DashboardReport, AppError> {
    let start = std::time::Instant::now();

    let raw = loader::load_workbook(file_data)?;

    let normalized = normalizer::normalize(&raw).map_err(|e| {
        tracing::error!("Schema mismatch: {}", e);
        AppError::from(e)
    })?;

    let table = coercer::coerce(normalized);
    let metrics = metrics::aggregate(&table);

    let report = build_report(ReportInput {
        file_name,
        raw: &raw,
        table: &table,
        metrics,
        preview_rows,
    });

    tracing::info!(
        "Dashboard built for {} rows in {:?}",
        report.row_count,
        start.elapsed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Insight;
    use crate::services::excel::types::{Cell, Measure};
    use crate::test_support::{scenario_rows, xlsx_bytes};

    #[test]
    fn scenario_workbook_end_to_end() {
        let bytes = Bytes::from(xlsx_bytes(&scenario_rows()));
        let report = process_upload(bytes, None, 5).unwrap();

        assert_eq!(report.columns.len(), 7);
        assert_eq!(report.means[0].mean, Measure::Present(1.5));
        assert!(matches!(
            report.insight,
            Insight::Available { ref highest, ref lowest, .. }
                if highest.provinsi == "X" && lowest.provinsi == "X"
        ));
    }

    #[test]
    fn five_column_workbook_is_a_schema_error() {
        let rows = vec![
            ["Provinsi", "A", "B", "C", "D"].map(|h| Cell::Text(h.to_string())).to_vec(),
            vec![Cell::Text("ACEH".into()), Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0), Cell::Number(4.0)],
        ];
        let err = process_upload(Bytes::from(xlsx_bytes(&rows)), None, 5).unwrap_err();

        match err {
            AppError::Schema(mismatch) => assert_eq!(mismatch.found, 5),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_totals_keep_the_rest_of_the_dashboard() {
        let dash = || Cell::Text("-".to_string());
        let mut rows = scenario_rows();
        for row in rows.iter_mut().skip(1) {
            row[7] = dash();
        }
        let report = process_upload(Bytes::from(xlsx_bytes(&rows)), None, 5).unwrap();

        assert!(matches!(report.insight, Insight::Unavailable { .. }));
        assert_eq!(report.means[0].mean, Measure::Present(1.5));
        assert_eq!(report.means[3].mean, Measure::Present(4.5));
        assert_eq!(report.charts.len(), 3);
    }
}
