//! Report persistence.
//!
//! Two sinks: a plain CSV file and an XLSX workbook. The XLSX sink carries
//! the presentation the report was designed around, with an `=IMAGE(...)`
//! formula in the image column and number formats on the metric columns.

use anyhow::Result;
use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet};
use tracing::debug;

use crate::report::{COLUMNS, NOT_AVAILABLE, ReportRow};

/// Worksheet the report lands on.
pub const SHEET_NAME: &str = "Sheet1";

/// Writes the report as CSV: one header row, one record per course. The
/// file is replaced, not appended to; a report run is a full snapshot.
pub fn write_csv(path: &str, rows: &[ReportRow]) -> Result<()> {
    debug!(path, row_count = rows.len(), "Writing CSV report");

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the report as an XLSX workbook with a single worksheet.
///
/// Counts get a `#,##0` format and rates `0.0%`; the image column holds an
/// `=IMAGE("<url>")` formula where a heading image exists. Unavailable
/// metrics render as [`NOT_AVAILABLE`] strings.
pub fn write_xlsx(path: &str, rows: &[ReportRow]) -> Result<()> {
    debug!(path, row_count = rows.len(), "Writing XLSX report");

    let mut workbook = Workbook::new();
    let count_format = Format::new().set_num_format("#,##0");
    let rate_format = Format::new().set_num_format("0.0%");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;

        worksheet.write_number(r, 0, row.course.id as f64)?;
        if let Some(url) = &row.course.heading_image_url {
            worksheet.write_formula(r, 1, Formula::new(format!("=IMAGE(\"{url}\")")))?;
        }
        worksheet.write_string(r, 2, &row.course.name)?;
        worksheet.write_boolean(r, 3, row.course.is_published)?;

        match &row.summary {
            Some(s) => {
                worksheet.write_number_with_format(
                    r,
                    4,
                    s.total_enrollments as f64,
                    &count_format,
                )?;
                worksheet.write_number_with_format(r, 5, s.started_count as f64, &count_format)?;
                write_rate(worksheet, r, 6, s.started_rate, &rate_format)?;
                worksheet.write_number_with_format(r, 7, s.completed_count as f64, &count_format)?;
                write_rate(worksheet, r, 8, s.completed_rate, &rate_format)?;
            }
            None => {
                for col in 4..=8u16 {
                    worksheet.write_string(r, col, NOT_AVAILABLE)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_rate(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    rate: Option<f64>,
    format: &Format,
) -> Result<()> {
    match rate {
        Some(v) => worksheet.write_number_with_format(row, col, v, format)?,
        None => worksheet.write_string(row, col, NOT_AVAILABLE)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Course;
    use crate::enrollments::EnrollmentSummary;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_rows() -> Vec<ReportRow> {
        let available = ReportRow {
            course: Course {
                id: 1,
                name: "Baking".to_string(),
                heading_image_url: Some("https://cdn.example.com/bread.png".to_string()),
                is_published: true,
            },
            summary: Some(EnrollmentSummary::from_percentages(&[0.0, 50.0, 100.0])),
        };
        let unavailable = ReportRow {
            course: Course {
                id: 2,
                name: "Ghost".to_string(),
                heading_image_url: None,
                is_published: false,
            },
            summary: None,
        };
        vec![available, unavailable]
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let path = temp_path("teachable_report_test_rows.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &sample_rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,image,name,is_published"));
        assert!(lines[1].contains("Baking"));
        assert!(lines[1].contains("0.667"));
        assert!(lines[2].contains("N/a"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_replaces_previous_file() {
        let path = temp_path("teachable_report_test_replace.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &sample_rows()).unwrap();
        write_csv(&path, &sample_rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Still one header and two records; a rerun is a snapshot, not an
        // append.
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_xlsx_creates_workbook() {
        let path = temp_path("teachable_report_test_workbook.xlsx");
        let _ = fs::remove_file(&path);

        write_xlsx(&path, &sample_rows()).unwrap();

        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_empty_report_still_produces_header() {
        let path = temp_path("teachable_report_test_empty.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);

        fs::remove_file(&path).unwrap();
    }
}
