//! Per-course enrollment aggregation.

use tracing::debug;

use crate::api::{ApiError, CourseApi};

/// Completion metrics reduced from one course's full enrollment list.
///
/// Rates are `None` when the course has no enrollments in the reporting
/// window; the sink renders that as `N/a` rather than dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentSummary {
    pub total_enrollments: usize,
    pub started_count: usize,
    pub started_rate: Option<f64>,
    pub completed_count: usize,
    pub completed_rate: Option<f64>,
}

impl EnrollmentSummary {
    /// Reduces a list of per-user completion percentages.
    ///
    /// "Started" means strictly above 0. "Completed" means exactly 100; the
    /// platform caps `percent_complete` at 100, so equality is safe.
    pub fn from_percentages(values: &[f64]) -> Self {
        let total_enrollments = values.len();
        let started_count = values.iter().filter(|v| **v > 0.0).count();
        let completed_count = values.iter().filter(|v| **v == 100.0).count();

        Self {
            total_enrollments,
            started_count,
            started_rate: Self::rate(started_count, total_enrollments),
            completed_count,
            completed_rate: Self::rate(completed_count, total_enrollments),
        }
    }

    fn rate(part: usize, total: usize) -> Option<f64> {
        if total == 0 {
            None
        } else {
            Some(part as f64 / total as f64)
        }
    }
}

/// Pages through `courses/<id>/enrollments` and reduces the stream of
/// `percent_complete` values into an [`EnrollmentSummary`].
///
/// Page 1 is fetched once and contributes exactly once; the loop then covers
/// pages `2..=number_of_pages` inclusive, so the last page is never dropped.
/// Any page failure propagates to the caller, which decides whether to abort
/// or substitute a sentinel row.
#[tracing::instrument(skip(api))]
pub async fn summarize_enrollments<A: CourseApi>(
    api: &A,
    course_id: u64,
) -> Result<EnrollmentSummary, ApiError> {
    let first = api.enrollment_page(course_id, 1).await?;
    let total_pages = first.meta.number_of_pages;

    let mut percentages: Vec<f64> = first
        .enrollments
        .iter()
        .map(|e| e.percent_complete)
        .collect();

    for page in 2..=total_pages {
        let next = api.enrollment_page(course_id, page).await?;
        percentages.extend(next.enrollments.iter().map(|e| e.percent_complete));
    }

    debug!(course_id, enrollment_count = percentages.len(), "Enrollments collected");
    Ok(EnrollmentSummary::from_percentages(&percentages))
}
