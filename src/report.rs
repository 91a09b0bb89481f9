//! Report assembly: courses joined with their enrollment summaries.

use tracing::{info, warn};

use crate::api::{ApiError, Course, CourseApi};
use crate::courses::list_all_courses;
use crate::enrollments::{EnrollmentSummary, summarize_enrollments};

/// Sentinel rendered into metric cells whose data could not be fetched.
pub const NOT_AVAILABLE: &str = "N/a";

/// Column order of the report, fixed across sinks.
pub const COLUMNS: [&str; 9] = [
    "id",
    "image",
    "name",
    "is_published",
    "total_enrollments",
    "started_count",
    "started_rate",
    "completed_count",
    "completed_rate",
];

/// One output row: a course and, when available, its enrollment summary.
///
/// `summary: None` is the per-course failure sentinel; all five metric
/// columns render as [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub course: Course,
    pub summary: Option<EnrollmentSummary>,
}

impl ReportRow {
    /// Renders the row as strings in [`COLUMNS`] order, for text sinks.
    /// Rates carry three decimal places; a missing image URL is an empty
    /// cell.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.course.id.to_string(),
            self.course.heading_image_url.clone().unwrap_or_default(),
            self.course.name.clone(),
            self.course.is_published.to_string(),
        ];

        match &self.summary {
            Some(s) => {
                record.push(s.total_enrollments.to_string());
                record.push(s.started_count.to_string());
                record.push(render_rate(s.started_rate));
                record.push(s.completed_count.to_string());
                record.push(render_rate(s.completed_rate));
            }
            None => {
                for _ in 0..5 {
                    record.push(NOT_AVAILABLE.to_string());
                }
            }
        }

        record
    }
}

fn render_rate(rate: Option<f64>) -> String {
    match rate {
        Some(v) => format!("{v:.3}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Builds the full report: all courses in catalog order, each paired with
/// its enrollment summary.
///
/// A course-listing failure is fatal and nothing is written downstream. A
/// failure while summarizing a single course is logged and downgraded to a
/// sentinel row; the run continues with the remaining courses. There are no
/// retries in either case.
#[tracing::instrument(skip(api))]
pub async fn build_report<A: CourseApi>(api: &A) -> Result<Vec<ReportRow>, ApiError> {
    let courses = list_all_courses(api).await?;
    info!(course_count = courses.len(), "Course list fetched");

    let mut rows = Vec::with_capacity(courses.len());
    for course in courses {
        let summary = match summarize_enrollments(api, course.id).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(
                    course_id = course.id,
                    course_name = %course.name,
                    error = %e,
                    "Enrollment summary unavailable, substituting sentinel row"
                );
                None
            }
        };
        rows.push(ReportRow { course, summary });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CoursePage, Enrollment, EnrollmentPage, PageMeta};
    use std::collections::HashMap;

    /// One-page catalog with per-course enrollment fixtures. Courses listed
    /// in `failing` return an error from the enrollments endpoint.
    struct StubApi {
        courses: Vec<Course>,
        enrollments: HashMap<u64, Vec<f64>>,
        failing: Vec<u64>,
    }

    #[async_trait::async_trait]
    impl CourseApi for StubApi {
        async fn course_page(&self, page: u32) -> Result<CoursePage, ApiError> {
            Ok(CoursePage {
                meta: PageMeta {
                    page,
                    number_of_pages: 1,
                },
                courses: self.courses.clone(),
            })
        }

        async fn enrollment_page(
            &self,
            course_id: u64,
            page: u32,
        ) -> Result<EnrollmentPage, ApiError> {
            if self.failing.contains(&course_id) {
                return Err(ApiError::Http {
                    status: reqwest::StatusCode::NOT_FOUND,
                    body: "no such course".to_string(),
                });
            }

            let enrollments = self.enrollments[&course_id]
                .iter()
                .map(|p| Enrollment { percent_complete: *p })
                .collect();
            Ok(EnrollmentPage {
                meta: PageMeta {
                    page,
                    number_of_pages: 1,
                },
                enrollments,
            })
        }
    }

    fn course(id: u64, name: &str) -> Course {
        Course {
            id,
            name: name.to_string(),
            heading_image_url: Some(format!("https://cdn.example.com/{id}.png")),
            is_published: true,
        }
    }

    #[tokio::test]
    async fn test_failing_course_gets_sentinel_row_others_survive() {
        let api = StubApi {
            courses: vec![course(1, "A"), course(2, "B")],
            enrollments: HashMap::from([(1, vec![0.0, 50.0, 100.0])]),
            failing: vec![2],
        };

        let rows = build_report(&api).await.unwrap();

        assert_eq!(rows.len(), 2);

        let a = rows[0].summary.as_ref().unwrap();
        assert_eq!(a.total_enrollments, 3);
        assert_eq!(a.started_count, 2);
        assert_eq!(a.completed_count, 1);

        assert_eq!(rows[1].summary, None);
        let record = rows[1].to_record();
        assert_eq!(&record[4..], &[NOT_AVAILABLE; 5].map(String::from));
    }

    #[tokio::test]
    async fn test_rows_follow_catalog_order() {
        let api = StubApi {
            courses: vec![course(30, "z"), course(10, "a"), course(20, "m")],
            enrollments: HashMap::from([(30, vec![]), (10, vec![]), (20, vec![])]),
            failing: vec![],
        };

        let rows = build_report(&api).await.unwrap();

        let ids: Vec<u64> = rows.iter().map(|r| r.course.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_report_is_idempotent_against_unchanged_upstream() {
        let api = StubApi {
            courses: vec![course(1, "A"), course(2, "B")],
            enrollments: HashMap::from([(1, vec![25.0, 100.0]), (2, vec![])]),
            failing: vec![],
        };

        let first = build_report(&api).await.unwrap();
        let second = build_report(&api).await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_record_rendering_with_summary() {
        let row = ReportRow {
            course: course(17, "Baking"),
            summary: Some(EnrollmentSummary::from_percentages(&[0.0, 50.0, 100.0])),
        };

        assert_eq!(
            row.to_record(),
            vec![
                "17",
                "https://cdn.example.com/17.png",
                "Baking",
                "true",
                "3",
                "2",
                "0.667",
                "1",
                "0.333",
            ]
        );
    }

    #[test]
    fn test_record_rendering_zero_enrollments() {
        let row = ReportRow {
            course: course(5, "Quiet"),
            summary: Some(EnrollmentSummary::from_percentages(&[])),
        };

        let record = row.to_record();
        assert_eq!(record[4], "0");
        assert_eq!(record[6], NOT_AVAILABLE);
        assert_eq!(record[8], NOT_AVAILABLE);
    }
}
