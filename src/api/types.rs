//! Wire types for the Teachable Developer API.
//!
//! Deserialization doubles as validation: `meta` and the payload arrays are
//! required fields, so a response missing them fails with a parse error
//! instead of surfacing later as a phantom empty page. Extra fields the API
//! sends are ignored.

use serde::Deserialize;

/// Pagination metadata carried by every list response.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u32,
    pub number_of_pages: u32,
}

/// One page of the `courses` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CoursePage {
    pub meta: PageMeta,
    pub courses: Vec<Course>,
}

/// A single course as reported by the catalog.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Course {
    pub id: u64,
    pub name: String,
    /// Wire field `image_url`; absent for courses without a heading image.
    #[serde(rename = "image_url")]
    pub heading_image_url: Option<String>,
    pub is_published: bool,
}

/// One page of the `courses/<id>/enrollments` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentPage {
    pub meta: PageMeta,
    pub enrollments: Vec<Enrollment>,
}

/// A single user's registration in a course.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Enrollment {
    /// Progress through the course content, 0-100. The platform caps this
    /// at 100, so "completed" can be tested with exact equality.
    pub percent_complete: f64,
}
