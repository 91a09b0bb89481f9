//! Typed client for the Teachable Developer API.
//!
//! The wire protocol is paginated JSON: every response carries a `meta`
//! object with the current page and the total page count, plus a payload
//! array (`courses` or `enrollments`). [`CourseApi`] is the seam the rest of
//! the crate programs against; [`TeachableClient`] is the HTTP-backed
//! implementation.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, TeachableClient};
pub use error::ApiError;
pub use types::{Course, CoursePage, Enrollment, EnrollmentPage, PageMeta};

/// Abstraction over the paginated course/enrollment API.
#[async_trait::async_trait]
pub trait CourseApi {
    /// Fetches one page (1-based) of the course catalog.
    async fn course_page(&self, page: u32) -> Result<CoursePage, ApiError>;

    /// Fetches one page (1-based) of a single course's enrollments.
    async fn enrollment_page(
        &self,
        course_id: u64,
        page: u32,
    ) -> Result<EnrollmentPage, ApiError>;
}
