//! Course catalog listing.

use tracing::debug;

use crate::api::{ApiError, Course, CourseApi};

/// Collects every page of the course catalog into a flat list, preserving
/// the API's native order.
///
/// Page 1 is fetched once to learn the total page count; pages
/// `2..=number_of_pages` follow in order, so the call count equals the page
/// count exactly. Any page failure fails the whole listing: a partial course
/// list cannot guarantee pagination continuity, so there is no fallback.
pub async fn list_all_courses<A: CourseApi>(api: &A) -> Result<Vec<Course>, ApiError> {
    let first = api.course_page(1).await?;
    let total_pages = first.meta.number_of_pages;
    debug!(total_pages, "Course list page count");

    let mut courses = first.courses;
    for page in 2..=total_pages {
        let next = api.course_page(page).await?;
        courses.extend(next.courses);
    }

    Ok(courses)
}
