pub mod api;
pub mod courses;
pub mod enrollments;
pub mod fetch;
pub mod output;
pub mod report;
