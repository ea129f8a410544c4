//! Entity generators for mock data.
//!
//! This module provides generators for the pieces of a user's schedule:
//! - [`CourseGenerator`]: Turn catalog entries into graded, unscheduled courses
//! - [`CoursePool`]: Hand out courses in course-number order
//! - [`SemesterGenerator`]: Draw a season's window and fill it from the pool
//! - [`AssignmentGenerator`]: Spread assignments across a semester

pub mod assignment;
pub mod course;
pub mod semester;

pub use assignment::{ASSIGNMENT_TITLES, AssignmentGenerator};
pub use course::{CourseGenerator, CoursePool, course_number};
pub use semester::{Season, SeasonPolicy, SemesterGenerator, SemesterWindow};
