//! Domain model for the academic planner.
//!
//! A [`User`] owns its [`Semester`]s and [`Course`]s; semesters reference
//! courses by id and each course points back at the semester it belongs to.
//! Assignments are owned by their course.

pub mod errors;
pub mod models;

pub use errors::{FieldViolation, LinkError, ModelError, ValidationError};
pub use models::{Assignment, Course, Semester, User, new_id};
