//! Fluent builder APIs for mock users.
//!
//! The [`UserBuilder`] walks the configured years and seasons, filling each
//! semester from a [`CoursePool`](crate::generators::CoursePool).

mod user;

pub use user::{Summary, UserBuilder};
