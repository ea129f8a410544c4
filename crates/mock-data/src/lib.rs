//! Mock data generation for scholarsphere.
//!
//! This crate builds one synthetic user with several years of semesters,
//! courses and assignments from a course catalog, for use as development and
//! test data.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mock_data::prelude::*;
//!
//! let catalog = CatalogLoader::load_file("course_descriptions.json")?;
//! let mut rng = rand::thread_rng();
//! let mut pool = CoursePool::new(CourseGenerator::new().generate_pool(&catalog, &mut rng)?)?;
//!
//! let user = UserBuilder::new()
//!     .with_years(2021..2025)
//!     .build(&mut pool, &mut rng)?;
//!
//! UserExporter::write_file("mock_user_data.json", &user)?;
//! println!("{}", Summary::of(&user));
//! ```

pub mod builders;
pub mod config;
pub mod errors;
pub mod export;
pub mod generators;
pub mod sources;

pub use errors::GenerateError;

// Re-export core types from the planner crate
pub use planner::{Assignment, Course, Semester, User};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{Summary, UserBuilder};
    pub use crate::config::{ConfigError, GenerateConfig, Identity};
    pub use crate::errors::GenerateError;
    pub use crate::export::{OutputError, UserExporter};
    pub use crate::generators::{
        AssignmentGenerator, CourseGenerator, CoursePool, Season, SemesterGenerator,
    };
    pub use crate::sources::{Catalog, CatalogEntry, CatalogError, CatalogLoader};
    pub use crate::{Assignment, Course, Semester, User};
}
