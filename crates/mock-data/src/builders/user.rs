//! Fluent builder for assembling a complete mock user.

use std::fmt;
use std::ops::Range;

use planner::User;
use rand::Rng;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::config::{DEFAULT_END_YEAR, DEFAULT_START_YEAR, GenerateConfig, Identity};
use crate::errors::GenerateError;
use crate::generators::{AssignmentGenerator, CoursePool, Season, SemesterGenerator};

/// Aggregate counts for a generated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub semester_count: usize,
    pub course_count: usize,
    pub total_credits: i64,
}

impl Summary {
    pub fn of(user: &User) -> Self {
        Self {
            semester_count: user.semesters().len(),
            course_count: user.courses().len(),
            total_credits: user.total_credit_hours(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Semesters: {}", self.semester_count)?;
        writeln!(f, "Total Courses: {}", self.course_count)?;
        write!(f, "Total Credits: {}", self.total_credits)
    }
}

/// Builder for a user with a full academic history.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = CoursePool::new(CourseGenerator::new().generate_pool(&catalog, &mut rng)?)?;
/// let user = UserBuilder::new()
///     .with_years(2021..2025)
///     .with_identity(Identity::default())
///     .build(&mut pool, &mut rng)?;
/// ```
pub struct UserBuilder {
    years: Range<i32>,
    seasons: Vec<Season>,
    identity: Identity,
    today: Option<Date>,
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UserBuilder {
    /// Creates a builder covering the default years and all seasons.
    pub fn new() -> Self {
        Self {
            years: DEFAULT_START_YEAR..DEFAULT_END_YEAR,
            seasons: Season::ALL.to_vec(),
            identity: Identity::default(),
            today: None,
        }
    }

    /// Creates a builder from a run configuration.
    pub fn from_config(config: &GenerateConfig) -> Self {
        Self::new()
            .with_years(config.years.clone())
            .with_identity(config.identity.clone())
    }

    /// Sets the academic years to generate, end exclusive.
    pub fn with_years(mut self, years: Range<i32>) -> Self {
        self.years = years;
        self
    }

    /// Sets the seasons generated within each year, in order.
    pub fn with_seasons(mut self, seasons: Vec<Season>) -> Self {
        self.seasons = seasons;
        self
    }

    /// Sets the identity of the generated user.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Fixes the date used to decide which assignments can be completed.
    ///
    /// Defaults to the current UTC date.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Generates every semester in order, consuming courses from `pool`.
    pub fn build(&self, pool: &mut CoursePool, rng: &mut impl Rng) -> Result<User, GenerateError> {
        let today = self
            .today
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());
        let semester_gen = SemesterGenerator::with_assignments(AssignmentGenerator::as_of(today));

        let mut user = User::new(
            self.identity.email.clone(),
            self.identity.vanity_name.clone(),
            self.identity.avatar_url.clone(),
        )?;

        info!(
            "Generating {} semesters from a pool of {} courses",
            self.years.len() * self.seasons.len(),
            pool.len()
        );

        for year in self.years.clone() {
            for &season in &self.seasons {
                let (semester, courses) = semester_gen.generate(year, season, pool, rng)?;
                for course in courses {
                    user.add_course(course)?;
                }
                user.add_semester(semester)?;
            }
        }

        user.verify_links()?;
        info!(
            "Generated {} semesters, {} courses, {} courses left in pool",
            user.semesters().len(),
            user.courses().len(),
            pool.len()
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner::Course;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use time::macros::date;

    fn pool(count: usize) -> CoursePool {
        let courses = (0..count)
            .map(|i| {
                Course::new(
                    format!("Course {i}"),
                    format!("CSCI{}", 1000 + i),
                    Some("Description".to_string()),
                    Some(3),
                    Some(95.0),
                )
                .unwrap()
            })
            .collect();
        CoursePool::new(courses).unwrap()
    }

    #[test]
    fn test_build_covers_every_year_and_season() {
        let mut pool = pool(60);
        let mut rng = StdRng::seed_from_u64(42);
        let user = UserBuilder::new()
            .with_years(2021..2025)
            .with_today(date!(2026 - 10 - 16))
            .build(&mut pool, &mut rng)
            .unwrap();

        assert_eq!(user.semesters().len(), 12);
        assert!(user.courses().len() >= 4 * (4 + 1 + 4));
        assert!(user.courses().len() <= 4 * (6 + 2 + 6));
        assert_eq!(pool.len(), 60 - user.courses().len());
        assert_eq!(user.email(), "wm@uga.edu");
        assert_eq!(user.vanity_name(), Some("william"));
    }

    #[test]
    fn test_semesters_are_in_year_then_season_order() {
        let mut pool = pool(60);
        let mut rng = rand::thread_rng();
        let user = UserBuilder::new()
            .with_years(2022..2024)
            .build(&mut pool, &mut rng)
            .unwrap();

        let starts: Vec<Date> = user.semesters().iter().map(|s| s.start_date()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert_eq!(starts[0].year(), 2022);
        assert_eq!(starts[5].year(), 2023);
    }

    #[test]
    fn test_no_course_is_scheduled_twice() {
        let mut pool = pool(60);
        let mut rng = rand::thread_rng();
        let user = UserBuilder::new().build(&mut pool, &mut rng).unwrap();

        let mut seen = HashSet::new();
        for semester in user.semesters() {
            for id in semester.course_ids() {
                assert!(seen.insert(*id), "course {id} listed twice");
            }
        }
        assert_eq!(seen.len(), user.courses().len());
    }

    #[test]
    fn test_build_is_deterministic_for_a_seed() {
        let shape = |seed| {
            let mut pool = pool(60);
            let mut rng = StdRng::seed_from_u64(seed);
            let user = UserBuilder::new()
                .with_today(date!(2026 - 10 - 16))
                .build(&mut pool, &mut rng)
                .unwrap();
            user.semesters()
                .iter()
                .map(|s| (s.start_date(), s.end_date(), s.course_ids().len()))
                .collect::<Vec<_>>()
        };

        assert_eq!(shape(7), shape(7));
    }

    #[test]
    fn test_small_pool_is_exhausted() {
        let mut pool = pool(5);
        let mut rng = rand::thread_rng();
        let err = UserBuilder::new()
            .with_years(2021..2023)
            .build(&mut pool, &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerateError::PoolExhausted { .. }));
    }

    #[test]
    fn test_invalid_identity_fails_before_generation() {
        let mut pool = pool(60);
        let mut rng = rand::thread_rng();
        let err = UserBuilder::new()
            .with_identity(Identity {
                email: "not an email".to_string(),
                vanity_name: None,
                avatar_url: None,
            })
            .build(&mut pool, &mut rng)
            .unwrap_err();

        assert!(matches!(err, GenerateError::Validation(ref e) if e.has_field("email")));
        assert_eq!(pool.len(), 60);
    }

    #[test]
    fn test_summary_lines() {
        let mut pool = pool(60);
        let mut rng = rand::thread_rng();
        let user = UserBuilder::new()
            .with_years(2024..2025)
            .with_seasons(vec![Season::Summer])
            .build(&mut pool, &mut rng)
            .unwrap();

        let summary = Summary::of(&user);
        assert_eq!(summary.semester_count, 1);
        assert_eq!(summary.total_credits, 3 * summary.course_count as i64);

        let text = summary.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Total Semesters: 1");
        assert!(lines[1].starts_with("Total Courses: "));
        assert!(lines[2].starts_with("Total Credits: "));
    }
}
