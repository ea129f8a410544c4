//! Semester generation: season windows and course placement.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use planner::{Course, Semester};
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};
use tracing::debug;

use crate::errors::GenerateError;
use crate::generators::assignment::AssignmentGenerator;
use crate::generators::course::CoursePool;

/// Academic terms, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Spring, Season::Summer, Season::Fall];

    /// Date window and course load for this season.
    pub fn policy(self) -> SeasonPolicy {
        match self {
            Season::Spring => SeasonPolicy {
                start_month: Month::January,
                start_day: 5,
                start_jitter_days: 0..=5,
                span_days: 105..=115,
                course_count: 4..=6,
            },
            Season::Summer => SeasonPolicy {
                start_month: Month::June,
                start_day: 2,
                start_jitter_days: 0..=5,
                span_days: 45..=50,
                course_count: 1..=2,
            },
            Season::Fall => SeasonPolicy {
                start_month: Month::August,
                start_day: 3,
                start_jitter_days: 0..=5,
                span_days: 105..=115,
                course_count: 4..=6,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" => Ok(Season::Fall),
            other => Err(GenerateError::UnknownSeason(other.to_string())),
        }
    }
}

/// Scheduling rules for one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonPolicy {
    pub start_month: Month,
    pub start_day: u8,
    /// Days added to the nominal start date.
    pub start_jitter_days: RangeInclusive<i64>,
    /// Days from start to end.
    pub span_days: RangeInclusive<i64>,
    /// Number of courses taken.
    pub course_count: RangeInclusive<usize>,
}

/// A drawn semester window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterWindow {
    pub start: Date,
    pub end: Date,
    pub course_count: usize,
}

impl SeasonPolicy {
    /// Draws a concrete window for `year`.
    pub fn draw(&self, year: i32, rng: &mut impl Rng) -> Result<SemesterWindow, GenerateError> {
        let nominal = Date::from_calendar_date(year, self.start_month, self.start_day)?;
        let start = nominal + Duration::days(rng.gen_range(self.start_jitter_days.clone()));
        let end = start + Duration::days(rng.gen_range(self.span_days.clone()));
        let course_count = rng.gen_range(self.course_count.clone());

        Ok(SemesterWindow {
            start,
            end,
            course_count,
        })
    }
}

/// Generates semesters and fills them from the course pool.
pub struct SemesterGenerator {
    assignments: AssignmentGenerator,
}

impl SemesterGenerator {
    pub fn new() -> Self {
        Self::with_assignments(AssignmentGenerator::new())
    }

    pub fn with_assignments(assignments: AssignmentGenerator) -> Self {
        Self { assignments }
    }

    /// Generates the semester for `season` of `year`.
    ///
    /// Takes the drawn number of courses from `pool`, gives each a workload of
    /// assignments and links them to the semester. Returns the semester and
    /// the courses placed in it.
    pub fn generate(
        &self,
        year: i32,
        season: Season,
        pool: &mut CoursePool,
        rng: &mut impl Rng,
    ) -> Result<(Semester, Vec<Course>), GenerateError> {
        let window = season.policy().draw(year, rng)?;
        let mut semester = Semester::new(window.start, window.end, None)?;
        let mut courses = pool.take(window.course_count)?;

        for course in &mut courses {
            for assignment in self.assignments.generate_for(&semester, rng)? {
                course.attach_assignment(assignment)?;
            }
            semester.enroll(course)?;
        }

        debug!(
            "{season} {year}: {} to {}, {} courses",
            semester.start_date(),
            semester.end_date(),
            courses.len()
        );
        Ok((semester, courses))
    }
}

impl Default for SemesterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    fn pool(count: usize) -> CoursePool {
        let courses = (0..count)
            .map(|i| Course::new("Title", format!("CSCI{}", 1000 + i), None, Some(3), None).unwrap())
            .collect();
        CoursePool::new(courses).unwrap()
    }

    #[test]
    fn test_season_parsing() {
        assert_eq!("spring".parse::<Season>().unwrap(), Season::Spring);
        assert_eq!("summer".parse::<Season>().unwrap(), Season::Summer);
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Fall);

        let err = "winter".parse::<Season>().unwrap_err();
        assert!(matches!(err, GenerateError::UnknownSeason(ref s) if s == "winter"));
        assert!("Spring".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_round_trips_through_display() {
        for season in Season::ALL {
            assert_eq!(season.to_string().parse::<Season>().unwrap(), season);
        }
    }

    #[test]
    fn test_spring_window() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let window = Season::Spring.policy().draw(2024, &mut rng).unwrap();
            assert!(window.start >= date!(2024 - 01 - 05));
            assert!(window.start <= date!(2024 - 01 - 10));
            let span = (window.end - window.start).whole_days();
            assert!((105..=115).contains(&span), "span {span}");
            assert!((4..=6).contains(&window.course_count));
        }
    }

    #[test]
    fn test_summer_and_fall_windows() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let summer = Season::Summer.policy().draw(2022, &mut rng).unwrap();
            assert!(summer.start >= date!(2022 - 06 - 02));
            assert!(summer.start <= date!(2022 - 06 - 07));
            assert!((45..=50).contains(&(summer.end - summer.start).whole_days()));
            assert!((1..=2).contains(&summer.course_count));

            let fall = Season::Fall.policy().draw(2022, &mut rng).unwrap();
            assert!(fall.start >= date!(2022 - 08 - 03));
            assert!(fall.start <= date!(2022 - 08 - 08));
            assert!((105..=115).contains(&(fall.end - fall.start).whole_days()));
            assert!((4..=6).contains(&fall.course_count));
        }
    }

    #[test]
    fn test_generate_links_courses_and_semester() {
        let semester_gen = SemesterGenerator::with_assignments(AssignmentGenerator::as_of(
            date!(2030 - 01 - 01),
        ));
        let mut pool = pool(10);
        let mut rng = StdRng::seed_from_u64(5);

        let (semester, courses) = semester_gen
            .generate(2024, Season::Fall, &mut pool, &mut rng)
            .unwrap();

        assert!((4..=6).contains(&courses.len()));
        assert_eq!(pool.len(), 10 - courses.len());
        let ids: Vec<_> = courses.iter().map(Course::id).collect();
        assert_eq!(semester.course_ids(), ids.as_slice());

        for course in &courses {
            assert_eq!(course.semester_id(), Some(semester.id()));
            assert!(!course.assignments().is_empty());
            for a in course.assignments() {
                assert!(semester.contains(a.due_date()));
            }
        }
    }

    #[test]
    fn test_generate_takes_lowest_numbered_courses() {
        let semester_gen = SemesterGenerator::new();
        let mut pool = pool(10);
        let mut rng = rand::thread_rng();

        let (_, courses) = semester_gen
            .generate(2023, Season::Summer, &mut pool, &mut rng)
            .unwrap();

        let codes: Vec<&str> = courses.iter().map(Course::short_id).collect();
        assert_eq!(codes[0], "CSCI1000");
        if codes.len() == 2 {
            assert_eq!(codes[1], "CSCI1001");
        }
    }

    #[test]
    fn test_empty_pool_is_exhausted() {
        let semester_gen = SemesterGenerator::new();
        let mut pool = pool(0);
        let mut rng = rand::thread_rng();

        let err = semester_gen
            .generate(2024, Season::Summer, &mut pool, &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerateError::PoolExhausted { available: 0, .. }));
    }
}
