//! Course pool construction from the catalog.

use planner::{Course, ValidationError};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::debug;

use crate::errors::GenerateError;
use crate::sources::{Catalog, CatalogEntry};

/// Generates unscheduled courses from catalog entries.
pub struct CourseGenerator {
    grade: Uniform<f64>,
}

impl CourseGenerator {
    /// Creates a generator that hands out grades between 90 and 100.
    pub fn new() -> Self {
        Self {
            grade: Uniform::new_inclusive(90.0, 100.0),
        }
    }

    /// Creates a course for one catalog entry, with no semester or assignments.
    pub fn from_entry(
        &self,
        code: &str,
        entry: &CatalogEntry,
        rng: &mut impl Rng,
    ) -> Result<Course, ValidationError> {
        let grade = round_to_hundredths(self.grade.sample(rng));

        Course::new(
            entry.title.clone(),
            code,
            Some(entry.description.clone()),
            Some(entry.hours),
            Some(grade),
        )
    }

    /// Creates one course per catalog entry, in catalog order.
    pub fn generate_pool(
        &self,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<Vec<Course>, ValidationError> {
        catalog
            .iter()
            .map(|(code, entry)| self.from_entry(code, entry, rng))
            .collect()
    }
}

impl Default for CourseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extracts the course number from a short id by joining all of its digits.
pub fn course_number(short_id: &str) -> Result<u64, GenerateError> {
    let digits: String = short_id.chars().filter(char::is_ascii_digit).collect();
    digits
        .parse()
        .map_err(|_| GenerateError::NonNumericShortId(short_id.to_string()))
}

/// Courses not yet placed in a semester.
///
/// Kept sorted by descending course number and consumed from the back, so the
/// lowest-numbered courses are scheduled first.
#[derive(Debug, Default)]
pub struct CoursePool {
    courses: Vec<Course>,
}

impl CoursePool {
    pub fn new(courses: Vec<Course>) -> Result<Self, GenerateError> {
        let mut keyed = courses
            .into_iter()
            .map(|course| Ok((course_number(course.short_id())?, course)))
            .collect::<Result<Vec<_>, GenerateError>>()?;
        keyed.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(Self {
            courses: keyed.into_iter().map(|(_, course)| course).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The course that will be handed out next.
    pub fn peek(&self) -> Option<&Course> {
        self.courses.last()
    }

    /// Removes `count` courses from the pool, or none at all if it holds fewer.
    pub fn take(&mut self, count: usize) -> Result<Vec<Course>, GenerateError> {
        if count > self.courses.len() {
            return Err(GenerateError::PoolExhausted {
                needed: count,
                available: self.courses.len(),
            });
        }

        let taken: Vec<Course> = (0..count).filter_map(|_| self.courses.pop()).collect();
        debug!("Took {} courses, {} left in pool", taken.len(), self.courses.len());
        Ok(taken)
    }
}
