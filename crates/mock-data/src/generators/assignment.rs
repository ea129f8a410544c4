//! Assignment generation over a semester's date window.

use planner::{Assignment, Semester, ValidationError};
use rand::Rng;
use time::{Date, Duration, OffsetDateTime};

/// Titles handed out to generated assignments.
pub const ASSIGNMENT_TITLES: [&str; 12] = [
    "Homework",
    "Quiz",
    "Test",
    "Exam",
    "Project",
    "Paper",
    "Essay",
    "Lab",
    "Discussion",
    "Reading",
    "Presentation",
    "Final",
];

/// Average number of days between two assignments of a course.
const DAYS_PER_ASSIGNMENT: f64 = 3.5;

/// Maximum deviation from the average assignment count.
const COUNT_JITTER: i64 = 5;

/// An assignment due by today is marked completed when a uniform draw exceeds this.
const COMPLETION_THRESHOLD: f64 = 0.3;

/// Generates assignments for a course within its semester.
pub struct AssignmentGenerator {
    /// Assignments due on or before this date may be completed.
    today: Date,
}

impl AssignmentGenerator {
    /// Creates a generator that treats the current UTC date as today.
    pub fn new() -> Self {
        Self::as_of(OffsetDateTime::now_utc().date())
    }

    /// Creates a generator with a fixed notion of today.
    pub fn as_of(today: Date) -> Self {
        Self { today }
    }

    /// Number of assignments for a semester spanning `span_days`.
    ///
    /// One assignment every 3.5 days, give or take up to five, never negative.
    pub fn count_for_span(span_days: i64, rng: &mut impl Rng) -> usize {
        let jitter = rng.gen_range(-COUNT_JITTER..=COUNT_JITTER);
        let count = (span_days as f64 / DAYS_PER_ASSIGNMENT + jitter as f64).trunc();
        count.max(0.0) as usize
    }

    /// Generates one assignment due somewhere in `semester`.
    pub fn generate(
        &self,
        semester: &Semester,
        rng: &mut impl Rng,
    ) -> Result<Assignment, ValidationError> {
        let offset = rng.gen_range(0..=semester.span_days());
        let due_date = semester.start_date() + Duration::days(offset);
        let completed = rng.r#gen::<f64>() > COMPLETION_THRESHOLD && due_date <= self.today;
        let title = ASSIGNMENT_TITLES[rng.gen_range(0..ASSIGNMENT_TITLES.len())];

        Assignment::new(title, due_date, completed)
    }

    /// Generates a plausible workload for one course in `semester`.
    pub fn generate_for(
        &self,
        semester: &Semester,
        rng: &mut impl Rng,
    ) -> Result<Vec<Assignment>, ValidationError> {
        let count = Self::count_for_span(semester.span_days(), rng);
        (0..count).map(|_| self.generate(semester, rng)).collect()
    }
}

impl Default for AssignmentGenerator {
    fn default() -> Self {
        Self::new()
    }
}
