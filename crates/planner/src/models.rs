//! Planner entities.
//!
//! Every constructor validates its input and every mutation that could break a
//! size limit checks it first, so a value of these types always satisfies its
//! field constraints. Deserialized values are the exception; run
//! [`User::check`] on anything read from outside.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{LinkError, ModelError, ValidationError};

// Lengths and counts are u64 because that is what `validator` measures in.
pub const MIN_VANITY_NAME_LENGTH: u64 = 2;
pub const MAX_VANITY_NAME_LENGTH: u64 = 32;
pub const MAX_COURSE_TITLE_LENGTH: u64 = 128;
pub const MAX_COURSE_DESCRIPTION_LENGTH: u64 = 1024;
pub const MAX_SEMESTER_CUSTOM_NAME_LENGTH: u64 = 128;
pub const MAX_ASSIGNMENT_TITLE_LENGTH: u64 = 128;
pub const MAX_SHORT_ID_LENGTH: u64 = 32;
pub const MAX_COURSES_PER_SEMESTER: u64 = 16;
pub const MAX_ASSIGNMENTS_PER_COURSE: u64 = 512;
pub const MAX_COURSES_PER_USER: u64 = 128;
pub const MAX_SEMESTERS_PER_USER: u64 = 32;
pub const MIN_CREDIT_HOURS: i32 = 0;
pub const MAX_CREDIT_HOURS: i32 = 16;
pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Produces the identifier for a new entity.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

fn checked<T: Validate>(entity: &'static str, value: T) -> Result<T, ValidationError> {
    value
        .validate()
        .map_err(|e| ValidationError::from_validator(entity, &e))?;
    Ok(value)
}

/// A piece of coursework with a due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Assignment {
    id: Uuid,
    #[validate(length(
        max = MAX_ASSIGNMENT_TITLE_LENGTH,
        message = "must be at most 128 characters"
    ))]
    title: String,
    #[serde(with = "iso_date")]
    due_date: Date,
    #[serde(default)]
    completed: bool,
}

impl Assignment {
    pub fn new(
        title: impl Into<String>,
        due_date: Date,
        completed: bool,
    ) -> Result<Self, ValidationError> {
        checked(
            "assignment",
            Self {
                id: new_id(),
                title: title.into(),
                due_date,
                completed,
            },
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn due_date(&self) -> Date {
        self.due_date
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

/// A course taken by the user, optionally placed in a semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Course {
    id: Uuid,
    #[validate(length(max = MAX_COURSE_TITLE_LENGTH, message = "must be at most 128 characters"))]
    title: String,
    #[validate(range(
        min = MIN_CREDIT_HOURS,
        max = MAX_CREDIT_HOURS,
        message = "must be between 0 and 16"
    ))]
    credit_hours: Option<i32>,
    #[validate(length(max = MAX_SHORT_ID_LENGTH, message = "must be at most 32 characters"))]
    short_id: String,
    #[validate(length(
        max = MAX_COURSE_DESCRIPTION_LENGTH,
        message = "must be at most 1024 characters"
    ))]
    description: Option<String>,
    #[validate(
        length(
            max = MAX_ASSIGNMENTS_PER_COURSE,
            message = "must hold at most 512 assignments"
        ),
        nested
    )]
    #[serde(default)]
    assignments: Vec<Assignment>,
    #[serde(rename = "connected_semester_id", default)]
    semester_id: Option<Uuid>,
    #[validate(
        range(min = MIN_GRADE, max = MAX_GRADE, message = "must be between 0 and 100"),
        custom(function = "validate_grade", message = "must be a number")
    )]
    grade: Option<f64>,
}

// NaN slips through `range`, which only rejects values it can compare.
fn validate_grade(grade: f64) -> Result<(), validator::ValidationError> {
    if grade.is_finite() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("finite"))
    }
}

impl Course {
    pub fn new(
        title: impl Into<String>,
        short_id: impl Into<String>,
        description: Option<String>,
        credit_hours: Option<i32>,
        grade: Option<f64>,
    ) -> Result<Self, ValidationError> {
        checked(
            "course",
            Self {
                id: new_id(),
                title: title.into(),
                credit_hours,
                short_id: short_id.into(),
                description,
                assignments: Vec::new(),
                semester_id: None,
                grade,
            },
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn credit_hours(&self) -> Option<i32> {
        self.credit_hours
    }

    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn semester_id(&self) -> Option<Uuid> {
        self.semester_id
    }

    pub fn grade(&self) -> Option<f64> {
        self.grade
    }

    /// Appends an assignment, refusing to grow past the per-course limit.
    pub fn attach_assignment(&mut self, assignment: Assignment) -> Result<(), ValidationError> {
        if self.assignments.len() as u64 >= MAX_ASSIGNMENTS_PER_COURSE {
            return Err(ValidationError::capacity(
                "course",
                "assignments",
                MAX_ASSIGNMENTS_PER_COURSE,
            ));
        }
        self.assignments.push(assignment);
        Ok(())
    }
}

/// A dated term. Courses are referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_window"))]
pub struct Semester {
    id: Uuid,
    #[serde(with = "iso_date")]
    start_date: Date,
    #[serde(with = "iso_date")]
    end_date: Date,
    #[validate(length(
        max = MAX_SEMESTER_CUSTOM_NAME_LENGTH,
        message = "must be at most 128 characters"
    ))]
    custom_name: Option<String>,
    #[validate(length(
        max = MAX_COURSES_PER_SEMESTER,
        message = "must reference at most 16 courses"
    ))]
    #[serde(rename = "connected_course_ids", default)]
    course_ids: Vec<Uuid>,
}

fn validate_window(semester: &Semester) -> Result<(), validator::ValidationError> {
    if semester.start_date > semester.end_date {
        let mut err = validator::ValidationError::new("window");
        err.message = Some("start date must not be after end date".into());
        return Err(err);
    }
    Ok(())
}

impl Semester {
    pub fn new(
        start_date: Date,
        end_date: Date,
        custom_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        checked(
            "semester",
            Self {
                id: new_id(),
                start_date,
                end_date,
                custom_name,
                course_ids: Vec::new(),
            },
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn start_date(&self) -> Date {
        self.start_date
    }

    pub fn end_date(&self) -> Date {
        self.end_date
    }

    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    pub fn course_ids(&self) -> &[Uuid] {
        &self.course_ids
    }

    /// Whole days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).whole_days()
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.start_date..=self.end_date).contains(&date)
    }

    /// Links `course` to this semester in both directions.
    pub fn enroll(&mut self, course: &mut Course) -> Result<(), ModelError> {
        if let Some(semester) = course.semester_id {
            return Err(LinkError::AlreadyLinked {
                course: course.id,
                semester,
            }
            .into());
        }
        if self.course_ids.len() as u64 >= MAX_COURSES_PER_SEMESTER {
            return Err(ValidationError::capacity(
                "semester",
                "course_ids",
                MAX_COURSES_PER_SEMESTER,
            )
            .into());
        }

        self.course_ids.push(course.id);
        course.semester_id = Some(self.id);
        Ok(())
    }
}

/// The root aggregate: one student and everything they planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    id: Uuid,
    #[validate(email(message = "must be a valid email address"))]
    email: String,
    #[validate(url(message = "must be a valid URL"))]
    avatar_url: Option<String>,
    #[validate(length(
        min = MIN_VANITY_NAME_LENGTH,
        max = MAX_VANITY_NAME_LENGTH,
        message = "must be between 2 and 32 characters"
    ))]
    vanity_name: Option<String>,
    #[validate(
        length(max = MAX_SEMESTERS_PER_USER, message = "must hold at most 32 semesters"),
        nested
    )]
    #[serde(default)]
    semesters: Vec<Semester>,
    #[validate(
        length(max = MAX_COURSES_PER_USER, message = "must hold at most 128 courses"),
        nested
    )]
    #[serde(default)]
    courses: Vec<Course>,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        vanity_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        checked(
            "user",
            Self {
                id: new_id(),
                email: email.into(),
                avatar_url,
                vanity_name,
                semesters: Vec::new(),
                courses: Vec::new(),
            },
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn vanity_name(&self) -> Option<&str> {
        self.vanity_name.as_deref()
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn add_semester(&mut self, semester: Semester) -> Result<(), ValidationError> {
        if self.semesters.len() as u64 >= MAX_SEMESTERS_PER_USER {
            return Err(ValidationError::capacity(
                "user",
                "semesters",
                MAX_SEMESTERS_PER_USER,
            ));
        }
        self.semesters.push(semester);
        Ok(())
    }

    pub fn add_course(&mut self, course: Course) -> Result<(), ValidationError> {
        if self.courses.len() as u64 >= MAX_COURSES_PER_USER {
            return Err(ValidationError::capacity(
                "user",
                "courses",
                MAX_COURSES_PER_USER,
            ));
        }
        self.courses.push(course);
        Ok(())
    }

    /// Sum of credit hours across all courses; courses without hours count as zero.
    pub fn total_credit_hours(&self) -> i64 {
        self.courses
            .iter()
            .filter_map(Course::credit_hours)
            .map(i64::from)
            .sum()
    }

    /// Re-runs every field constraint on the whole graph.
    pub fn check(&self) -> Result<(), ValidationError> {
        self.validate()
            .map_err(|e| ValidationError::from_validator("user", &e))
    }

    /// Checks that semester and course links agree in both directions, that no
    /// course sits in two semesters, and that every assignment falls inside
    /// its course's semester.
    pub fn verify_links(&self) -> Result<(), LinkError> {
        let semesters: HashMap<Uuid, &Semester> =
            self.semesters.iter().map(|s| (s.id, s)).collect();
        let courses: HashMap<Uuid, &Course> = self.courses.iter().map(|c| (c.id, c)).collect();
        let mut listed = HashSet::new();

        for semester in &self.semesters {
            for &course_id in &semester.course_ids {
                if !listed.insert(course_id) {
                    return Err(LinkError::DuplicateListing { course: course_id });
                }
                let course = courses.get(&course_id).ok_or(LinkError::UnknownCourse {
                    semester: semester.id,
                    course: course_id,
                })?;
                if course.semester_id != Some(semester.id) {
                    return Err(LinkError::Mismatched {
                        semester: semester.id,
                        course: course_id,
                        linked: course.semester_id,
                    });
                }
            }
        }

        for course in &self.courses {
            let Some(semester_id) = course.semester_id else {
                continue;
            };
            let semester = semesters
                .get(&semester_id)
                .ok_or(LinkError::UnknownSemester {
                    course: course.id,
                    semester: semester_id,
                })?;
            if !semester.course_ids.contains(&course.id) {
                return Err(LinkError::NotListed {
                    course: course.id,
                    semester: semester_id,
                });
            }
            if let Some(stray) = course
                .assignments
                .iter()
                .find(|a| !semester.contains(a.due_date))
            {
                return Err(LinkError::DueDateOutOfRange {
                    assignment: stray.id,
                    due: stray.due_date,
                    start: semester.start_date,
                    end: semester.end_date,
                });
            }
        }

        Ok(())
    }
}
