use thiserror::Error;
use time::Date;
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path to the field, e.g. `assignments[3].title`.
    pub field: String,
    pub message: String,
}

/// An entity failed one or more of its field constraints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {entity}: {}", describe(.violations))]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Flattens validator output into one violation per field, sorted by path.
    pub fn from_validator(entity: &'static str, errors: &ValidationErrors) -> Self {
        let mut violations = Vec::new();
        collect_violations("", errors, &mut violations);
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self { entity, violations }
    }

    /// A collection on `entity` is already holding `max` items.
    pub fn capacity(entity: &'static str, field: &str, max: u64) -> Self {
        Self {
            entity,
            violations: vec![FieldViolation {
                field: field.to_string(),
                message: format!("cannot hold more than {max} items"),
            }],
        }
    }

    /// Returns true if `field` is among the violated fields.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn collect_violations(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| FieldViolation {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_violations(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_violations(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A broken link between semesters, courses and assignments of one user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("course {course} is already linked to semester {semester}")]
    AlreadyLinked { course: Uuid, semester: Uuid },

    #[error("course {course} appears in more than one semester")]
    DuplicateListing { course: Uuid },

    #[error("semester {semester} lists unknown course {course}")]
    UnknownCourse { semester: Uuid, course: Uuid },

    #[error("semester {semester} lists course {course}, which links to {linked:?}")]
    Mismatched {
        semester: Uuid,
        course: Uuid,
        linked: Option<Uuid>,
    },

    #[error("course {course} links to unknown semester {semester}")]
    UnknownSemester { course: Uuid, semester: Uuid },

    #[error("course {course} links to semester {semester}, which does not list it")]
    NotListed { course: Uuid, semester: Uuid },

    #[error("assignment {assignment} is due {due}, outside {start}..={end}")]
    DueDateOutOfRange {
        assignment: Uuid,
        due: Date,
        start: Date,
        end: Date,
    },
}

/// Errors raised while mutating the model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Link(#[from] LinkError),
}
