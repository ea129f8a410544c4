//! JSON export of generated users.

use std::path::{Path, PathBuf};

use planner::{LinkError, User, ValidationError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize user: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("user document parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("user document is inconsistent: {0}")]
    Links(#[from] LinkError),
}

/// Reads and writes users as pretty-printed JSON with every semester, course
/// and assignment embedded.
pub struct UserExporter;

impl UserExporter {
    pub fn to_json(user: &User) -> Result<String, OutputError> {
        serde_json::to_string_pretty(user).map_err(OutputError::Serialize)
    }

    /// Parses a user document and re-checks its constraints and links.
    pub fn from_json(json: &str) -> Result<User, OutputError> {
        let user: User = serde_json::from_str(json).map_err(OutputError::Parse)?;
        user.check()?;
        user.verify_links()?;
        Ok(user)
    }

    pub fn write_file(path: impl AsRef<Path>, user: &User) -> Result<(), OutputError> {
        let path = path.as_ref();
        let json = Self::to_json(user)?;
        std::fs::write(path, json).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Wrote user {} to {}", user.id(), path.display());
        Ok(())
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<User, OutputError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| OutputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner::{Assignment, Course, Semester};
    use time::macros::date;

    fn user() -> User {
        let mut user = User::new("wm@uga.edu", Some("william".to_string()), None).unwrap();
        let mut semester = Semester::new(date!(2023 - 08 - 05), date!(2023 - 11 - 25), None).unwrap();
        let mut course = Course::new(
            "Data Structures",
            "CSCI2720",
            Some("Lists, trees and graphs".to_string()),
            Some(3),
            Some(97.25),
        )
        .unwrap();
        course
            .attach_assignment(Assignment::new("Project", date!(2023 - 10 - 01), true).unwrap())
            .unwrap();
        semester.enroll(&mut course).unwrap();
        user.add_semester(semester).unwrap();
        user.add_course(course).unwrap();
        user
    }

    #[test]
    fn test_document_embeds_full_graph() {
        let json = UserExporter::to_json(&user()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let course = &value["courses"][0];
        assert_eq!(course["short_id"], "CSCI2720");
        assert_eq!(course["assignments"][0]["title"], "Project");
        assert_eq!(course["assignments"][0]["due_date"], "2023-10-01");
        assert_eq!(course["assignments"][0]["completed"], true);
        assert_eq!(
            course["connected_semester_id"],
            value["semesters"][0]["id"]
        );
        assert_eq!(
            value["semesters"][0]["connected_course_ids"][0],
            course["id"]
        );
    }

    #[test]
    fn test_file_round_trip() {
        let user = user();
        let path = std::env::temp_dir().join(format!("mock-user-{}.json", user.id()));

        UserExporter::write_file(&path, &user).unwrap();
        let loaded = UserExporter::load_file(&path).unwrap();
        assert_eq!(loaded, user);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("mock-data-no-such-dir")
            .join("nested")
            .join("user.json");
        let err = UserExporter::write_file(&path, &user()).unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
    }

    #[test]
    fn test_inconsistent_document_is_rejected() {
        let json = UserExporter::to_json(&user()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["semesters"][0]["connected_course_ids"] = serde_json::json!([]);

        let err = UserExporter::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, OutputError::Links(LinkError::NotListed { .. })));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = UserExporter::from_json("{\"email\": 3}").unwrap_err();
        assert!(matches!(err, OutputError::Parse(_)));
    }
}
