//! Subject record store boundary.
//!
//! The course database lives outside this crate. [`SubjectStore`] is the
//! contract the planners' callers use to reach it; [`MemoryStore`] keeps
//! records in ordered maps for previews and tests.

use std::collections::BTreeMap;

use crate::error::{PlanError, Result};
use crate::models::Subject;

/// Create/read/update/delete over the subjects of each course.
pub trait SubjectStore {
    /// All subjects of a course, deleted ones included.
    fn list(&self, course_id: &str) -> Result<Vec<Subject>>;

    /// One subject by id.
    fn get(&self, course_id: &str, subject_id: &str) -> Result<Subject>;

    /// Stores a new subject. Fails if the id is taken.
    fn create(&mut self, course_id: &str, subject: Subject) -> Result<()>;

    /// Replaces an existing subject. Fails if the id is unknown.
    fn update(&mut self, course_id: &str, subject: Subject) -> Result<()>;

    /// Removes a subject. Fails if the id is unknown.
    fn delete(&mut self, course_id: &str, subject_id: &str) -> Result<()>;

    /// Whether a subject with this id exists.
    fn contains(&self, course_id: &str, subject_id: &str) -> Result<bool> {
        match self.get(course_id, subject_id) {
            Ok(_) => Ok(true),
            Err(PlanError::SubjectNotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// In-memory [`SubjectStore`], ordered by course then subject id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    courses: BTreeMap<String, BTreeMap<String, Subject>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subjects held for a course.
    pub fn subject_count(&self, course_id: &str) -> usize {
        self.courses.get(course_id).map_or(0, BTreeMap::len)
    }

    fn not_found(course_id: &str, subject_id: &str) -> PlanError {
        PlanError::SubjectNotFound {
            course_id: course_id.to_string(),
            subject_id: subject_id.to_string(),
        }
    }
}

impl SubjectStore for MemoryStore {
    fn list(&self, course_id: &str) -> Result<Vec<Subject>> {
        Ok(self
            .courses
            .get(course_id)
            .map(|subjects| subjects.values().cloned().collect())
            .unwrap_or_default())
    }

    fn get(&self, course_id: &str, subject_id: &str) -> Result<Subject> {
        self.courses
            .get(course_id)
            .and_then(|subjects| subjects.get(subject_id))
            .cloned()
            .ok_or_else(|| Self::not_found(course_id, subject_id))
    }

    fn create(&mut self, course_id: &str, subject: Subject) -> Result<()> {
        let subjects = self.courses.entry(course_id.to_string()).or_default();
        if subjects.contains_key(&subject.id) {
            return Err(PlanError::DuplicateSubject {
                course_id: course_id.to_string(),
                subject_id: subject.id,
            });
        }
        subjects.insert(subject.id.clone(), subject);
        Ok(())
    }

    fn update(&mut self, course_id: &str, subject: Subject) -> Result<()> {
        let slot = self
            .courses
            .get_mut(course_id)
            .and_then(|subjects| subjects.get_mut(&subject.id))
            .ok_or_else(|| Self::not_found(course_id, &subject.id))?;
        *slot = subject;
        Ok(())
    }

    fn delete(&mut self, course_id: &str, subject_id: &str) -> Result<()> {
        self.courses
            .get_mut(course_id)
            .and_then(|subjects| subjects.remove(subject_id))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(course_id, subject_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectType;

    fn subject(id: &str) -> Subject {
        Subject::new(id, format!("Subject {id}"), SubjectType::Lecture)
    }

    #[test]
    fn test_create_and_list() {
        let mut store = MemoryStore::new();
        store.create("c1", subject("b")).unwrap();
        store.create("c1", subject("a")).unwrap();
        store.create("c2", subject("z")).unwrap();

        let ids: Vec<String> = store.list("c1").unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.subject_count("c2"), 1);
        assert!(store.list("missing").unwrap().is_empty());
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let mut store = MemoryStore::new();
        store.create("c1", subject("a")).unwrap();
        let err = store.create("c1", subject("a")).unwrap_err();
        assert!(matches!(err, PlanError::DuplicateSubject { .. }));
    }

    #[test]
    fn test_update_and_get() {
        let mut store = MemoryStore::new();
        store.create("c1", subject("a")).unwrap();
        let mut edited = subject("a");
        edited.name = "Renamed".into();
        store.update("c1", edited).unwrap();
        assert_eq!(store.get("c1", "a").unwrap().name, "Renamed");
        assert!(store.update("c1", subject("x")).is_err());
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        store.create("c1", subject("a")).unwrap();
        assert!(store.contains("c1", "a").unwrap());
        store.delete("c1", "a").unwrap();
        assert!(!store.contains("c1", "a").unwrap());
        let err = store.delete("c1", "a").unwrap_err();
        assert_eq!(err.to_string(), "subject 'a' not found in course 'c1'");
    }
}
