use crate::{
    data::student::{Student, StudentDetails, StudentFilter},
    error::{DuplicateStudentSnafu, RegistraResult},
    store::StudentStore,
};
use async_trait::async_trait;
use snafu::ensure;
use tokio::sync::RwLock;

/// Stand-in for the document store: a locked in-memory collection evaluated
/// with the same predicates the query pipeline is specified against. Used by
/// the test suite, and handy for running the app without a database.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(students: Vec<Student>) -> Self {
        Self {
            students: RwLock::new(students),
        }
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find(&self, filter: &StudentFilter) -> RegistraResult<Vec<Student>> {
        let students = self.students.read().await;
        Ok(students
            .iter()
            .filter(|student| filter.matches(student))
            .cloned()
            .collect())
    }

    async fn insert(&self, student: Student) -> RegistraResult<Student> {
        let mut students = self.students.write().await;
        ensure!(
            !students
                .iter()
                .any(|existing| existing.admin_number == student.admin_number),
            DuplicateStudentSnafu {
                admin_number: student.admin_number,
            }
        );
        students.push(student.clone());
        Ok(student)
    }

    async fn replace(
        &self,
        admin_number: &str,
        details: StudentDetails,
    ) -> RegistraResult<Option<Student>> {
        let mut students = self.students.write().await;
        Ok(students
            .iter_mut()
            .find(|student| student.admin_number == admin_number)
            .map(|student| {
                *student = Student::from_parts(admin_number.to_owned(), details);
                student.clone()
            }))
    }

    async fn delete(&self, admin_number: &str) -> RegistraResult<bool> {
        let mut students = self.students.write().await;
        let Some(index) = students
            .iter()
            .position(|student| student.admin_number == admin_number)
        else {
            return Ok(false);
        };
        students.remove(index);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistraError;

    fn student(admin_number: &str, c_gpa: &str) -> Student {
        Student {
            admin_number: admin_number.to_owned(),
            name: "John Doe".to_owned(),
            diploma: "Information Technology".to_owned(),
            c_gpa: c_gpa.parse().unwrap(),
            image: None,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_admin_numbers() {
        let store = MemoryStudentStore::new();
        store.insert(student("1234567A", "3.5")).await.unwrap();

        let result = store.insert(student("1234567A", "2.0")).await;
        assert!(matches!(
            result,
            Err(RegistraError::DuplicateStudent { .. })
        ));

        // the original record is untouched
        let all = store.find(&StudentFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].c_gpa, "3.5".parse().unwrap());
    }

    #[tokio::test]
    async fn replace_overwrites_every_mutable_field() {
        let store = MemoryStudentStore::seeded(vec![student("1234567A", "3.5")]);

        let updated = store
            .replace(
                "1234567A",
                StudentDetails {
                    name: "Jane Doe".to_owned(),
                    diploma: "Business".to_owned(),
                    c_gpa: "3.9".parse().unwrap(),
                    image: Some("data:image/png;base64,AAAA".to_owned()),
                },
            )
            .await
            .unwrap()
            .expect("record should exist");

        assert_eq!(updated.admin_number, "1234567A");
        assert_eq!(updated.name, "Jane Doe");
        assert_eq!(updated.image.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[tokio::test]
    async fn replace_and_delete_report_missing_keys() {
        let store = MemoryStudentStore::new();

        let replaced = store
            .replace(
                "9999999Z",
                StudentDetails {
                    name: "Nobody".to_owned(),
                    diploma: "Business".to_owned(),
                    c_gpa: "1.0".parse().unwrap(),
                    image: None,
                },
            )
            .await
            .unwrap();
        assert!(replaced.is_none());

        assert!(!store.delete("9999999Z").await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_exactly_the_keyed_record() {
        let store =
            MemoryStudentStore::seeded(vec![student("1234567A", "3.5"), student("2234567B", "2.1")]);

        assert!(store.delete("1234567A").await.unwrap());

        let remaining = store.find(&StudentFilter::default()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].admin_number, "2234567B");
    }
}
