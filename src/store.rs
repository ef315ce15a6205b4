use crate::{
    data::student::{Student, StudentDetails, StudentFilter},
    error::RegistraResult,
};
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

/// Storage seam for the student collection. Every operation is atomic per
/// call; nothing above this trait holds the dataset as shared mutable state.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All records matching the filter's conjunction, in the store's natural
    /// order.
    async fn find(&self, filter: &StudentFilter) -> RegistraResult<Vec<Student>>;

    /// Persists a new record and returns it. Rejects a duplicate
    /// `admin_number` rather than shadowing the existing record.
    async fn insert(&self, student: Student) -> RegistraResult<Student>;

    /// Full-field replace keyed by `admin_number`; `None` when no record
    /// carries that key.
    async fn replace(
        &self,
        admin_number: &str,
        details: StudentDetails,
    ) -> RegistraResult<Option<Student>>;

    /// Removes the record with that key, reporting whether one existed.
    async fn delete(&self, admin_number: &str) -> RegistraResult<bool>;
}
