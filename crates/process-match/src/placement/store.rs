use super::domain::{Assignment, AssignmentId, EmployeeProfile, Process};

/// Abstraction over the process table and the assignment table.
///
/// Every method is one atomic operation against both tables. Implementations
/// must guarantee that a failed call leaves no partial effect: vacancy counts
/// and assignment rows either all change or none do. The service layer relies
/// on this instead of running its own compensation logic.
pub trait PlacementStore: Send + Sync {
    /// Install a freshly imported catalog, replacing whatever was there.
    /// Existing assignments keep their process names as weak references.
    /// Returns the number of processes installed.
    fn replace_catalog(&self, processes: Vec<Process>) -> Result<usize, StoreError>;

    /// Snapshot of the current catalog in name order.
    fn catalog(&self) -> Result<Vec<Process>, StoreError>;

    /// Look up a single process by its exact name.
    fn process(&self, name: &str) -> Result<Option<Process>, StoreError>;

    /// Insert an allocation record, taking one slot from the referenced
    /// process in the same critical section.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when the employee email is
    /// already registered, and with [`StoreError::SlotsExhausted`] when the
    /// referenced process has no open slot left; either failure leaves both
    /// tables untouched. A record with `process: None` only checks the email.
    fn record_placement(&self, assignment: Assignment) -> Result<Assignment, StoreError>;

    /// Fetch one assignment by id.
    fn assignment(&self, id: &AssignmentId) -> Result<Option<Assignment>, StoreError>;

    /// Fetch the assignment registered under an employee email, if any.
    fn assignment_by_email(&self, email: &str) -> Result<Option<Assignment>, StoreError>;

    /// All assignments, newest first.
    fn assignments(&self) -> Result<Vec<Assignment>, StoreError>;

    /// Rewrite an assignment's employee fields and move it to `target`.
    ///
    /// When the target differs from the current process the store takes a
    /// slot on the target and releases one on the previous process inside the
    /// same critical section. Any failure (unknown id, duplicate email, full
    /// or missing target) leaves the record and every vacancy count as they
    /// were.
    fn update_assignment(
        &self,
        id: &AssignmentId,
        employee: EmployeeProfile,
        target: Option<&str>,
    ) -> Result<Assignment, StoreError>;

    /// Remove an assignment, releasing its slot back to the process when the
    /// placement had succeeded and the process still exists.
    fn delete_assignment(&self, id: &AssignmentId) -> Result<Assignment, StoreError>;
}

/// Error raised by [`PlacementStore`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("process '{0}' not found")]
    ProcessNotFound(String),
    #[error("assignment '{0}' not found")]
    AssignmentNotFound(String),
    #[error("employee email '{0}' is already assigned")]
    DuplicateEmail(String),
    #[error("no open slots remain on process '{0}'")]
    SlotsExhausted(String),
    #[error("placement store unavailable: {0}")]
    Unavailable(String),
}
