use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Assignment, AssignmentId, AssignmentResult, Communication, PlacementRequest, Potential,
    Process, ReassignmentRequest,
};
use super::engine::{self, ProcessSuggestion};
use super::store::{PlacementStore, StoreError};
use crate::catalog::Catalog;
use crate::report::{self, DailyPlacementEntry, PlacementReport};

/// Service composing the matching rules with a [`PlacementStore`].
pub struct PlacementService<S> {
    store: Arc<S>,
}

static ASSIGNMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assignment_id() -> AssignmentId {
    let id = ASSIGNMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssignmentId(format!("emp-{id:06}"))
}

impl<S> PlacementService<S>
where
    S: PlacementStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Install a validated catalog, replacing the previous process table.
    pub fn install_catalog(&self, catalog: Catalog) -> Result<usize, StoreError> {
        let open_slots = catalog.total_open_slots();
        let installed = self.store.replace_catalog(catalog.into_processes())?;
        info!(processes = installed, open_slots, "process catalog installed");
        Ok(installed)
    }

    pub fn catalog(&self) -> Result<Vec<Process>, StoreError> {
        self.store.catalog()
    }

    pub fn filtered_catalog(
        &self,
        potential: Option<Potential>,
        communication: Option<Communication>,
    ) -> Result<Vec<Process>, StoreError> {
        Ok(engine::filter_catalog(
            &self.store.catalog()?,
            potential,
            communication,
        ))
    }

    /// Candidate processes for a profile, best first. Read-only: computed on
    /// a snapshot, so a returned candidate may already be taken by the time
    /// an allocation commits.
    pub fn matches(
        &self,
        potential: Potential,
        communication: Communication,
    ) -> Result<Vec<Process>, StoreError> {
        Ok(engine::find_matching_processes(
            &self.store.catalog()?,
            potential,
            communication,
        ))
    }

    pub fn suggestions(
        &self,
        potential: Potential,
        communication: Communication,
    ) -> Result<Vec<ProcessSuggestion>, StoreError> {
        Ok(engine::rank_suggestions(
            &self.store.catalog()?,
            potential,
            communication,
        ))
    }

    /// Place an employee on the best matching process.
    ///
    /// The best candidate is chosen from a snapshot; the slot itself is taken
    /// by the store's conditional decrement. If that candidate lost its last
    /// slot between snapshot and commit the attempt is recorded as unplaced
    /// rather than retried against the next candidate, so a burst of
    /// allocations never oversubscribes a process.
    pub fn allocate(&self, request: PlacementRequest) -> Result<AssignmentResult, StoreError> {
        let employee = request.into_profile();
        let candidates = engine::find_matching_processes(
            &self.store.catalog()?,
            employee.potential,
            employee.communication,
        );
        let chosen = candidates.first().map(|process| process.name.clone());

        let mut assignment = Assignment {
            id: next_assignment_id(),
            employee,
            process: chosen,
            assigned_at: Utc::now(),
        };

        let stored = match self.store.record_placement(assignment.clone()) {
            Ok(stored) => stored,
            Err(StoreError::SlotsExhausted(name)) | Err(StoreError::ProcessNotFound(name))
                if assignment.process.is_some() =>
            {
                warn!(process = %name, "candidate lost its last open slot before commit");
                assignment.process = None;
                self.store.record_placement(assignment)?
            }
            Err(other) => return Err(other),
        };

        let success = stored.succeeded();
        match stored.process.as_deref() {
            Some(process) => info!(assignment = %stored.id.0, process, "employee placed"),
            None => info!(assignment = %stored.id.0, "no open process for profile"),
        }

        Ok(AssignmentResult {
            assignment_id: stored.id,
            process_name: stored.process,
            success,
        })
    }

    /// Fetch one assignment for API responses.
    pub fn get(&self, id: &AssignmentId) -> Result<Assignment, StoreError> {
        self.store
            .assignment(id)?
            .ok_or_else(|| StoreError::AssignmentNotFound(id.0.clone()))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Assignment>, StoreError> {
        self.store.assignment_by_email(email.trim())
    }

    /// All assignments, newest first.
    pub fn list(&self) -> Result<Vec<Assignment>, StoreError> {
        self.store.assignments()
    }

    /// Rewrite an assignment and move it to the requested process, or to the
    /// bench when no process is named. The store performs the slot swap as
    /// one operation, so a rejected move changes nothing.
    pub fn reassign(
        &self,
        id: &AssignmentId,
        request: ReassignmentRequest,
    ) -> Result<Assignment, StoreError> {
        let (employee, target) = request.into_parts();
        let updated = self
            .store
            .update_assignment(id, employee, target.as_deref())?;
        info!(
            assignment = %updated.id.0,
            process = updated.process.as_deref().unwrap_or("none"),
            "assignment updated"
        );
        Ok(updated)
    }

    /// Remove an assignment, returning its slot to the process it held.
    pub fn withdraw(&self, id: &AssignmentId) -> Result<Assignment, StoreError> {
        let removed = self.store.delete_assignment(id)?;
        match removed.process.as_deref() {
            Some(process) => {
                info!(assignment = %removed.id.0, process, "assignment removed; slot released")
            }
            None => info!(assignment = %removed.id.0, "assignment removed"),
        }
        Ok(removed)
    }

    /// Per-day allocation counts, newest day first.
    pub fn history_by_day(&self) -> Result<Vec<DailyPlacementEntry>, StoreError> {
        Ok(report::history_by_day(&self.store.assignments()?))
    }

    /// Aggregate snapshot of the catalog and the assignment history.
    pub fn report(&self) -> Result<PlacementReport, StoreError> {
        let catalog = self.store.catalog()?;
        let assignments = self.store.assignments()?;
        Ok(PlacementReport::build(&catalog, &assignments))
    }
}
