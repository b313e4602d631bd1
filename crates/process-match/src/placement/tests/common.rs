use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::catalog::{Catalog, CatalogImporter};
use crate::placement::domain::{
    Assignment, AssignmentId, Communication, EmployeeProfile, PlacementRequest, Potential, Process,
    ReassignmentRequest,
};
use crate::placement::memory::MemoryPlacementStore;
use crate::placement::router::placement_router;
use crate::placement::service::PlacementService;
use crate::placement::store::{PlacementStore, StoreError};

pub(super) fn process(
    name: &str,
    potential: Potential,
    communication: Communication,
    vacancy: u32,
) -> Process {
    Process {
        name: name.to_string(),
        potential,
        communication,
        vacancy,
    }
}

pub(super) fn sample_processes() -> Vec<Process> {
    vec![
        process("Inbound Service", Potential::Service, Communication::Good, 8),
        process(
            "Premium Service Desk",
            Potential::Service,
            Communication::Excellent,
            2,
        ),
        process(
            "Outbound Sales",
            Potential::Sales,
            Communication::VeryGood,
            5,
        ),
        process("Credit Desk", Potential::Sales, Communication::Excellent, 0),
        process(
            "Consultation Hub",
            Potential::Consultation,
            Communication::VeryGood,
            3,
        ),
    ]
}

pub(super) const SAMPLE_CATALOG_CSV: &str = "\
name,potential,communication,vacancy
Inbound Service,Service,Good,8
Premium Service Desk,Service,Excellent,2
Outbound Sales,Sales,Very Good,5
Credit Desk,Sales,Excellent,0
Consultation Hub,Consultation,Very Good,3
";

pub(super) fn sample_catalog() -> Catalog {
    CatalogImporter::from_reader(std::io::Cursor::new(SAMPLE_CATALOG_CSV))
        .expect("sample catalog imports")
}

pub(super) fn request(
    name: &str,
    email: &str,
    potential: Potential,
    communication: Communication,
) -> PlacementRequest {
    PlacementRequest {
        name: name.to_string(),
        email: email.to_string(),
        potential,
        communication,
    }
}

pub(super) fn reassignment(
    name: &str,
    email: &str,
    potential: Potential,
    communication: Communication,
    target: Option<&str>,
) -> ReassignmentRequest {
    ReassignmentRequest {
        name: name.to_string(),
        email: email.to_string(),
        potential,
        communication,
        process: target.map(str::to_string),
    }
}

/// Service over a fresh memory store seeded with the sample catalog.
pub(super) fn build_service() -> (
    Arc<PlacementService<MemoryPlacementStore>>,
    Arc<MemoryPlacementStore>,
) {
    let store = Arc::new(MemoryPlacementStore::default());
    let service = Arc::new(PlacementService::new(store.clone()));
    service
        .install_catalog(sample_catalog())
        .expect("catalog installs");
    (service, store)
}

pub(super) fn sample_router() -> axum::Router {
    let (service, _) = build_service();
    placement_router(service)
}

pub(super) fn vacancy_of(store: &MemoryPlacementStore, name: &str) -> u32 {
    store
        .process(name)
        .expect("store lookup works")
        .expect("process exists")
        .vacancy
}

/// Store whose catalog snapshots always advertise at least one open slot,
/// while the commit path still enforces the real counts. Lets tests force
/// the snapshot-went-stale branch of allocation deterministically.
#[derive(Default, Clone)]
pub(super) struct StaleSnapshotStore {
    pub(super) inner: MemoryPlacementStore,
}

impl PlacementStore for StaleSnapshotStore {
    fn replace_catalog(&self, processes: Vec<Process>) -> Result<usize, StoreError> {
        self.inner.replace_catalog(processes)
    }

    fn catalog(&self) -> Result<Vec<Process>, StoreError> {
        Ok(self
            .inner
            .catalog()?
            .into_iter()
            .map(|mut process| {
                process.vacancy = process.vacancy.max(1);
                process
            })
            .collect())
    }

    fn process(&self, name: &str) -> Result<Option<Process>, StoreError> {
        self.inner.process(name)
    }

    fn record_placement(&self, assignment: Assignment) -> Result<Assignment, StoreError> {
        self.inner.record_placement(assignment)
    }

    fn assignment(&self, id: &AssignmentId) -> Result<Option<Assignment>, StoreError> {
        self.inner.assignment(id)
    }

    fn assignment_by_email(&self, email: &str) -> Result<Option<Assignment>, StoreError> {
        self.inner.assignment_by_email(email)
    }

    fn assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        self.inner.assignments()
    }

    fn update_assignment(
        &self,
        id: &AssignmentId,
        employee: EmployeeProfile,
        target: Option<&str>,
    ) -> Result<Assignment, StoreError> {
        self.inner.update_assignment(id, employee, target)
    }

    fn delete_assignment(&self, id: &AssignmentId) -> Result<Assignment, StoreError> {
        self.inner.delete_assignment(id)
    }
}

/// Store that refuses every call, for the internal-error handler paths.
pub(super) struct UnavailableStore;

impl UnavailableStore {
    fn offline<T>() -> Result<T, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

impl PlacementStore for UnavailableStore {
    fn replace_catalog(&self, _processes: Vec<Process>) -> Result<usize, StoreError> {
        Self::offline()
    }

    fn catalog(&self) -> Result<Vec<Process>, StoreError> {
        Self::offline()
    }

    fn process(&self, _name: &str) -> Result<Option<Process>, StoreError> {
        Self::offline()
    }

    fn record_placement(&self, _assignment: Assignment) -> Result<Assignment, StoreError> {
        Self::offline()
    }

    fn assignment(&self, _id: &AssignmentId) -> Result<Option<Assignment>, StoreError> {
        Self::offline()
    }

    fn assignment_by_email(&self, _email: &str) -> Result<Option<Assignment>, StoreError> {
        Self::offline()
    }

    fn assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        Self::offline()
    }

    fn update_assignment(
        &self,
        _id: &AssignmentId,
        _employee: EmployeeProfile,
        _target: Option<&str>,
    ) -> Result<Assignment, StoreError> {
        Self::offline()
    }

    fn delete_assignment(&self, _id: &AssignmentId) -> Result<Assignment, StoreError> {
        Self::offline()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_conflict_response(response: &Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
