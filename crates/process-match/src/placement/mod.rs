//! Matching rules and the assignment lifecycle.
//!
//! [`engine`] holds the pure selection logic, [`store`] the storage
//! contract, and [`service`] ties both to the allocation, reassignment, and
//! reporting operations exposed over HTTP by [`router`].

pub mod domain;
pub mod engine;
mod memory;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Assignment, AssignmentId, AssignmentResult, AssignmentView, AttributeParseError, Communication,
    EmployeeProfile, PlacementRequest, Potential, Process, ReassignmentRequest,
};
pub use engine::{filter_catalog, find_matching_processes, rank_suggestions, ProcessSuggestion};
pub use memory::MemoryPlacementStore;
pub use router::{
    placement_router, CatalogImportRequest, CatalogImportResponse, PlacementReportResponse,
};
pub use service::PlacementService;
pub use store::{PlacementStore, StoreError};
