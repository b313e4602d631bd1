use metrics_exporter_prometheus::PrometheusHandle;
use process_match::placement::{MemoryPlacementStore, PlacementService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Placement service over a fresh in-memory store. The process table starts
/// empty until a catalog is installed.
pub(crate) fn memory_service() -> Arc<PlacementService<MemoryPlacementStore>> {
    Arc::new(PlacementService::new(Arc::new(
        MemoryPlacementStore::default(),
    )))
}
