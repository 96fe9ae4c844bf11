use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use student_marks::error::AppError;
use student_marks::records::{InMemoryStudentRepository, RosterImporter, StudentService};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type MemoryStudentService = StudentService<InMemoryStudentRepository>;

/// Build the store, optionally pre-loading a CSV roster.
pub(crate) fn student_service(seed: Option<&Path>) -> Result<Arc<MemoryStudentService>, AppError> {
    let repository = Arc::new(InMemoryStudentRepository::default());
    let service = StudentService::new(repository);

    if let Some(path) = seed {
        let candidates = RosterImporter::from_path(path)?;
        let count = candidates.len();
        for candidate in candidates {
            service.seed(candidate)?;
        }
        info!(count, path = %path.display(), "roster seeded");
    }

    Ok(Arc::new(service))
}
