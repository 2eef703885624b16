use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use core_model::region::RegionConfig;
use core_model::source::DatasetSource;
use core_view::{DashboardSession, ViewportPolicy};
use incident_store::{Dataset, LoadError, RecordPolicy};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{error, info};

use crate::error::AppError;

pub type SourceHandle = Arc<dyn DatasetSource>;

#[derive(Clone)]
pub struct AppState {
    pub(crate) source: SourceHandle,
    pub(crate) record_policy: RecordPolicy,
    pub(crate) region: Arc<RegionConfig>,
    pub(crate) viewport_policy: ViewportPolicy,
    pub(crate) slot: Arc<Mutex<DatasetSlot>>,
    pub(crate) meta: Arc<MetaSnapshot>,
}

/// The session once the dataset is in, or the reason it is not.
pub(crate) enum DatasetSlot {
    Failed(String),
    Ready(DashboardSession),
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaSnapshot {
    pub dataset_origin: String,
    pub record_policy: RecordPolicy,
    pub region: String,
    pub static_dir: Option<String>,
}

pub struct DashboardServerSettings {
    pub source: SourceHandle,
    pub record_policy: RecordPolicy,
    pub region: RegionConfig,
    pub bind: SocketAddr,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Loads the dataset once. A failed load still yields a state, so the
    /// server can come up and offer a retry.
    pub async fn initialize(settings: &DashboardServerSettings) -> Self {
        let viewport_policy = ViewportPolicy::for_region(&settings.region);
        let slot = match load_dataset(settings.source.clone(), settings.record_policy).await {
            Ok(dataset) => {
                DatasetSlot::Ready(DashboardSession::new(Arc::new(dataset), viewport_policy))
            }
            Err(err) => {
                let message = failure_message(&settings.source, err);
                error!("initial dataset load failed: {}", message);
                DatasetSlot::Failed(message)
            }
        };
        let meta = MetaSnapshot {
            dataset_origin: settings.source.describe(),
            record_policy: settings.record_policy,
            region: settings.region.name.clone(),
            static_dir: settings
                .static_dir
                .as_ref()
                .map(|p| p.display().to_string()),
        };
        Self {
            source: settings.source.clone(),
            record_policy: settings.record_policy,
            region: Arc::new(settings.region.clone()),
            viewport_policy,
            slot: Arc::new(Mutex::new(slot)),
            meta: Arc::new(meta),
        }
    }

    /// Runs `f` against the live session, or answers 503 when there is none.
    pub(crate) async fn with_session<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut DashboardSession) -> Result<T, AppError>,
    {
        let mut slot = self.slot.lock().await;
        match &mut *slot {
            DatasetSlot::Ready(session) => f(session),
            DatasetSlot::Failed(reason) => Err(AppError::unavailable(reason.clone())),
        }
    }

    pub(crate) async fn dataset(&self) -> Result<Arc<Dataset>, AppError> {
        self.with_session(|session| Ok(session.dataset().clone())).await
    }

    /// Retries a failed load. A dataset that is already in stays frozen.
    pub(crate) async fn ensure_loaded(&self) -> Result<Arc<Dataset>, AppError> {
        let mut slot = self.slot.lock().await;
        if let DatasetSlot::Ready(session) = &*slot {
            return Ok(session.dataset().clone());
        }
        match load_dataset(self.source.clone(), self.record_policy).await {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                let session = DashboardSession::new(dataset.clone(), self.viewport_policy);
                *slot = DatasetSlot::Ready(session);
                info!("dataset loaded after retry");
                Ok(dataset)
            }
            Err(err) => {
                let message = failure_message(&self.source, err);
                error!("dataset load retry failed: {}", message);
                *slot = DatasetSlot::Failed(message.clone());
                Err(AppError::unavailable(message))
            }
        }
    }
}

pub(crate) async fn load_dataset(
    source: SourceHandle,
    policy: RecordPolicy,
) -> Result<Dataset, LoadError> {
    task::spawn_blocking(move || Dataset::load(source.as_ref(), policy))
        .await
        .map_err(|err| LoadError::Other(anyhow!("dataset load task failed: {}", err)))?
}

/// Client-facing load failure, with the full cause chain.
fn failure_message(source: &SourceHandle, err: LoadError) -> String {
    format!(
        "failed to load incident data from {}: {:#}",
        source.describe(),
        anyhow::Error::from(err)
    )
}
