use crate::errors::AppError;
use crate::models::SurveyResponse;
use async_trait::async_trait;
use chrono::Utc;
use std::{collections::BTreeMap, path::Path, path::PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, info};

/// Name of the single key the survey collection lives under.
pub const SURVEY_KEY: &str = "mktfarma_surveys_v1";

/// Append-only survey collection.
///
/// `load` never fails: absent or corrupt data reads as an empty collection.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    async fn load(&self) -> Vec<SurveyResponse>;

    /// Appends one record and persists the whole updated collection.
    async fn append(&self, response: SurveyResponse) -> Result<(), AppError>;
}

/// Stamps `fields` with the current time and appends them to `store`.
pub async fn save_survey(
    store: &dyn SurveyStore,
    fields: BTreeMap<String, String>,
) -> Result<SurveyResponse, AppError> {
    let response = SurveyResponse::from_fields(fields).with_timestamp(Utc::now().timestamp_millis());
    store.append(response.clone()).await?;
    info!(fields = response.0.len(), "survey response saved");
    Ok(response)
}

pub fn parse_surveys(bytes: &[u8]) -> Vec<SurveyResponse> {
    match serde_json::from_slice(bytes) {
        Ok(list) => list,
        Err(err) => {
            error!("failed to parse survey data: {err}");
            Vec::new()
        }
    }
}

pub fn resolve_data_path(override_path: Option<String>) -> PathBuf {
    match override_path {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!("data/{SURVEY_KEY}.json")),
    }
}

/// Survey collection kept as a JSON array in one file.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SurveyStore for JsonFileStore {
    async fn load(&self) -> Vec<SurveyResponse> {
        let _guard = self.lock.lock().await;
        load_data(&self.path).await
    }

    async fn append(&self, response: SurveyResponse) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut list = load_data(&self.path).await;
        list.push(response);
        persist_data(&self.path, &list).await?;
        debug!(count = list.len(), path = %self.path.display(), "survey data persisted");
        Ok(())
    }
}

async fn load_data(path: &Path) -> Vec<SurveyResponse> {
    match fs::read(path).await {
        Ok(bytes) => parse_surveys(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read survey data file: {err}");
            Vec::new()
        }
    }
}

/// Writes to a sibling temp file and renames it over `path`, so the file on disk
/// always holds a complete collection.
async fn persist_data(path: &Path, data: &[SurveyResponse]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<SurveyResponse>>,
}

impl MemoryStore {
    pub fn with_records(records: Vec<SurveyResponse>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn load(&self) -> Vec<SurveyResponse> {
        self.records.lock().await.clone()
    }

    async fn append(&self, response: SurveyResponse) -> Result<(), AppError> {
        self.records.lock().await.push(response);
        Ok(())
    }
}
