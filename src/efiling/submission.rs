use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

static TRANSACTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub fn next_transaction_id() -> String {
    let id = TRANSACTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("txn-{id:06}")
}

/// Bookkeeping for one filing attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub transaction_id: String,
    pub application_id: String,
    pub submission_id: Option<String>,
    pub package_number: Option<String>,
    pub package_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn open(application_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            transaction_id: next_transaction_id(),
            application_id: application_id.into(),
            submission_id: None,
            package_number: None,
            package_url: None,
            created_at: now,
            last_updated: now,
        }
    }

    /// The hub accepted the documents under `submission_id`.
    pub fn mark_uploaded(&mut self, submission_id: impl Into<String>, now: DateTime<Utc>) {
        self.submission_id = Some(submission_id.into());
        self.last_updated = now;
    }

    pub fn record_package(&mut self, callback: PackageCallback, now: DateTime<Utc>) {
        self.package_number = callback.package_number;
        self.package_url = callback.package_url;
        self.last_updated = now;
    }

    pub fn is_uploaded(&self) -> bool {
        self.submission_id.is_some()
    }
}

/// The hub's answer to the document upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAcknowledgement {
    pub submission_id: String,
}

/// Body of the hub's callback once a package is created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageCallback {
    pub package_number: Option<String>,
    pub package_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionRepositoryError {
    #[error("submission already exists")]
    Conflict,
    #[error("submission not found")]
    NotFound,
    #[error("submission store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for submission records, keyed by transaction id.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, SubmissionRepositoryError>;
    fn update(&self, record: SubmissionRecord) -> Result<(), SubmissionRepositoryError>;
    fn fetch(&self, transaction_id: &str) -> Result<Option<SubmissionRecord>, SubmissionRepositoryError>;
}

#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    records: RwLock<BTreeMap<String, SubmissionRecord>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> SubmissionRepositoryError {
    SubmissionRepositoryError::Unavailable("lock poisoned".to_string())
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, SubmissionRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(&record.transaction_id) {
            return Err(SubmissionRepositoryError::Conflict);
        }
        records.insert(record.transaction_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SubmissionRecord) -> Result<(), SubmissionRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        match records.get_mut(&record.transaction_id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(SubmissionRepositoryError::NotFound),
        }
    }

    fn fetch(&self, transaction_id: &str) -> Result<Option<SubmissionRecord>, SubmissionRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(transaction_id).cloned())
    }
}
