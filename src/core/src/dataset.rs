//! Raw dataset snapshot supplied by the Data Store
//!
//! A snapshot is the unfiltered state of every collection at one version.
//! Collections decode from either a JSON array (order kept) or a JSON object
//! keyed by record id (ordered by key).

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::types::{Customer, Job, Notification, User};
use crate::DatasetVersion;

/// Version of a snapshot whose producer did not supply one
pub const UNVERSIONED: DatasetVersion = 0;

/// Unfiltered snapshot of all business records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Snapshot version; must change whenever any collection changes
    ///
    /// Snapshots without a version decode as [`UNVERSIONED`] and are never
    /// memoized by version.
    #[serde(default)]
    pub version: DatasetVersion,

    #[serde(default, deserialize_with = "seq_or_map")]
    pub jobs: Vec<Job>,

    #[serde(default, deserialize_with = "seq_or_map")]
    pub users: Vec<User>,

    #[serde(default, deserialize_with = "seq_or_map")]
    pub customers: Vec<Customer>,

    #[serde(default, deserialize_with = "seq_or_map")]
    pub notifications: Vec<Notification>,
}

impl Dataset {
    /// Create an empty snapshot at the given version
    pub fn new(version: DatasetVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    pub fn with_jobs(mut self, jobs: Vec<Job>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_customers(mut self, customers: Vec<Customer>) -> Self {
        self.customers = customers;
        self
    }

    pub fn with_notifications(mut self, notifications: Vec<Notification>) -> Self {
        self.notifications = notifications;
        self
    }

    /// Decode a snapshot from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;

        debug!(
            version = dataset.version,
            jobs = dataset.jobs.len(),
            users = dataset.users.len(),
            customers = dataset.customers.len(),
            notifications = dataset.notifications.len(),
            "Decoded dataset snapshot"
        );

        Ok(dataset)
    }

    /// Read and decode a snapshot from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::not_found(path.display().to_string()));
        }

        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Total number of records across all collections
    pub fn len(&self) -> usize {
        self.jobs.len() + self.users.len() + self.customers.len() + self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the producer supplied a version that identifies this content
    pub fn is_versioned(&self) -> bool {
        self.version != UNVERSIONED
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeqOrMap<T> {
    Seq(Vec<T>),
    Map(BTreeMap<String, T>),
}

fn seq_or_map<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match SeqOrMap::deserialize(deserializer)? {
        SeqOrMap::Seq(records) => records,
        SeqOrMap::Map(records) => records.into_values().collect(),
    })
}
