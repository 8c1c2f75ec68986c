//! # TenantScope Core
//!
//! Shared record types, dataset snapshots, and error handling for the
//! TenantScope scoping engine. The scoping crate depends on this one; the
//! Data Store side can depend on it alone to build and validate snapshots.

pub mod types;
pub mod dataset;
pub mod integrity;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{Customer, Job, JobStatus, Notification, Principal, Role, User};
pub use dataset::{Dataset, UNVERSIONED};
pub use integrity::{IntegrityReport, Violation};

// Identifier aliases shared across the workspace
pub type BusinessId = String;  // Tenant isolation key
pub type UserId = String;      // Principal and user account identifier
pub type JobId = String;
pub type CustomerId = String;
pub type NotificationId = String;
pub type DatasetVersion = u64; // Monotonic snapshot version supplied by the Data Store
