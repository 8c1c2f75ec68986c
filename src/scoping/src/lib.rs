//! # TenantScope Scoping Engine
//!
//! Computes what a principal may see from a raw dataset snapshot:
//!
//! - **Scope**: per-role visibility rules for jobs, users, customers and
//!   notifications, failing closed for missing principals and unknown roles
//! - **Stats**: dashboard aggregates derived only from scoped records
//! - **View**: the combined result handed to the Presentation Layer
//! - **Engine**: optional memoization keyed by principal and dataset version,
//!   with metrics
//!
//! # Example
//!
//! ```
//! use tenantscope_core::{Dataset, Job, JobStatus, Principal};
//! use tenantscope_scoping::scope_view;
//!
//! let dataset = Dataset::new(1).with_jobs(vec![
//!     Job::new("j1", "b1", "c1").assigned_to("e1").with_status(JobStatus::Completed).with_invoice(200.0),
//!     Job::new("j2", "b2", "c2").assigned_to("e1").with_status(JobStatus::Completed).with_invoice(999.0),
//! ]);
//!
//! let view = scope_view(Some(&Principal::employee("e1", "b1")), &dataset);
//! assert_eq!(view.stats.total_jobs, 1);
//! assert_eq!(view.stats.total_revenue, 200.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod scope;
pub mod stats;
pub mod view;

pub use config::EngineConfig;
pub use engine::{CacheStats, EngineMetrics, ScopingEngine};
pub use error::{Result, ScopingError};
pub use scope::{scope_customers, scope_jobs, scope_notifications, scope_users};
pub use stats::{derive_stats, Stats};
pub use view::{scope_view, ScopedView};
