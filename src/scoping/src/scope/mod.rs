//! Role-based record scoping
//!
//! Maps a principal and a raw collection to the subset that principal may
//! see. Visibility is nested: SuperAdmin sees everything, a Business sees its
//! tenant, an Employee sees the work assigned to it within its tenant. A
//! missing principal or an unrecognized role sees nothing.
//!
//! # Examples
//!
//! ```
//! use tenantscope_core::{Job, Principal};
//! use tenantscope_scoping::scope::scope_jobs;
//!
//! let employee = Principal::employee("e1", "b1");
//! let jobs = vec![
//!     Job::new("j1", "b1", "c1").assigned_to("e1"),
//!     Job::new("j2", "b1", "c1").assigned_to("e2"),
//!     Job::new("j3", "b2", "c9").assigned_to("e1"),
//! ];
//!
//! let visible = scope_jobs(Some(&employee), &jobs);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].id, "j1");
//! ```

mod visibility;
mod filters;


pub use visibility::{
    customer_visible_to, job_visible_to, notification_visible_to, same_tenant, user_visible_to,
};
pub use filters::{scope_customers, scope_jobs, scope_notifications, scope_users};
