//! Record types consumed by the scoping engine

pub mod principal;
pub mod records;

pub use principal::{Principal, Role};
pub use records::{Customer, Job, JobStatus, Notification, User};
