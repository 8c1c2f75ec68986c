//! Integrity diagnostics for dataset snapshots
//!
//! Reports records that break the tenant-tag and reference invariants the
//! scoping rules rely on. Nothing here repairs data, and scoping never
//! consults the report: a job without a tenant tag is simply invisible to
//! tenant-scoped principals. The report exists so the Data Store side can
//! find such records.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

use crate::dataset::Dataset;
use crate::types::Role;

/// A single invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Job without a tenant tag
    JobMissingBusiness { job_id: String },
    /// Customer without a tenant tag
    CustomerMissingBusiness { customer_id: String },
    /// Non-SuperAdmin user without a tenant tag
    UserMissingBusiness { user_id: String },
    /// Same id appears more than once in a collection
    DuplicateId { collection: &'static str, id: String },
    /// Job assigned to a user id that does not exist
    UnknownAssignee { job_id: String, employee_id: String },
    /// Job assigned to a user of a different tenant
    AssigneeTenantMismatch { job_id: String, employee_id: String },
    /// Job references a customer id that does not exist
    UnknownCustomer { job_id: String, customer_id: String },
    /// Notification owned by a user id that does not exist
    UnknownNotificationOwner { notification_id: String, user_id: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JobMissingBusiness { job_id } => {
                write!(f, "job '{}' has no business id", job_id)
            }
            Self::CustomerMissingBusiness { customer_id } => {
                write!(f, "customer '{}' has no business id", customer_id)
            }
            Self::UserMissingBusiness { user_id } => {
                write!(f, "user '{}' has no business id", user_id)
            }
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id '{}' in {}", id, collection)
            }
            Self::UnknownAssignee { job_id, employee_id } => {
                write!(f, "job '{}' is assigned to unknown user '{}'", job_id, employee_id)
            }
            Self::AssigneeTenantMismatch { job_id, employee_id } => write!(
                f,
                "job '{}' is assigned to user '{}' of another business",
                job_id, employee_id
            ),
            Self::UnknownCustomer { job_id, customer_id } => {
                write!(f, "job '{}' references unknown customer '{}'", job_id, customer_id)
            }
            Self::UnknownNotificationOwner { notification_id, user_id } => write!(
                f,
                "notification '{}' is owned by unknown user '{}'",
                notification_id, user_id
            ),
        }
    }
}

/// Result of checking a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Snapshot version the report was computed for
    pub version: u64,
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Emit one warning per violation
    pub fn log(&self) {
        for violation in &self.violations {
            warn!(version = self.version, "Dataset integrity violation: {}", violation);
        }
    }
}

impl Dataset {
    /// Check the snapshot against the tenant-tag and reference invariants
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut violations = Vec::new();

        collect_duplicates("jobs", self.jobs.iter().map(|j| j.id.as_str()), &mut violations);
        collect_duplicates("users", self.users.iter().map(|u| u.id.as_str()), &mut violations);
        collect_duplicates(
            "customers",
            self.customers.iter().map(|c| c.id.as_str()),
            &mut violations,
        );
        collect_duplicates(
            "notifications",
            self.notifications.iter().map(|n| n.id.as_str()),
            &mut violations,
        );

        for user in &self.users {
            if user.business_id.is_none() && user.role != Role::SuperAdmin {
                violations.push(Violation::UserMissingBusiness { user_id: user.id.clone() });
            }
        }

        for customer in &self.customers {
            if customer.business_id.is_none() {
                violations.push(Violation::CustomerMissingBusiness {
                    customer_id: customer.id.clone(),
                });
            }
        }

        let user_tenants: HashMap<&str, Option<&str>> = self
            .users
            .iter()
            .map(|u| (u.id.as_str(), u.business_id.as_deref()))
            .collect();
        let customer_ids: HashSet<&str> = self.customers.iter().map(|c| c.id.as_str()).collect();

        for job in &self.jobs {
            if job.business_id.is_none() {
                violations.push(Violation::JobMissingBusiness { job_id: job.id.clone() });
            }

            if !customer_ids.contains(job.customer_id.as_str()) {
                violations.push(Violation::UnknownCustomer {
                    job_id: job.id.clone(),
                    customer_id: job.customer_id.clone(),
                });
            }

            let Some(employee_id) = job.employee_id.as_deref() else {
                continue;
            };

            match user_tenants.get(employee_id) {
                None => violations.push(Violation::UnknownAssignee {
                    job_id: job.id.clone(),
                    employee_id: employee_id.to_string(),
                }),
                Some(tenant) if *tenant != job.business_id.as_deref() || tenant.is_none() => {
                    violations.push(Violation::AssigneeTenantMismatch {
                        job_id: job.id.clone(),
                        employee_id: employee_id.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        for notification in &self.notifications {
            if !user_tenants.contains_key(notification.user_id.as_str()) {
                violations.push(Violation::UnknownNotificationOwner {
                    notification_id: notification.id.clone(),
                    user_id: notification.user_id.clone(),
                });
            }
        }

        IntegrityReport {
            version: self.version,
            violations,
        }
    }
}

fn collect_duplicates<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
    violations: &mut Vec<Violation>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            violations.push(Violation::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
}
