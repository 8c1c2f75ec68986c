//! Combined scoped view for one principal
//!
//! The Presentation Layer renders from a single [`ScopedView`] per render
//! cycle instead of calling each scoping function separately.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tenantscope_core::{Customer, Dataset, Job, Notification, Principal, User};

use crate::scope::{scope_customers, scope_jobs, scope_notifications, scope_users};
use crate::stats::{derive_stats, Stats};

/// Everything one principal may see, plus derived statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedView {
    pub jobs: Vec<Job>,
    pub users: Vec<User>,
    pub customers: Vec<Customer>,
    pub notifications: Vec<Notification>,
    pub stats: Stats,
}

impl ScopedView {
    /// The view of a principal that may see nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether every collection is empty
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
            && self.users.is_empty()
            && self.customers.is_empty()
            && self.notifications.is_empty()
    }

    /// First `limit` jobs in snapshot order
    ///
    /// Scoping keeps the Data Store's ordering, so when the store lists jobs
    /// newest first this is the "most recent" slice.
    pub fn recent_jobs(&self, limit: usize) -> &[Job] {
        &self.jobs[..limit.min(self.jobs.len())]
    }

    /// Number of visible notifications not yet read
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

/// Scope a whole snapshot for `principal`
///
/// Jobs are scoped first because employee customer visibility depends on the
/// scoped job set; statistics are derived from the scoped collections only.
pub fn scope_view(principal: Option<&Principal>, dataset: &Dataset) -> ScopedView {
    match principal {
        None => {
            warn!(version = dataset.version, "Scoping requested without a principal, returning empty view");
            return ScopedView::empty();
        }
        Some(p) if !p.role.is_recognized() => {
            warn!(
                principal = %p.id,
                role = %p.role,
                version = dataset.version,
                "Unrecognized role, returning empty view"
            );
            return ScopedView::empty();
        }
        Some(_) => {}
    }

    let jobs = scope_jobs(principal, &dataset.jobs);
    let customers = scope_customers(principal, &dataset.customers, &jobs);
    let users = scope_users(principal, &dataset.users);
    let notifications = scope_notifications(principal, &dataset.notifications);
    let stats = derive_stats(&jobs, &users, &customers);

    debug!(
        version = dataset.version,
        jobs = jobs.len(),
        users = users.len(),
        customers = customers.len(),
        notifications = notifications.len(),
        "Scoped view computed"
    );

    ScopedView {
        jobs,
        users,
        customers,
        notifications,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenantscope_core::{JobStatus, Role};

    fn dataset() -> Dataset {
        Dataset::new(1)
            .with_jobs(vec![
                Job::new("j1", "b1", "c1")
                    .assigned_to("e1")
                    .with_status(JobStatus::Completed)
                    .with_invoice(200.0),
                Job::new("j2", "b1", "c2").assigned_to("e2"),
                Job::new("j3", "b2", "c3")
                    .assigned_to("e1")
                    .with_status(JobStatus::Completed)
                    .with_invoice(999.0),
            ])
            .with_users(vec![
                User::business("biz1", "b1"),
                User::employee("e1", "b1"),
                User::employee("e2", "b1"),
                User::employee("e9", "b2"),
            ])
            .with_customers(vec![
                Customer::new("c1", "b1"),
                Customer::new("c2", "b1"),
                Customer::new("c3", "b2"),
            ])
            .with_notifications(vec![
                Notification::new("n1", "e1", "job-assigned"),
                Notification::new("n2", "biz1", "job-created"),
            ])
    }

    #[test]
    fn test_employee_view() {
        let view = scope_view(Some(&Principal::employee("e1", "b1")), &dataset());

        assert_eq!(view.jobs.len(), 1);
        assert_eq!(view.jobs[0].id, "j1");
        assert_eq!(view.customers.len(), 1);
        assert_eq!(view.customers[0].id, "c1");
        assert_eq!(view.users.len(), 2);
        assert_eq!(view.notifications.len(), 1);
        assert_eq!(view.stats.total_revenue, 200.0);
        assert_eq!(view.stats.total_customers, 1);
        assert_eq!(view.stats.active_employees, 2);
    }

    #[test]
    fn test_business_view() {
        let view = scope_view(Some(&Principal::business("biz1", "b1")), &dataset());

        assert_eq!(view.stats.total_jobs, 2);
        assert_eq!(view.stats.pending_jobs, 1);
        assert_eq!(view.stats.total_revenue, 200.0);
        assert_eq!(view.customers.len(), 2);
        assert_eq!(view.users.len(), 3);
    }

    #[test]
    fn test_super_admin_view() {
        let view = scope_view(Some(&Principal::super_admin("root")), &dataset());

        assert_eq!(view.stats.total_jobs, 3);
        assert_eq!(view.stats.total_revenue, 1199.0);
        assert_eq!(view.notifications.len(), 2);
    }

    #[test]
    fn test_fail_closed_views() {
        assert!(scope_view(None, &dataset()).is_empty());

        let stranger = Principal::new("biz1", Role::parse("guest")).with_business("b1");
        let view = scope_view(Some(&stranger), &dataset());
        assert_eq!(view, ScopedView::empty());
        assert_eq!(view.stats, Stats::default());
    }

    #[test]
    fn test_recent_jobs_and_unread() {
        let view = scope_view(Some(&Principal::super_admin("root")), &dataset());

        let recent: Vec<_> = view.recent_jobs(2).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(recent, vec!["j1", "j2"]);
        assert_eq!(view.recent_jobs(10).len(), 3);
        assert_eq!(view.unread_notifications(), 2);
    }
}
