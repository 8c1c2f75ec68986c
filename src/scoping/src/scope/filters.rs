//! Collection scoping functions
//!
//! Every function borrows its inputs, returns freshly allocated output in
//! input order, and treats a missing principal as one that sees nothing.

use std::collections::HashSet;
use tracing::debug;

use tenantscope_core::{Customer, Job, Notification, Principal, User};

use super::visibility::{
    customer_visible_to, job_visible_to, notification_visible_to, user_visible_to,
};

/// Jobs visible to `principal`
pub fn scope_jobs(principal: Option<&Principal>, jobs: &[Job]) -> Vec<Job> {
    let Some(principal) = principal else {
        debug!(input = jobs.len(), "No principal, scoping jobs to nothing");
        return Vec::new();
    };

    let visible: Vec<Job> = jobs
        .iter()
        .filter(|job| job_visible_to(principal, job))
        .cloned()
        .collect();

    debug!(
        principal = %principal.id,
        role = %principal.role,
        input = jobs.len(),
        visible = visible.len(),
        "Scoped jobs"
    );

    visible
}

/// Users visible to `principal`
pub fn scope_users(principal: Option<&Principal>, users: &[User]) -> Vec<User> {
    let Some(principal) = principal else {
        debug!(input = users.len(), "No principal, scoping users to nothing");
        return Vec::new();
    };

    let visible: Vec<User> = users
        .iter()
        .filter(|user| user_visible_to(principal, user))
        .cloned()
        .collect();

    debug!(
        principal = %principal.id,
        role = %principal.role,
        input = users.len(),
        visible = visible.len(),
        "Scoped users"
    );

    visible
}

/// Customers visible to `principal`
///
/// `scoped_jobs` must be the output of [`scope_jobs`] for the same principal,
/// never the raw job list: employees only see customers of their own jobs.
pub fn scope_customers(
    principal: Option<&Principal>,
    customers: &[Customer],
    scoped_jobs: &[Job],
) -> Vec<Customer> {
    let Some(principal) = principal else {
        debug!(input = customers.len(), "No principal, scoping customers to nothing");
        return Vec::new();
    };

    let assigned: HashSet<&str> = scoped_jobs.iter().map(|job| job.customer_id.as_str()).collect();

    let visible: Vec<Customer> = customers
        .iter()
        .filter(|customer| customer_visible_to(principal, customer, &assigned))
        .cloned()
        .collect();

    debug!(
        principal = %principal.id,
        role = %principal.role,
        input = customers.len(),
        visible = visible.len(),
        "Scoped customers"
    );

    visible
}

/// Notifications visible to `principal`
pub fn scope_notifications(
    principal: Option<&Principal>,
    notifications: &[Notification],
) -> Vec<Notification> {
    let Some(principal) = principal else {
        debug!(input = notifications.len(), "No principal, scoping notifications to nothing");
        return Vec::new();
    };

    let visible: Vec<Notification> = notifications
        .iter()
        .filter(|notification| notification_visible_to(principal, notification))
        .cloned()
        .collect();

    debug!(
        principal = %principal.id,
        role = %principal.role,
        input = notifications.len(),
        visible = visible.len(),
        "Scoped notifications"
    );

    visible
}
