//! Per-record visibility rules
//!
//! Each predicate answers "may this principal see this record" with an
//! exhaustive match over [`Role`]. Adding a role is a compile error here
//! until every rule states what the new role sees.

use std::collections::HashSet;

use tenantscope_core::{Customer, Job, Notification, Principal, Role, User};

/// Tenant tags match only when both are present and equal
///
/// An absent tag on either side never matches, so a record that lost its
/// tenant tag is invisible to every tenant-scoped principal.
pub fn same_tenant(record: Option<&str>, principal: Option<&str>) -> bool {
    match (record, principal) {
        (Some(record), Some(principal)) => record == principal,
        _ => false,
    }
}

/// Whether `principal` may see `job`
pub fn job_visible_to(principal: &Principal, job: &Job) -> bool {
    match &principal.role {
        Role::SuperAdmin => true,
        Role::Business => same_tenant(job.business_id.as_deref(), principal.tenant()),
        // Both checks: an employee id that collides across tenants must not leak jobs
        Role::Employee => {
            job.employee_id.as_deref() == Some(principal.id.as_str())
                && same_tenant(job.business_id.as_deref(), principal.tenant())
        }
        Role::Unrecognized(_) => false,
    }
}

/// Whether `principal` may see `user`
pub fn user_visible_to(principal: &Principal, user: &User) -> bool {
    match &principal.role {
        Role::SuperAdmin => true,
        Role::Business => {
            same_tenant(user.business_id.as_deref(), principal.tenant()) || user.id == principal.id
        }
        Role::Employee => {
            same_tenant(user.business_id.as_deref(), principal.tenant())
                && user.role == Role::Employee
        }
        Role::Unrecognized(_) => false,
    }
}

/// Whether `principal` may see `customer`
///
/// `assigned_customers` holds the customer ids of the jobs already scoped for
/// the same principal; it only matters for employees.
pub fn customer_visible_to(
    principal: &Principal,
    customer: &Customer,
    assigned_customers: &HashSet<&str>,
) -> bool {
    match &principal.role {
        Role::SuperAdmin => true,
        Role::Business => same_tenant(customer.business_id.as_deref(), principal.tenant()),
        Role::Employee => {
            same_tenant(customer.business_id.as_deref(), principal.tenant())
                && assigned_customers.contains(customer.id.as_str())
        }
        Role::Unrecognized(_) => false,
    }
}

/// Whether `principal` may see `notification`
///
/// Notifications are never shared tenant-wide; only the owner sees them.
pub fn notification_visible_to(principal: &Principal, notification: &Notification) -> bool {
    match &principal.role {
        Role::SuperAdmin => true,
        Role::Business | Role::Employee => notification.user_id == principal.id,
        Role::Unrecognized(_) => false,
    }
}
