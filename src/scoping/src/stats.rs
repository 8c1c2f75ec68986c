//! Dashboard statistics derived from scoped collections
//!
//! Statistics are only ever computed from already-scoped records, so counts
//! and sums never include anything the principal cannot see.

use serde::{Deserialize, Serialize};

use tenantscope_core::{Customer, Job, JobStatus, Role, User};

/// Aggregates over a scoped view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of visible jobs, whatever their status
    pub total_jobs: usize,

    pub completed_jobs: usize,
    pub pending_jobs: usize,
    pub in_progress_jobs: usize,
    pub cancelled_jobs: usize,

    /// Revenue from completed jobs (invoice, else quotation, else zero)
    pub total_revenue: f64,

    /// Active users with the Employee role
    pub active_employees: usize,

    pub total_customers: usize,
}

impl Stats {
    /// Jobs in one of the four tracked status buckets
    ///
    /// Never exceeds `total_jobs`; statuses such as `tbd` or
    /// `awaiting-payment` only count towards the total.
    pub fn tracked_jobs(&self) -> usize {
        self.completed_jobs + self.pending_jobs + self.in_progress_jobs + self.cancelled_jobs
    }
}

/// Amount a job contributes to revenue once completed
///
/// The invoice wins over the quotation when both are set; a job with
/// neither contributes nothing.
pub fn job_revenue(job: &Job) -> f64 {
    job.invoice.or(job.quotation).unwrap_or(0.0)
}

/// Compute statistics from scoped collections
pub fn derive_stats(jobs: &[Job], users: &[User], customers: &[Customer]) -> Stats {
    let mut stats = Stats {
        total_jobs: jobs.len(),
        total_customers: customers.len(),
        ..Default::default()
    };

    for job in jobs {
        match job.status {
            JobStatus::Completed => {
                stats.completed_jobs += 1;
                stats.total_revenue += job_revenue(job);
            }
            JobStatus::Pending => stats.pending_jobs += 1,
            JobStatus::InProgress => stats.in_progress_jobs += 1,
            JobStatus::Cancelled => stats.cancelled_jobs += 1,
            JobStatus::Confirmed
            | JobStatus::Tbd
            | JobStatus::AwaitingDeposit
            | JobStatus::AwaitingPayment
            | JobStatus::Unknown => {}
        }
    }

    stats.active_employees = users
        .iter()
        .filter(|user| user.role == Role::Employee && user.is_active)
        .count();

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_precedence() {
        let both = Job::new("j1", "b1", "c1").with_invoice(500.0).with_quotation(300.0);
        let quote_only = Job::new("j2", "b1", "c1").with_quotation(300.0);
        let neither = Job::new("j3", "b1", "c1");

        assert_eq!(job_revenue(&both), 500.0);
        assert_eq!(job_revenue(&quote_only), 300.0);
        assert_eq!(job_revenue(&neither), 0.0);
    }

    #[test]
    fn test_zero_invoice_still_wins() {
        let job = Job::new("j1", "b1", "c1").with_invoice(0.0).with_quotation(300.0);
        assert_eq!(job_revenue(&job), 0.0);
    }

    #[test]
    fn test_revenue_counts_completed_jobs_only() {
        let jobs = vec![
            Job::new("j1", "b1", "c1")
                .with_status(JobStatus::Completed)
                .with_invoice(500.0)
                .with_quotation(300.0),
            Job::new("j2", "b1", "c1").with_status(JobStatus::Completed).with_quotation(300.0),
            Job::new("j3", "b1", "c1").with_status(JobStatus::Completed),
            Job::new("j4", "b1", "c1").with_status(JobStatus::Pending).with_invoice(1000.0),
            Job::new("j5", "b1", "c1").with_status(JobStatus::AwaitingPayment).with_invoice(50.0),
        ];

        let stats = derive_stats(&jobs, &[], &[]);
        assert_eq!(stats.total_revenue, 800.0);
        assert_eq!(stats.completed_jobs, 3);
    }

    #[test]
    fn test_status_buckets() {
        let jobs = vec![
            Job::new("j1", "b1", "c1").with_status(JobStatus::Completed),
            Job::new("j2", "b1", "c1").with_status(JobStatus::Pending),
            Job::new("j3", "b1", "c1").with_status(JobStatus::InProgress),
            Job::new("j4", "b1", "c1").with_status(JobStatus::Cancelled),
            Job::new("j5", "b1", "c1").with_status(JobStatus::Tbd),
            Job::new("j6", "b1", "c1").with_status(JobStatus::Confirmed),
            Job::new("j7", "b1", "c1").with_status(JobStatus::Unknown),
        ];

        let stats = derive_stats(&jobs, &[], &[]);

        assert_eq!(stats.total_jobs, 7);
        assert_eq!(stats.completed_jobs, 1);
        assert_eq!(stats.pending_jobs, 1);
        assert_eq!(stats.in_progress_jobs, 1);
        assert_eq!(stats.cancelled_jobs, 1);
        assert_eq!(stats.tracked_jobs(), 4);
    }

    #[test]
    fn test_active_employees() {
        let users = vec![
            User::employee("e1", "b1"),
            User::employee("e2", "b1").inactive(),
            User::business("biz1", "b1"),
            User::new("root", Role::SuperAdmin),
        ];

        let stats = derive_stats(&[], &users, &[]);
        assert_eq!(stats.active_employees, 1);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(derive_stats(&[], &[], &[]), Stats::default());
    }

    #[test]
    fn test_stats_json_field_names() {
        let stats = derive_stats(&[], &[], &[Customer::new("c1", "b1")]);
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["totalCustomers"], 1);
        assert_eq!(json["inProgressJobs"], 0);
        assert_eq!(json["totalRevenue"], 0.0);
    }
}
