//! Business records owned by the Data Store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::principal::Role;
use crate::{BusinessId, CustomerId, JobId, NotificationId, UserId};

/// Lifecycle status of a job
///
/// Wire names are kebab-case (`in-progress`, `awaiting-deposit`). Values the
/// engine does not know decode to [`JobStatus::Unknown`], which falls outside
/// every tracked bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    Tbd,
    AwaitingDeposit,
    AwaitingPayment,
    #[serde(other)]
    Unknown,
}

/// A unit of work performed for a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,

    /// Tenant tag (always present in well-formed data)
    #[serde(default)]
    pub business_id: Option<BusinessId>,

    /// Assigned employee; `None` means unassigned
    #[serde(default)]
    pub employee_id: Option<UserId>,

    pub customer_id: CustomerId,

    #[serde(default)]
    pub status: JobStatus,

    /// Quoted price
    #[serde(default)]
    pub quotation: Option<f64>,

    /// Invoiced price, takes precedence over the quotation
    #[serde(default)]
    pub invoice: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a pending, unassigned job
    pub fn new(
        id: impl Into<JobId>,
        business_id: impl Into<BusinessId>,
        customer_id: impl Into<CustomerId>,
    ) -> Self {
        Self {
            id: id.into(),
            business_id: Some(business_id.into()),
            employee_id: None,
            customer_id: customer_id.into(),
            status: JobStatus::Pending,
            quotation: None,
            invoice: None,
            created_at: None,
        }
    }

    pub fn assigned_to(mut self, employee_id: impl Into<UserId>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_quotation(mut self, amount: f64) -> Self {
        self.quotation = Some(amount);
        self
    }

    pub fn with_invoice(mut self, amount: f64) -> Self {
        self.invoice = Some(amount);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// A customer of a business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,

    #[serde(default)]
    pub business_id: Option<BusinessId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, business_id: impl Into<BusinessId>) -> Self {
        Self {
            id: id.into(),
            business_id: Some(business_id.into()),
            name: None,
            email: None,
            phone: None,
            address: None,
            created_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A business or employee account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    /// Tenant tag; absent only for SuperAdmin accounts
    #[serde(default)]
    pub business_id: Option<BusinessId>,

    pub role: Role,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Create an active user account
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            business_id: None,
            role,
            is_active: true,
            name: None,
            email: None,
        }
    }

    pub fn employee(id: impl Into<UserId>, business_id: impl Into<BusinessId>) -> Self {
        Self::new(id, Role::Employee).in_business(business_id)
    }

    pub fn business(id: impl Into<UserId>, business_id: impl Into<BusinessId>) -> Self {
        Self::new(id, Role::Business).in_business(business_id)
    }

    pub fn in_business(mut self, business_id: impl Into<BusinessId>) -> Self {
        self.business_id = Some(business_id.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A notification addressed to a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,

    /// Owning user
    pub user_id: UserId,

    #[serde(default)]
    pub read: bool,

    /// Notification kind (e.g. "job-assigned", "payment-received")
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Create an unread notification
    pub fn new(
        id: impl Into<NotificationId>,
        user_id: impl Into<UserId>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            read: false,
            kind: kind.into(),
            message: None,
            created_at: None,
            read_at: None,
        }
    }

    pub fn mark_read(mut self, at: DateTime<Utc>) -> Self {
        self.read = true;
        self.read_at = Some(at);
        self
    }
}
