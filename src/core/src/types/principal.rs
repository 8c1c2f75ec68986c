//! Principal and role definitions

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::{BusinessId, UserId};

/// Role of a principal or user account
///
/// The set of roles is closed. Strings that do not name a known role are kept
/// as [`Role::Unrecognized`] so that every scoping rule has to decide what an
/// unknown role sees instead of inheriting a silent default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Platform operator with system-wide visibility
    SuperAdmin,
    /// Business owner account, scoped to one tenant
    Business,
    /// Employee account, scoped to assigned work within one tenant
    Employee,
    /// Any role string that is not one of the above
    Unrecognized(String),
}

impl Role {
    /// Parse a role name
    ///
    /// Matching ignores case and `_`, `-` and space separators, so
    /// `super_admin`, `SuperAdmin` and `superadmin` are the same role.
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "superadmin" => Role::SuperAdmin,
            "business" => Role::Business,
            "employee" => Role::Employee,
            _ => Role::Unrecognized(raw.to_string()),
        }
    }

    /// Canonical role name
    pub fn as_str(&self) -> &str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Business => "business",
            Role::Employee => "employee",
            Role::Unrecognized(raw) => raw,
        }
    }

    /// Whether this is one of the known roles
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The requesting identity, already authenticated upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// User identifier of the principal
    pub id: UserId,

    /// Role used for scoping decisions
    pub role: Role,

    /// Tenant the principal belongs to (required for Business and Employee)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,

    /// Account status as reported by the identity provider
    #[serde(default)]
    pub is_active: bool,
}

impl Principal {
    /// Create an active principal without a tenant
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            business_id: None,
            is_active: true,
        }
    }

    pub fn super_admin(id: impl Into<UserId>) -> Self {
        Self::new(id, Role::SuperAdmin)
    }

    pub fn business(id: impl Into<UserId>, business_id: impl Into<BusinessId>) -> Self {
        Self::new(id, Role::Business).with_business(business_id)
    }

    pub fn employee(id: impl Into<UserId>, business_id: impl Into<BusinessId>) -> Self {
        Self::new(id, Role::Employee).with_business(business_id)
    }

    /// Attach a tenant to the principal
    pub fn with_business(mut self, business_id: impl Into<BusinessId>) -> Self {
        self.business_id = Some(business_id.into());
        self
    }

    /// Mark the principal as inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Tenant tag as a string slice
    pub fn tenant(&self) -> Option<&str> {
        self.business_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::parse("superadmin"), Role::SuperAdmin);
        assert_eq!(Role::parse("super_admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("SuperAdmin"), Role::SuperAdmin);
        assert_eq!(Role::parse("Super-Admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("BUSINESS"), Role::Business);
        assert_eq!(Role::parse("employee"), Role::Employee);

        let unknown = Role::parse("auditor");
        assert_eq!(unknown, Role::Unrecognized("auditor".to_string()));
        assert!(!unknown.is_recognized());
        assert_eq!(unknown.as_str(), "auditor");
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"superadmin\"");

        let role: Role = serde_json::from_str("\"contractor\"").unwrap();
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"contractor\"");
    }

    #[test]
    fn test_principal_from_json() {
        let principal: Principal = serde_json::from_str(
            r#"{"id": "e1", "role": "employee", "businessId": "b1", "isActive": true}"#,
        )
        .unwrap();

        assert_eq!(principal, Principal::employee("e1", "b1"));
        assert_eq!(principal.tenant(), Some("b1"));
    }

    #[test]
    fn test_principal_without_business() {
        let principal: Principal =
            serde_json::from_str(r#"{"id": "root", "role": "superadmin"}"#).unwrap();

        assert_eq!(principal.role, Role::SuperAdmin);
        assert!(principal.business_id.is_none());
        assert!(!principal.is_active);
    }
}
