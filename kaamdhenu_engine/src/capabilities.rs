//! Staff roles and the capabilities they grant.
//!
//! Permission checks are pure functions over these enums. The one special rule is spelled out in
//! [`has_capability`]: `Admin` implies every capability, so it never needs to be listed in a grant set.
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    DistrictHead,
    Worker,
    Supplier,
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageCatalog,
    PlaceOrders,
    UpdateOrderStatus,
    ReconcilePayments,
    ManageUsers,
    EditSettings,
    ViewDashboard,
}

impl Role {
    /// The capabilities this role grants directly. `Admin` is handled in [`has_capability`] rather than
    /// enumerated here.
    pub fn grants(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Role::Admin => &[],
            Role::DistrictHead => &[ManageCatalog, PlaceOrders, UpdateOrderStatus, ReconcilePayments, ViewDashboard],
            Role::Worker => &[UpdateOrderStatus, ViewDashboard],
            Role::Supplier => &[ManageCatalog],
            Role::Client => &[PlaceOrders],
        }
    }

    /// District heads and suppliers act within a single district, so their assignments must carry one.
    pub fn requires_district(self) -> bool {
        matches!(self, Role::DistrictHead | Role::Supplier)
    }
}

/// True if any of the roles grants the capability. Admin implies all capabilities.
pub fn has_capability(roles: &[Role], capability: Capability) -> bool {
    roles.iter().any(|r| *r == Role::Admin || r.grants().contains(&capability))
}

#[derive(Debug, Clone, Error)]
#[error("Invalid role: {0}")]
pub struct InvalidRole(String);

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::DistrictHead => write!(f, "district_head"),
            Role::Worker => write!(f, "worker"),
            Role::Supplier => write!(f, "supplier"),
            Role::Client => write!(f, "client"),
        }
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "district_head" => Ok(Self::DistrictHead),
            "worker" => Ok(Self::Worker),
            "supplier" => Ok(Self::Supplier),
            "client" => Ok(Self::Client),
            s => Err(InvalidRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn admin_implies_everything() {
        let roles = [Role::Admin];
        for cap in [
            Capability::ManageCatalog,
            Capability::PlaceOrders,
            Capability::UpdateOrderStatus,
            Capability::ReconcilePayments,
            Capability::ManageUsers,
            Capability::EditSettings,
            Capability::ViewDashboard,
        ] {
            assert!(has_capability(&roles, cap));
        }
    }

    #[test]
    fn workers_cannot_touch_the_catalog() {
        let roles = [Role::Worker];
        assert!(has_capability(&roles, Capability::UpdateOrderStatus));
        assert!(!has_capability(&roles, Capability::ManageCatalog));
        assert!(!has_capability(&roles, Capability::ManageUsers));
    }

    #[test]
    fn capability_union_across_roles() {
        let roles = [Role::Supplier, Role::Client];
        assert!(has_capability(&roles, Capability::ManageCatalog));
        assert!(has_capability(&roles, Capability::PlaceOrders));
        assert!(!has_capability(&roles, Capability::ReconcilePayments));
    }

    #[test]
    fn district_scoping() {
        assert!(Role::DistrictHead.requires_district());
        assert!(Role::Supplier.requires_district());
        assert!(!Role::Admin.requires_district());
        assert!(!Role::Worker.requires_district());
    }

    #[test]
    fn role_names_round_trip() {
        assert_eq!("district_head".parse::<Role>().unwrap(), Role::DistrictHead);
        assert_eq!(Role::DistrictHead.to_string(), "district_head");
        assert!("overlord".parse::<Role>().is_err());
    }
}
