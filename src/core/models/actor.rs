//! Caller identity
//!
//! The authentication boundary hands the core a role and, for institution
//! staff, the institution they belong to.

use serde::{Deserialize, Serialize};

/// Role of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regulator staff processing regulator phases
    RegulatorAdmin,
    /// Staff member of a participating institution
    InstitutionUser,
    /// Platform operator
    PlatformAdmin,
}

impl Role {
    /// Whether this is one of the administrative roles
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::RegulatorAdmin | Self::PlatformAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RegulatorAdmin => write!(f, "regulator_admin"),
            Self::InstitutionUser => write!(f, "institution_user"),
            Self::PlatformAdmin => write!(f, "platform_admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "regulator_admin" | "regulator" => Ok(Self::RegulatorAdmin),
            "institution_user" | "institution" => Ok(Self::InstitutionUser),
            "platform_admin" | "platform" | "admin" => Ok(Self::PlatformAdmin),
            _ => Err(format!(
                "Invalid role: {s}. Use: regulator_admin, institution_user, platform_admin"
            )),
        }
    }
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Caller role
    pub role: Role,
    /// Institution the caller belongs to (institution staff only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,
}

impl Actor {
    /// Create an actor, normalizing an empty institution id to none
    #[must_use]
    pub fn new(role: Role, institution_id: Option<String>) -> Self {
        Self {
            role,
            institution_id: institution_id.filter(|id| !id.trim().is_empty()),
        }
    }

    /// A regulator administrator
    #[must_use]
    pub const fn regulator() -> Self {
        Self {
            role: Role::RegulatorAdmin,
            institution_id: None,
        }
    }

    /// A platform administrator
    #[must_use]
    pub const fn platform() -> Self {
        Self {
            role: Role::PlatformAdmin,
            institution_id: None,
        }
    }

    /// A staff member of the given institution
    #[must_use]
    pub fn institution(institution_id: impl Into<String>) -> Self {
        Self {
            role: Role::InstitutionUser,
            institution_id: Some(institution_id.into()),
        }
    }

    /// Whether the caller belongs to the given institution
    #[must_use]
    pub fn belongs_to(&self, institution_id: &str) -> bool {
        self.institution_id.as_deref() == Some(institution_id)
    }
}
