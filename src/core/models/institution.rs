//! Institution (tenant) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionKind {
    /// University (default)
    #[default]
    University,
    /// College
    College,
    /// Polytechnic
    Polytechnic,
    /// Employer or other requesting organization
    Organization,
    /// The regulator itself
    Regulator,
}

impl std::fmt::Display for InstitutionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::University => write!(f, "university"),
            Self::College => write!(f, "college"),
            Self::Polytechnic => write!(f, "polytechnic"),
            Self::Organization => write!(f, "organization"),
            Self::Regulator => write!(f, "regulator"),
        }
    }
}

impl std::str::FromStr for InstitutionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "university" => Ok(Self::University),
            "college" => Ok(Self::College),
            "polytechnic" => Ok(Self::Polytechnic),
            "organization" | "organisation" | "employer" => Ok(Self::Organization),
            "regulator" => Ok(Self::Regulator),
            _ => Err(format!(
                "Invalid institution kind: {s}. Use: university, college, polytechnic, organization, regulator"
            )),
        }
    }
}

/// A participating institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// Short identifier (slug), e.g. "uni-ghana"
    pub id: String,
    /// Display name
    pub name: String,
    /// Kind of institution
    pub kind: InstitutionKind,
    /// Inactive institutions cannot be targeted by new requests
    pub active: bool,
    /// When it was registered
    pub created_at: DateTime<Utc>,
}

impl Institution {
    /// Create an active institution
    #[must_use]
    pub fn new(id: String, name: String, kind: InstitutionKind) -> Self {
        Self {
            id,
            name,
            kind,
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Whether an institution id is a usable slug
#[must_use]
pub fn is_valid_institution_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
