//! Authorization policy
//!
//! The single place that decides who may do what. Roles map to capability
//! sets; actions require a capability plus, for institution staff, a tenant
//! match on the request.

use crate::core::models::{Actor, Phase, Role, VerificationRequest};
use crate::core::{Result, WorkflowError};

/// Something a role is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Process phases 1, 2 and 4
    ProcessRegulatorPhases,
    /// Process phase 3 for requests targeting one's own institution
    ProcessInstitutionPhase,
    /// Reject a request outright
    RejectRequests,
    /// Add fraud flags
    FlagRequests,
    /// Submit new requests
    SubmitRequests,
    /// Attach documents to requests
    AttachDocuments,
    /// See every request regardless of tenant
    ViewAllRequests,
    /// Register institutions
    ManageInstitutions,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProcessRegulatorPhases => write!(f, "process regulator phases"),
            Self::ProcessInstitutionPhase => write!(f, "process the institution phase"),
            Self::RejectRequests => write!(f, "reject requests"),
            Self::FlagRequests => write!(f, "flag requests"),
            Self::SubmitRequests => write!(f, "submit requests"),
            Self::AttachDocuments => write!(f, "attach documents"),
            Self::ViewAllRequests => write!(f, "view all requests"),
            Self::ManageInstitutions => write!(f, "manage institutions"),
        }
    }
}

const REGULATOR_CAPABILITIES: &[Capability] = &[
    Capability::ProcessRegulatorPhases,
    Capability::RejectRequests,
    Capability::FlagRequests,
    Capability::SubmitRequests,
    Capability::AttachDocuments,
    Capability::ViewAllRequests,
];

const PLATFORM_CAPABILITIES: &[Capability] = &[
    Capability::ProcessRegulatorPhases,
    Capability::RejectRequests,
    Capability::FlagRequests,
    Capability::SubmitRequests,
    Capability::AttachDocuments,
    Capability::ViewAllRequests,
    Capability::ManageInstitutions,
];

const INSTITUTION_CAPABILITIES: &[Capability] = &[
    Capability::ProcessInstitutionPhase,
    Capability::SubmitRequests,
    Capability::AttachDocuments,
];

/// Capabilities granted to a role
#[must_use]
pub const fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::RegulatorAdmin => REGULATOR_CAPABILITIES,
        Role::PlatformAdmin => PLATFORM_CAPABILITIES,
        Role::InstitutionUser => INSTITUTION_CAPABILITIES,
    }
}

/// Whether a role holds a capability
#[must_use]
pub fn has_capability(role: Role, capability: Capability) -> bool {
    capabilities(role).contains(&capability)
}

/// An action on a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Process the given phase
    Process(Phase),
    /// Reject the request
    Reject,
    /// Add a fraud flag
    Flag,
    /// Attach a document
    AttachDocument,
    /// Read the request
    View,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Process(phase) => write!(f, "process phase {phase}"),
            Self::Reject => write!(f, "reject requests"),
            Self::Flag => write!(f, "flag requests"),
            Self::AttachDocument => write!(f, "attach documents"),
            Self::View => write!(f, "view this request"),
        }
    }
}

/// Capability an action needs
#[must_use]
pub const fn required_capability(action: Action) -> Capability {
    match action {
        Action::Process(phase) if phase.is_institution_phase() => {
            Capability::ProcessInstitutionPhase
        },
        Action::Process(_) => Capability::ProcessRegulatorPhases,
        Action::Reject => Capability::RejectRequests,
        Action::Flag => Capability::FlagRequests,
        Action::AttachDocument => Capability::AttachDocuments,
        Action::View => Capability::ViewAllRequests,
    }
}

/// Decide whether `actor` may perform `action` on `request`
pub fn authorize(actor: &Actor, request: &VerificationRequest, action: Action) -> Result<()> {
    let denied = || WorkflowError::UnauthorizedRole {
        role: actor.role,
        action: action.to_string(),
    };

    if action == Action::View {
        return if has_capability(actor.role, Capability::ViewAllRequests)
            || actor.institution_id.as_deref().is_some_and(|id| request.involves(id))
        {
            Ok(())
        } else {
            Err(denied())
        };
    }

    if !has_capability(actor.role, required_capability(action)) {
        return Err(denied());
    }

    match action {
        // Phase 3 belongs to the target institution, and only once forwarded
        Action::Process(phase) if phase.is_institution_phase() => {
            if actor.belongs_to(&request.target_institution_id) && request.is_forwarded() {
                Ok(())
            } else {
                Err(denied())
            }
        },
        Action::AttachDocument if !has_capability(actor.role, Capability::ViewAllRequests) => {
            if actor.institution_id.as_deref().is_some_and(|id| request.involves(id)) {
                Ok(())
            } else {
                Err(denied())
            }
        },
        _ => Ok(()),
    }
}

/// Decide whether `actor` may perform an action that is not tied to a request
pub fn authorize_capability(actor: &Actor, capability: Capability) -> Result<()> {
    if has_capability(actor.role, capability) {
        Ok(())
    } else {
        Err(WorkflowError::UnauthorizedRole {
            role: actor.role,
            action: capability.to_string(),
        })
    }
}
