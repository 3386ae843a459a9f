//! Command implementations
//!
//! Every command loads the configuration, builds the workflow, calls the API
//! handler and renders its result.

mod document;
mod init;
mod institution;
mod moderation;
mod request;
#[cfg(feature = "server")]
mod serve;
mod status;

pub use document::document;
pub use init::init;
pub use institution::institution;
pub use moderation::{flag, process, reject};
pub use request::request;
#[cfg(feature = "server")]
pub use serve::serve;
pub use status::status;

use docverify::config::AppConfig;
use docverify::core::models::{Actor, Role};
use docverify::core::services::Workflow;
use docverify::output::OutputMode;

/// Global options shared by every command
#[derive(Debug)]
pub struct Context {
    /// Output mode
    pub mode: OutputMode,
    role: Option<Role>,
    institution: Option<String>,
}

impl Context {
    /// Capture the global options
    pub const fn new(mode: OutputMode, role: Option<Role>, institution: Option<String>) -> Self {
        Self {
            mode,
            role,
            institution,
        }
    }

    /// The caller named by `--role` and `--institution`
    pub fn actor(&self) -> anyhow::Result<Actor> {
        let Some(role) = self.role else {
            anyhow::bail!(
                "This command needs --role (regulator_admin, institution_user or platform_admin)"
            );
        };
        let actor = Actor::new(role, self.institution.clone());
        if role == Role::InstitutionUser && actor.institution_id.is_none() {
            anyhow::bail!("--institution is required with --role institution_user");
        }
        Ok(actor)
    }
}

/// Build the workflow described by the configuration in the data directory
pub fn load_workflow() -> anyhow::Result<Workflow> {
    Ok(AppConfig::load()?.workflow())
}
