//! Institution commands - register and list

use super::{Context, load_workflow};
use crate::cli::app::InstitutionAction;
use docverify::api::{self, RegisterInstitutionRequest};
use docverify::output::Render;

/// Handle institution subcommands
pub fn institution(action: InstitutionAction, ctx: &Context) -> anyhow::Result<()> {
    let workflow = load_workflow()?;

    match action {
        InstitutionAction::Add { id, name, kind } => {
            let actor = ctx.actor()?;
            let req = RegisterInstitutionRequest { id, name, kind };
            api::register_institution(&workflow, &actor, &req)?.render(ctx.mode);
        },
        InstitutionAction::List => api::list_institutions(&workflow)?.render(ctx.mode),
    }

    Ok(())
}
