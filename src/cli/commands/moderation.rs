//! Phase processing, rejection and flagging

use super::{Context, load_workflow};
use docverify::api::{self, FlagRequest, ProcessPhaseRequest, RejectRequest};
use docverify::output::Render;

/// Process the current phase of a request
///
/// A failed attempt is reported, not treated as an error.
pub fn process(id: &str, phase: u8, score: Option<u8>, ctx: &Context) -> anyhow::Result<()> {
    let workflow = load_workflow()?;
    let actor = ctx.actor()?;

    let req = ProcessPhaseRequest { phase, score };
    api::process_phase(&workflow, &actor, id, &req)?.render(ctx.mode);
    Ok(())
}

/// Reject a request
pub fn reject(id: &str, reason: &str, ctx: &Context) -> anyhow::Result<()> {
    let workflow = load_workflow()?;
    let actor = ctx.actor()?;

    let req = RejectRequest {
        reason: reason.to_string(),
    };
    api::reject_request(&workflow, &actor, id, &req)?.render(ctx.mode);
    Ok(())
}

/// Add a fraud flag to a request
pub fn flag(id: &str, flag: &str, ctx: &Context) -> anyhow::Result<()> {
    let workflow = load_workflow()?;
    let actor = ctx.actor()?;

    let req = FlagRequest {
        flag: flag.to_string(),
    };
    api::flag_request(&workflow, &actor, id, &req)?.render(ctx.mode);
    Ok(())
}
