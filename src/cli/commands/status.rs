//! Show request counts

use super::{Context, load_workflow};
use docverify::api;
use docverify::output::Render;

/// Print counts of the requests visible to the caller
pub fn status(ctx: &Context) -> anyhow::Result<()> {
    let workflow = load_workflow()?;
    let actor = ctx.actor()?;
    api::get_status(&workflow, &actor)?.render(ctx.mode);
    Ok(())
}
