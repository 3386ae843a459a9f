//! Request commands - create, list, show

use super::{Context, load_workflow};
use crate::cli::app::RequestAction;
use docverify::api::{self, CreateVerificationRequest, ListRequestsQuery};
use docverify::output::Render;

/// Handle request subcommands
pub fn request(action: RequestAction, ctx: &Context) -> anyhow::Result<()> {
    let workflow = load_workflow()?;
    let actor = ctx.actor()?;

    match action {
        RequestAction::Create {
            target,
            requesting,
            student_name,
            student_id,
            program,
            graduated,
            verification_type,
            priority,
            purpose,
            notes,
        } => {
            let req = CreateVerificationRequest {
                target_institution: target,
                requesting_institution: requesting,
                student_name,
                student_id,
                program_name: program,
                graduation_date: graduated,
                verification_type,
                priority_level: priority,
                purpose,
                notes,
            };
            api::create_request(&workflow, &actor, &req)?.render(ctx.mode);
        },
        RequestAction::List {
            status,
            requesting,
            target,
        } => {
            let query = ListRequestsQuery {
                status,
                requesting,
                target,
            };
            api::list_requests(&workflow, &actor, &query)?.render(ctx.mode);
        },
        RequestAction::Show { id } => api::get_request(&workflow, &actor, &id)?.render(ctx.mode),
    }

    Ok(())
}
