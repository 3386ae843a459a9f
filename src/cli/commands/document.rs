//! Attach a document to a request

use super::{Context, load_workflow};
use docverify::api::{self, AttachDocumentRequest};
use docverify::output::Render;

/// Attach a document by name, declared type and size
pub fn document(
    id: &str,
    file_name: String,
    document_type: String,
    size_bytes: u64,
    ctx: &Context,
) -> anyhow::Result<()> {
    let workflow = load_workflow()?;
    let actor = ctx.actor()?;

    let req = AttachDocumentRequest {
        file_name,
        document_type,
        size_bytes,
    };
    api::attach_document(&workflow, &actor, id, &req)?.render(ctx.mode);
    Ok(())
}
