use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift reports`.
pub async fn handle(args: &ReportsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.require_project(&args.label).await?;
    let reports = ctx.service.list_reports(&project.id).await?;
    output(&reports, flags.format)
}
