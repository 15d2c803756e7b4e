use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Install(args) => commands::install::handle(&args, ctx, flags).await,
        Commands::Show(args) => commands::show::handle(&args, ctx, flags).await,
        Commands::Reports(args) => commands::reports::handle(&args, ctx, flags).await,
        Commands::Validate(_) | Commands::Schema(_) => {
            unreachable!("validate/schema are pre-dispatched in main")
        }
    }
}
