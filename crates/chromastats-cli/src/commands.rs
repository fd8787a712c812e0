use super::args::{Cli, Commands};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(cli.config.as_deref(), cli.base_dir.as_deref(), cli.format)?;

    match cli.command {
        Commands::Normalize {
            path,
            output,
            in_place,
            compact,
        } => handlers::normalize::handle(&ctx, path, output, in_place, compact),

        Commands::Check { path } => handlers::check::handle(&ctx, path),

        Commands::Trace {
            path,
            query,
            partial,
            dependents,
        } => handlers::trace::handle(&ctx, path, query, partial, dependents),
    }
}
