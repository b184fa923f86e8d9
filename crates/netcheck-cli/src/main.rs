//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, installs logging and routes to a handler.
//! Errors are logged once here and turned into the process exit code.

use std::process::ExitCode;

use clap::Parser;
use netcheck_cli::{Cli, Commands, bootstrap, exit_code_for, handlers, logging};
use netcheck_runtime::DefaultToolProbe;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.verbose, cli.log.as_deref()) {
        eprintln!("netcheck: {err}");
        return ExitCode::from(err.exit_code());
    }

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "netcheck failed");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::CheckDeps) => handlers::check_deps::execute(&DefaultToolProbe::new()),
        Some(Commands::ListChecks) => {
            let ctx = bootstrap(cli.to_config())?;
            handlers::list_checks::execute(ctx.registry())
        }
        None => {
            let ctx = bootstrap(cli.to_config())?;
            handlers::run::execute(&ctx).await?;

            if !ctx.config.batch {
                handlers::run::wait_for_exit(std::io::stdin().lock(), std::io::stdout())?;
            }
            Ok(())
        }
    }
}
