mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use webaccel_api::WebAccelClient;

use crate::cli::{Cli, Command, SitesCommand};
use crate::commands::Ctx;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Offline commands: no credentials needed
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Sites(cli::SitesArgs {
            command: SitesCommand::Validate { kind, file },
        }) => commands::sites::validate(kind, &file, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "webaccel", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the API
        cmd => {
            let cfg = config::load_config()?;
            let resolved = config::resolve(&cli.global, &cfg)?;
            let client = WebAccelClient::new(
                resolved.api_url,
                resolved.access_token,
                resolved.access_token_secret,
                &resolved.transport,
            )
            .map_err(|e| CliError::from_api(e, None, &resolved.profile_name))?;

            let ctx = Ctx {
                client: &client,
                global: &cli.global,
                profile: &resolved.profile_name,
            };
            tracing::debug!(command = ?cmd, profile = %resolved.profile_name, "dispatching command");
            commands::dispatch(cmd, &ctx).await
        }
    }
}
