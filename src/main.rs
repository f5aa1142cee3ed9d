use std::process::ExitCode;

use clap::Parser;
use rebook::adapter::inbound::cli::command::{Cli, Commands};
use rebook::adapter::inbound::cli::output::{self, OutputConfig};
use rebook::adapter::inbound::cli::{check, once, run};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let result = match &cli.command {
        Commands::Run(args) => run::execute(&args.config).await.map(|()| true),
        Commands::Once(args) => once::execute(&args.config)
            .await
            .map(|outcome| outcome.is_success()),
        Commands::Check(args) => check::execute(&args.config).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::from(2)
        }
    }
}
