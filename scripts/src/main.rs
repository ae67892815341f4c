use std::{io, process::ExitCode};

use clap::Parser;
use nft_scripts::{
    cli::{usage_error_status, Cli},
    commands::report_outcome,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` is optional
    dotenv::dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout, usage errors to stderr
            let _ = e.print();
            return ExitCode::from(usage_error_status(&e));
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nft_scripts=info")),
        )
        .with_writer(io::stderr)
        .init();

    let outcome = cli.run(&mut io::stdout()).await;
    ExitCode::from(report_outcome(outcome, &mut io::stderr()))
}
