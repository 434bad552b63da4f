use crate::report::{run_batch, run_rate, BatchArgs, RateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hse_rating::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "hse-rating-api",
    about = "Rate departmental safety KPIs from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rate a single JSON measurement set for one department
    Rate(RateArgs),
    /// Rate every row of a CSV measurement export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rate(args) => run_rate(args),
        Command::Batch(args) => run_batch(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["hse-rating-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_batch_arguments() {
        let cli = Cli::try_parse_from(["hse-rating-api", "batch", "--csv", "periods.csv", "--json"])
            .expect("parses");
        match cli.command {
            Some(Command::Batch(args)) => {
                assert_eq!(args.csv, PathBuf::from("periods.csv"));
                assert!(args.json);
            }
            other => panic!("expected batch command, got {other:?}"),
        }
    }

    #[test]
    fn rate_requires_a_department() {
        assert!(Cli::try_parse_from(["hse-rating-api", "rate"]).is_err());
    }
}
