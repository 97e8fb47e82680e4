//! KGCPSecret - kustomize exec plugin entry point
//!
//! Exit codes: 0 on success (and for `--help`/`--version`), 1 on usage
//! errors, 2 when the descriptor cannot be processed.

use std::process::ExitCode;

use clap::Parser;

use kgcpsecret_cli::{init_tracing, run, Cli, USAGE};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            eprintln!("{}", USAGE);
            return ExitCode::from(1);
        }
    };

    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(manifest) => {
            print!("{}", manifest);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
