use tabshare::cli::Cli;
use tabshare::commands::run;
use tabshare::logger::initialize as LoggerInitialize;

use std::io::{stdin, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{error, warn};
use tokio::signal::ctrl_c;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggerInitialize(&cli.log_options()) {
        eprintln!("tabshare: {}", e.user_message());
        return ExitCode::FAILURE;
    }

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                cancel.cancel();
            }
        }
    });

    let result = run(cli, stdin(), &mut stdout(), &cancel).await;
    interrupt.abort();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("tabshare: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
