use std::process::ExitCode;

use clap::Parser;
use switchboard_cli::Cli;
use switchboard_core::{ConfigError, FlagError, StoreError, SwitchboardErrorCode};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match switchboard_cli::run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match error_code(&e) {
                Some(code) => eprintln!("error[{code}]: {e:#}"),
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn error_code(e: &anyhow::Error) -> Option<&'static str> {
    e.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<FlagError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<StoreError>() {
            Some(e.error_code())
        } else {
            cause.downcast_ref::<ConfigError>().map(|e| e.error_code())
        }
    })
}
