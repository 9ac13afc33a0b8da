mod argument_parsing;
mod build;
mod cargo_command;
mod checks;
mod command;
mod elf;

use core::fmt;
use std::{error::Error, path::Path, process::ExitCode};

use anyhow::bail;
use clap::Parser;
use diffy::{create_patch, PatchFormatter};
use env_logger::Env;
use log::{error, info};

use crate::{
    argument_parsing::{Cli, Commands},
    build::init_build_dir,
    command::RunResult,
};

const ARMV7M: &str = "thumbv7m-none-eabi";

#[derive(Debug)]
pub enum TestRunError {
    FileCmpError {
        expected: String,
        got: String,
    },
    FileError {
        file: String,
    },
    PlacementError {
        file: String,
        symbol: String,
        expected: String,
        got: Option<String>,
    },
    CommandError(RunResult),
    UnexpectedSuccess(String),
}

impl fmt::Display for TestRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestRunError::FileCmpError { expected, got } => {
                let patch = create_patch(expected, got);
                writeln!(f, "Differing output in files.\n")?;
                let pf = PatchFormatter::new().with_color();
                writeln!(f, "{}", pf.fmt_patch(&patch))?;
                write!(
                    f,
                    "See flag --overwrite-expected to create/update expected output."
                )
            }
            TestRunError::FileError { file } => {
                write!(f, "File error on: {file}")
            }
            TestRunError::PlacementError {
                file,
                symbol,
                expected,
                got: Some(got),
            } => {
                write!(f, "{file}: `{symbol}` is in {got}, expected {expected}")
            }
            TestRunError::PlacementError {
                file,
                symbol,
                expected,
                got: None,
            } => {
                write!(
                    f,
                    "{file}: function `{symbol}` not found, expected it in {expected}"
                )
            }
            TestRunError::CommandError(e) => {
                write!(
                    f,
                    "Command failed with exit status {}: {} {}",
                    e.exit_status, e.stdout, e.stderr
                )
            }
            TestRunError::UnexpectedSuccess(command) => {
                write!(f, "{command} succeeded but was expected to fail")
            }
        }
    }
}

impl Error for TestRunError {}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_logger_default_level = match cli.verbose {
        0 => Env::default().default_filter_or("info"),
        1 => Env::default().default_filter_or("debug"),
        _ => Env::default().default_filter_or("trace"),
    };
    env_logger::Builder::from_env(env_logger_default_level)
        .format_module_path(false)
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => {
            info!("🎉 All checks passed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // if there's an `xtask` folder, we're *probably* at the root of this repo (we can't just
    // check the name of `env::current_dir()` because people might clone it into a different name)
    let probably_running_from_repo_root = Path::new("./xtask").exists();
    if !probably_running_from_repo_root {
        bail!("xtasks can only be executed from the root of the `fastfunc` repository");
    }

    let globals = cli.globals();

    match &cli.command {
        Commands::Placement => {
            init_build_dir()?;
            checks::placement(&globals)
        }
        Commands::Noop => {
            init_build_dir()?;
            checks::noop(&globals)
        }
        Commands::Overflow => {
            init_build_dir()?;
            checks::overflow(&globals)
        }
        Commands::Qemu(args) => checks::qemu(&globals, args.overwrite_expected),
        Commands::Inspect(args) => checks::inspect(args),
        Commands::All => {
            init_build_dir()?;
            checks::placement(&globals)?;
            checks::noop(&globals)?;
            checks::overflow(&globals)
        }
    }
}
