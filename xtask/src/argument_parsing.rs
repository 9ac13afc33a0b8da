use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::ARMV7M;

/// Options shared by every command
pub struct Globals {
    /// Target triple the demo firmware is built for
    pub target: String,
    /// Keep the demo's debug build instead of the release one
    pub debug: bool,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// fastfunc xtask powered testing toolbox
pub struct Cli {
    /// For which target to build the demo firmware
    #[arg(short, long, default_value = ARMV7M)]
    pub target: String,

    /// Build the demo in debug mode instead of release
    #[arg(long)]
    pub debug: bool,

    /// Enable more verbose output, repeat up to `-vvv` for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand selecting operation
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn globals(&self) -> Globals {
        Globals {
            target: self.target.clone(),
            debug: self.debug,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the demo with and without `code-in-ram` and check where its functions landed
    Placement,

    /// Check that `#[fast_func]` without `code-in-ram` emits the same `.text` as no marker
    Noop,

    /// Check that RAM functions overflowing the RAM region fail the link
    Overflow,

    /// Run the demo in QEMU with and without `code-in-ram` and compare against expected output
    ///
    /// Expected output is matched against `demo/ci/expected/`
    Qemu(QemuArgs),

    /// Check the placement of function symbols in an ELF file
    ///
    /// Example: `cargo xtask inspect firmware.elf --fast on_tick --default helper`
    Inspect(InspectArgs),

    /// Run `placement`, `noop` and `overflow`
    All,
}

#[derive(Args, Debug)]
pub struct QemuArgs {
    /// If expected output is missing or mismatching, recreate the file
    #[arg(long)]
    pub overwrite_expected: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// ELF file to inspect
    pub elf: PathBuf,

    /// Symbol expected in the fast section, may be repeated
    #[arg(long = "fast", value_name = "SYMBOL")]
    pub fast: Vec<String>,

    /// Symbol expected in `.text`, may be repeated
    #[arg(long = "default", value_name = "SYMBOL")]
    pub default: Vec<String>,
}
