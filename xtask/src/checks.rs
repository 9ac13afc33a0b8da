use std::path::{Path, PathBuf};

use fastfunc::SECTION;

use crate::{
    argument_parsing::{Globals, InspectArgs},
    build::stash_elf,
    cargo_command::{BuildMode, CargoCommand},
    command::{run_command, run_successful, RunResult},
    elf::{compare_sections, Elf, Expectation, TEXT},
    TestRunError,
};

const TARGET: &str = "xtask::checks";

const DEMO_DIR: &str = "demo";
const DEMO_BIN: &str = "fastfunc-demo";

/// Marked functions of the demo
const MARKED: [&str; 2] = ["on_tick", "fir"];
/// Unmarked function of the demo
const UNMARKED: &str = "helper";

// rust-lld and GNU ld respectively
const OVERFLOW_DIAGNOSTICS: [&str; 2] = ["will not fit in region", "overflowed by"];

fn mode(globals: &Globals) -> BuildMode {
    if globals.debug {
        BuildMode::Debug
    } else {
        BuildMode::Release
    }
}

/// Build the demo and keep the resulting ELF file
fn build_demo(globals: &Globals, features: Option<&str>) -> anyhow::Result<Elf> {
    let mode = mode(globals);
    let command = CargoCommand::Build {
        dir: Path::new(DEMO_DIR),
        target: &globals.target,
        features: features.map(str::to_string),
        mode,
    };

    let result = run_command(&command)?;
    if !result.exit_status.success() {
        return Err(TestRunError::CommandError(result).into());
    }

    let path = stash_elf(&command.artifact(DEMO_BIN), DEMO_BIN, features, mode)?;
    Elf::read(&path)
}

/// Marked functions follow the flag, unmarked ones stay in `.text`
pub fn placement(globals: &Globals) -> anyhow::Result<()> {
    for (features, section) in [(None, TEXT), (Some("code-in-ram"), SECTION)] {
        let elf = build_demo(globals, features)?;

        let expectations: Vec<_> = MARKED
            .iter()
            .map(|symbol| Expectation::new(symbol, section))
            .chain([Expectation::new(UNMARKED, TEXT)])
            .collect();

        elf.check_placement(&expectations)?;

        log::info!(
            target: TARGET,
            "✅ {}: {} in {section}, {UNMARKED} in {TEXT}",
            elf.path(),
            MARKED.join(", ")
        );
    }

    Ok(())
}

/// Without `code-in-ram` the marker doesn't change a single byte of code
pub fn noop(globals: &Globals) -> anyhow::Result<()> {
    let marked = build_demo(globals, None)?;
    let unmarked = build_demo(globals, Some("unmarked"))?;

    compare_sections(&unmarked, &marked, TEXT)?;

    log::info!(
        target: TARGET,
        "✅ {TEXT} of {} and {} is identical",
        marked.path(),
        unmarked.path()
    );

    Ok(())
}

/// RAM functions that don't fit must fail the link, not get truncated
///
/// The same undersized RAM must hold the demo without `code-in-ram`, so the overflow can only
/// come from the marked functions.
pub fn overflow(globals: &Globals) -> anyhow::Result<()> {
    let control = build_demo(globals, Some("tiny-ram"))?;
    log::info!(target: TARGET, "✅ {} links without RAM functions", control.path());

    let command = CargoCommand::Build {
        dir: Path::new(DEMO_DIR),
        target: &globals.target,
        features: Some("code-in-ram,tiny-ram".to_string()),
        mode: mode(globals),
    };

    let result = run_command(&command)?;
    let diagnostic = overflow_diagnostic(&command, result)?;

    log::info!(target: TARGET, "✅ {command} failed to link: \"{diagnostic}\"");

    Ok(())
}

/// The linker diagnostic reporting a region overflow in `result`
fn overflow_diagnostic(
    command: &CargoCommand,
    result: RunResult,
) -> Result<&'static str, TestRunError> {
    if result.exit_status.success() {
        return Err(TestRunError::UnexpectedSuccess(command.to_string()));
    }

    OVERFLOW_DIAGNOSTICS
        .into_iter()
        .find(|diagnostic| result.stderr.contains(diagnostic))
        .ok_or(TestRunError::CommandError(result))
}

/// The demo behaves the same from flash and from RAM
pub fn qemu(globals: &Globals, overwrite: bool) -> anyhow::Result<()> {
    for (features, expected) in [(None, "default.run"), (Some("code-in-ram"), "code-in-ram.run")] {
        let command = CargoCommand::Qemu {
            dir: Path::new(DEMO_DIR),
            target: &globals.target,
            features: features.map(str::to_string),
            mode: mode(globals),
        };

        let expected_output_file: PathBuf = [DEMO_DIR, "ci", "expected", expected].iter().collect();

        let result = run_command(&command)?;
        run_successful(&result, &expected_output_file, overwrite)?;

        log::info!(target: TARGET, "✅ {command}");
    }

    Ok(())
}

pub fn inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let elf = Elf::read(&args.elf)?;

    if args.fast.is_empty() && args.default.is_empty() {
        // Nothing to check, list what's where
        for (symbol, section) in elf.function_sections()? {
            println!("{section:<16} {symbol}");
        }
        return Ok(());
    }

    let expectations: Vec<_> = args
        .fast
        .iter()
        .map(|symbol| Expectation::new(symbol, SECTION))
        .chain(args.default.iter().map(|symbol| Expectation::new(symbol, TEXT)))
        .collect();

    elf.check_placement(&expectations)?;

    log::info!(
        target: TARGET,
        "✅ {}: {} symbol(s) where expected",
        elf.path(),
        expectations.len()
    );

    Ok(())
}
