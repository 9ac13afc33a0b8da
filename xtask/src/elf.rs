//! Where did the linker put things
//!
//! Reads function symbols and section contents of a linked ELF file through
//! `object`. Nothing here knows about the demo: the expectations come from
//! the caller.

use std::{collections::BTreeMap, fmt::Write as _, fs, path::Path};

use anyhow::Context;
use object::{Object, ObjectSection, ObjectSymbol, SymbolKind};

use crate::TestRunError;

/// Default code section
pub const TEXT: &str = ".text";

/// A function expected in a given output section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation<'a> {
    pub symbol: &'a str,
    pub section: &'a str,
}

impl<'a> Expectation<'a> {
    pub fn new(symbol: &'a str, section: &'a str) -> Self {
        Self { symbol, section }
    }
}

/// A linked firmware image, loaded into memory
pub struct Elf {
    path: String,
    data: Vec<u8>,
}

impl Elf {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;

        Ok(Self {
            path: path.display().to_string(),
            data,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn parse(&self) -> anyhow::Result<object::File<'_>> {
        object::File::parse(&*self.data).with_context(|| format!("{} is not an object file", self.path))
    }

    /// Output section of every function symbol, by symbol name
    pub fn function_sections(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let file = self.parse()?;
        let mut sections = BTreeMap::new();

        for symbol in file.symbols() {
            if symbol.kind() != SymbolKind::Text {
                continue;
            }

            let Some(index) = symbol.section_index() else {
                continue;
            };

            let section = file.section_by_index(index)?;
            sections.insert(symbol.name()?.to_string(), section.name()?.to_string());
        }

        Ok(sections)
    }

    /// Contents of the output section `name`
    pub fn section_data(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let file = self.parse()?;
        let section = file
            .section_by_name(name)
            .with_context(|| format!("{} has no {name} section", self.path))?;

        Ok(section.data()?.to_vec())
    }

    /// Check every expectation, reporting the first one that doesn't hold
    pub fn check_placement(&self, expectations: &[Expectation<'_>]) -> anyhow::Result<()> {
        let sections = self.function_sections()?;

        for expectation in expectations {
            let got = sections.get(expectation.symbol);

            log::debug!(
                target: "xtask::elf",
                "{}: `{}` in {}",
                self.path,
                expectation.symbol,
                got.map_or("<missing>", String::as_str)
            );

            if got.map(String::as_str) != Some(expectation.section) {
                return Err(TestRunError::PlacementError {
                    file: self.path.clone(),
                    symbol: expectation.symbol.to_string(),
                    expected: expectation.section.to_string(),
                    got: got.cloned(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Require identical contents of `section` in both files
pub fn compare_sections(expected: &Elf, got: &Elf, section: &str) -> anyhow::Result<()> {
    let expected_data = expected.section_data(section)?;
    let got_data = got.section_data(section)?;

    if expected_data != got_data {
        log::error!(
            target: "xtask::elf",
            "{section} differs between {} and {}",
            expected.path(),
            got.path()
        );

        return Err(TestRunError::FileCmpError {
            expected: hexdump(&expected_data),
            got: hexdump(&got_data),
        }
        .into());
    }

    Ok(())
}

/// One line per 16 bytes, so differences diff well
pub fn hexdump(data: &[u8]) -> String {
    let mut out = String::new();

    for (n, line) in data.chunks(16).enumerate() {
        write!(out, "{:08x}:", n * 16).ok();
        for byte in line {
            write!(out, " {byte:02x}").ok();
        }
        out.push('\n');
    }

    out
}
