use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::cargo_command::BuildMode;

const ELF_BUILD_ROOT: &str = "target/xtask/builds";

/// make sure we're starting with a clean, but existing slate
pub fn init_build_dir() -> anyhow::Result<()> {
    if Path::new(ELF_BUILD_ROOT).exists() {
        fs::remove_dir_all(ELF_BUILD_ROOT)
            .map_err(|_| anyhow::anyhow!("Could not clear out directory: {}", ELF_BUILD_ROOT))?;
    }
    fs::create_dir_all(ELF_BUILD_ROOT)
        .map_err(|_| anyhow::anyhow!("Could not create directory: {}", ELF_BUILD_ROOT))
}

/// Where a build of `bin` with `features` is kept for later inspection
///
/// Cargo overwrites the artifact on every build, whatever the features.
pub fn build_elfpath(bin: &str, features: Option<&str>, build_mode: BuildMode) -> PathBuf {
    let features = match features {
        Some(f) => f.replace(',', "+"),
        None => "default".to_string(),
    };

    let filename = format!("{bin}_{features}_{build_mode}.elf");

    let mut path = PathBuf::from(ELF_BUILD_ROOT);
    path.push(filename);
    path
}

/// Copy a fresh artifact to its `build_elfpath`
pub fn stash_elf(
    artifact: &Path,
    bin: &str,
    features: Option<&str>,
    build_mode: BuildMode,
) -> anyhow::Result<PathBuf> {
    let path = build_elfpath(bin, features, build_mode);

    fs::copy(artifact, &path).map_err(|e| {
        anyhow::anyhow!(
            "Could not copy {} to {}: {e}",
            artifact.display(),
            path.display()
        )
    })?;

    Ok(path)
}
