use core::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildMode {
    Release,
    Debug,
}

impl BuildMode {
    #[allow(clippy::wrong_self_convention)]
    pub fn to_flag(&self) -> Option<&str> {
        match self {
            BuildMode::Release => Some("--release"),
            BuildMode::Debug => None,
        }
    }

    /// Profile directory below `target/<triple>/`
    pub fn dir(&self) -> &str {
        match self {
            BuildMode::Release => "release",
            BuildMode::Debug => "debug",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmd = match self {
            BuildMode::Release => "release",
            BuildMode::Debug => "debug",
        };

        write!(f, "{cmd}")
    }
}

/// Cargo invocations on a stand-alone firmware crate
#[derive(Debug)]
pub enum CargoCommand<'a> {
    Build {
        dir: &'a Path,
        target: &'a str,
        features: Option<String>,
        mode: BuildMode,
    },
    Qemu {
        dir: &'a Path,
        target: &'a str,
        features: Option<String>,
        mode: BuildMode,
    },
}

impl fmt::Display for CargoCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn feat(f: &Option<String>) -> String {
            if let Some(features) = f {
                format!("\"{features}\"")
            } else {
                "no features".to_string()
            }
        }

        match self {
            CargoCommand::Build {
                dir,
                target,
                features,
                mode,
            } => write!(
                f,
                "Build {} ({target}, {mode}, {})",
                dir.display(),
                feat(features)
            ),
            CargoCommand::Qemu {
                dir,
                target,
                features,
                mode,
            } => write!(
                f,
                "Run {} in QEMU ({target}, {mode}, {})",
                dir.display(),
                feat(features)
            ),
        }
    }
}

impl<'a> CargoCommand<'a> {
    fn command(&self) -> &'static str {
        match self {
            CargoCommand::Build { .. } => "build",
            CargoCommand::Qemu { .. } => "run",
        }
    }

    pub fn executable(&self) -> &'static str {
        "cargo"
    }

    pub fn chdir(&self) -> &Path {
        match self {
            CargoCommand::Build { dir, .. } | CargoCommand::Qemu { dir, .. } => dir,
        }
    }

    pub fn args(&self) -> Vec<&str> {
        match self {
            CargoCommand::Build {
                target,
                features,
                mode,
                ..
            }
            | CargoCommand::Qemu {
                target,
                features,
                mode,
                ..
            } => {
                let mut args = vec![self.command(), "--target", *target];

                if let Some(features) = features {
                    args.extend_from_slice(&["--features", features.as_str()]);
                }
                if let Some(flag) = mode.to_flag() {
                    args.push(flag);
                }
                args
            }
        }
    }

    /// The firmware image produced by this command
    pub fn artifact(&self, bin: &str) -> PathBuf {
        match self {
            CargoCommand::Build {
                dir, target, mode, ..
            }
            | CargoCommand::Qemu {
                dir, target, mode, ..
            } => dir.join("target").join(target).join(mode.dir()).join(bin),
        }
    }

    pub fn as_cmd_string(&self) -> String {
        let cd = if let Some(chdir) = self.chdir().to_str() {
            format!("cd {chdir} && ")
        } else {
            String::new()
        };

        let executable = self.executable();
        let args = self.args().join(" ");
        format!("{cd}{executable} {args}")
    }
}
