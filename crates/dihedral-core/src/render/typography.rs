use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tools that must both be present for typeset labels.
pub const TYPESETTING_TOOLS: [&str; 2] = ["latex", "dvipng"];

/// Label typography, decided once at startup from the host's tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Typography {
    /// Math-style labels (`φ (°)`), used when a TeX toolchain is installed.
    Typeset,
    /// ASCII labels, the fallback on hosts without TeX.
    #[default]
    Plain,
}

impl Typography {
    /// Searches `PATH` for the typesetting toolchain.
    pub fn detect() -> Self {
        let typography = match env::var_os("PATH") {
            Some(search_path) => Self::detect_in(&search_path),
            None => Self::Plain,
        };
        info!("Label typography: {:?}", typography);
        typography
    }

    /// Searches an explicit `PATH`-style search list.
    pub fn detect_in(search_path: &OsStr) -> Self {
        let missing: Vec<_> = TYPESETTING_TOOLS
            .iter()
            .filter(|tool| find_executable(tool, search_path).is_none())
            .collect();
        if missing.is_empty() {
            Self::Typeset
        } else {
            debug!("Typesetting tools not found: {:?}", missing);
            Self::Plain
        }
    }

    pub fn step_label(self) -> &'static str {
        "MC Cycle"
    }

    pub fn angle_label(self) -> &'static str {
        match self {
            Self::Typeset => "φ (°)",
            Self::Plain => "phi (deg)",
        }
    }
}

/// Finds `name` as an executable file in any directory of `search_path`.
pub fn find_executable(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    env::split_paths(search_path)
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut paths = vec![dir.join(name)];
    if cfg!(windows) {
        paths.push(dir.join(format!("{name}.exe")));
    }
    paths
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
