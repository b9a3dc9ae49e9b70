//! OS process primitives: enumeration and detached spawning.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use sysinfo::{ProcessRefreshKind, System};

/// Enumerates running processes by executable path.
///
/// Used only to classify installed games as running; a game counts as
/// running when some process executable lives under its install directory.
pub trait ProcessProbe {
    fn running_executables(&mut self) -> Vec<PathBuf>;
}

/// Probe backed by the OS process table.
pub struct SystemProcessProbe {
    system: System,
}

impl Default for SystemProcessProbe {
    fn default() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl ProcessProbe for SystemProcessProbe {
    fn running_executables(&mut self) -> Vec<PathBuf> {
        self.system
            .refresh_processes_specifics(ProcessRefreshKind::new());
        self.system
            .processes()
            .values()
            .filter_map(|process| process.exe().map(Path::to_path_buf))
            .collect()
    }
}

/// Spawns helper processes detached from the adapter's own process tree.
pub trait ProcessSpawner: Send + Sync {
    fn spawn_detached(&self, exe: &Path, cwd: Option<&Path>, args: &[&str]) -> io::Result<()>;
}

/// Spawner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn_detached(&self, exe: &Path, cwd: Option<&Path>, args: &[&str]) -> io::Result<()> {
        let mut command = Command::new(exe);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            use windows_sys::Win32::System::Threading::{CREATE_NO_WINDOW, DETACHED_PROCESS};
            command.creation_flags(DETACHED_PROCESS | CREATE_NO_WINDOW);
        }
        command.spawn().map(drop)
    }
}
