//! Windows install locator.
//!
//! The launcher registers no stable registry key of its own, so the locator
//! walks the uninstall list under both HKCU and HKLM and matches on the
//! display name.

use std::path::PathBuf;

use tracing::warn;
use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};
use winreg::RegKey;

use crate::launcher::LAUNCHER_DISPLAY_NAME;
use crate::locate::InstallLocator;

const UNINSTALL_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Uninstall";

/// Locates the launcher through the Windows uninstall registry.
#[derive(Debug, Clone)]
pub struct RegistryLocator {
    display_name: String,
}

impl Default for RegistryLocator {
    fn default() -> Self {
        Self {
            display_name: LAUNCHER_DISPLAY_NAME.to_string(),
        }
    }
}

impl InstallLocator for RegistryLocator {
    fn locate(&self) -> Option<PathBuf> {
        let roots = [
            RegKey::predef(HKEY_CURRENT_USER),
            RegKey::predef(HKEY_LOCAL_MACHINE),
        ];
        for root in &roots {
            match find_install_location(root, &self.display_name) {
                Ok(Some(path)) => return Some(path),
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, "failed to scan uninstall registry");
                }
            }
        }
        None
    }
}

fn find_install_location(root: &RegKey, display_name: &str) -> std::io::Result<Option<PathBuf>> {
    let apps = root.open_subkey(UNINSTALL_KEY)?;
    for app_key in apps.enum_keys().flatten() {
        // Individual entries are frequently unreadable or incomplete.
        let Ok(app) = apps.open_subkey(&app_key) else {
            continue;
        };
        let Ok(name) = app.get_value::<String, _>("DisplayName") else {
            continue;
        };
        if name != display_name {
            continue;
        }
        if let Ok(location) = app.get_value::<String, _>("InstallLocation") {
            let path = PathBuf::from(location);
            if path.exists() {
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}
