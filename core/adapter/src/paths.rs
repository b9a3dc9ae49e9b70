//! Well-known launcher file locations.
//!
//! The catalogs and the uninstaller helper live under Windows profile
//! directories. Resolution keys off the `APPDATA`/`PROGRAMDATA` environment
//! variables, so on platforms without them everything degrades to `None`
//! and the catalogs read as unavailable.

use std::env;
use std::path::PathBuf;

/// Owned-games catalog: `%APPDATA%/Twitch/Games/Sql/GameProductInfo.sqlite`.
pub fn owned_games_db() -> Option<PathBuf> {
    let appdata = env::var_os("APPDATA")?;
    Some(
        PathBuf::from(appdata)
            .join("Twitch")
            .join("Games")
            .join("Sql")
            .join("GameProductInfo.sqlite"),
    )
}

/// Installed-games catalog:
/// `%PROGRAMDATA%/Twitch/Games/Sql/GameInstallInfo.sqlite`.
pub fn installed_games_db() -> Option<PathBuf> {
    let programdata = env::var_os("PROGRAMDATA")?;
    Some(
        PathBuf::from(programdata)
            .join("Twitch")
            .join("Games")
            .join("Sql")
            .join("GameInstallInfo.sqlite"),
    )
}

/// Uninstaller helper:
/// `%PROGRAMDATA%/Twitch/Games/Uninstaller/TwitchGameRemover.exe`.
pub fn game_remover() -> Option<PathBuf> {
    let programdata = env::var_os("PROGRAMDATA")?;
    Some(
        PathBuf::from(programdata)
            .join("Twitch")
            .join("Games")
            .join("Uninstaller")
            .join("TwitchGameRemover.exe"),
    )
}
