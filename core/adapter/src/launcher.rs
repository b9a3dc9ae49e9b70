//! Launcher process control.
//!
//! `LauncherSession` owns the one piece of launcher state the adapter keeps
//! between ticks: the resolved install directory. Everything else is looked
//! up on demand through the platform collaborators (locator, window control,
//! spawner, URI opener), each behind a trait so the session is testable
//! without touching the OS.

use std::io;
use std::path::{Path, PathBuf};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::AdapterConfig;
use crate::error::LauncherError;
use crate::locate::{platform_locator, InstallLocator};
use crate::paths;
use crate::process::{ProcessSpawner, SystemSpawner};
use crate::window::{platform_window, LauncherWindow};

/// Display name the launcher registers under; also its window title.
pub const LAUNCHER_DISPLAY_NAME: &str = "Twitch";

/// URI scheme prefix for installing a game through the launcher.
const INSTALL_URI_PREFIX: &str = "twitch://fuel/";
/// URI scheme prefix for launching an installed game.
const LAUNCH_URI_PREFIX: &str = "twitch://fuel-launch/";

/// Opens a URL or URI with the OS default handler.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opener backed by the OS default-handler mechanism.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}

/// The subset of launcher control the authentication handshake needs.
#[allow(async_fn_in_trait)]
pub trait LauncherControl {
    fn is_installed(&self) -> bool;
    fn cookies_db_path(&self) -> Option<PathBuf>;
    async fn start_launcher(&mut self, cancel: &CancellationToken) -> Result<(), LauncherError>;
}

/// Knows where the launcher lives and how to drive it.
pub struct LauncherSession {
    install_path: Option<PathBuf>,
    locator: Box<dyn InstallLocator>,
    window: Box<dyn LauncherWindow>,
    spawner: Box<dyn ProcessSpawner>,
    opener: Box<dyn UrlOpener>,
    config: AdapterConfig,
}

impl LauncherSession {
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_parts(
            config,
            platform_locator(),
            platform_window(LAUNCHER_DISPLAY_NAME),
            Box::new(SystemSpawner),
            Box::new(SystemUrlOpener),
        )
    }

    pub fn with_parts(
        config: AdapterConfig,
        locator: Box<dyn InstallLocator>,
        window: Box<dyn LauncherWindow>,
        spawner: Box<dyn ProcessSpawner>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        Self {
            install_path: None,
            locator,
            window,
            spawner,
            opener,
            config,
        }
    }

    /// Re-probes the install directory when it is unknown or has vanished
    /// from disk. Cheap to call on every tick.
    pub fn refresh_install_path(&mut self) {
        let stale = match &self.install_path {
            Some(path) => !path.exists(),
            None => true,
        };
        if stale {
            self.install_path = self.locator.locate();
            match &self.install_path {
                Some(path) => debug!(path = %path.display(), "launcher install path resolved"),
                None => debug!("launcher install path not found"),
            }
        }
    }

    pub fn install_path(&self) -> Option<&Path> {
        self.install_path.as_deref()
    }

    fn launcher_exe(&self) -> Option<PathBuf> {
        self.install_path
            .as_ref()
            .map(|p| p.join("Bin").join("Twitch.exe"))
    }

    /// True iff the launcher's main executable exists at the resolved path.
    pub fn is_installed(&self) -> bool {
        self.launcher_exe().is_some_and(|exe| exe.exists())
    }

    /// Browser-profile cookie store under the install directory.
    pub fn cookies_db_path(&self) -> Option<PathBuf> {
        self.install_path
            .as_ref()
            .map(|p| p.join("Electron3").join("Cookies"))
    }

    /// True when the launcher's main window is present.
    pub fn is_running(&self) -> bool {
        self.window.is_present()
    }

    /// Starts the launcher and hides its window once it appears.
    ///
    /// No-op when the launcher is already running. The hide wait is bounded
    /// by the configured timeout and the cancellation token; on either the
    /// launcher is left running (and possibly visible) and the start still
    /// counts as successful.
    pub async fn start_launcher(&mut self, cancel: &CancellationToken) -> Result<(), LauncherError> {
        if self.is_running() {
            return Ok(());
        }
        let exe = self.launcher_exe().ok_or(LauncherError::NotInstalled)?;
        self.spawn(&exe, self.install_path.as_deref(), &[])?;

        let deadline = Instant::now() + self.config.hide_timeout();
        loop {
            if self.window.hide() {
                debug!("launcher window hidden");
                break;
            }
            if Instant::now() >= deadline {
                warn!("timed out waiting to hide the launcher window; leaving it visible");
                break;
            }
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("hide-window wait cancelled");
                    break;
                }
                _ = tokio::time::sleep(self.config.hide_poll_interval()) => {}
            }
        }
        Ok(())
    }

    /// Asks a running launcher to exit gracefully. No-op when not running.
    pub fn quit_launcher(&self) -> Result<(), LauncherError> {
        if !self.is_running() {
            return Ok(());
        }
        let exe = self.launcher_exe().ok_or(LauncherError::NotInstalled)?;
        self.spawn(&exe, self.install_path.as_deref(), &["/exit"])
    }

    /// Launches a game through the launcher's URI scheme, starting the
    /// launcher first when needed.
    pub async fn launch_game(
        &mut self,
        game_id: &str,
        cancel: &CancellationToken,
    ) -> Result<(), LauncherError> {
        if !self.is_running() {
            self.start_launcher(cancel).await?;
            // The launcher ignores launch commands sent immediately after
            // start; give it time to become receptive.
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = tokio::time::sleep(self.config.settle_delay()) => {}
            }
        }
        self.open_uri(&format!("{LAUNCH_URI_PREFIX}{game_id}"))
    }

    /// Starts a game install through the launcher's URI scheme.
    pub fn install_game(&self, game_id: &str) -> Result<(), LauncherError> {
        self.open_uri(&format!("{INSTALL_URI_PREFIX}{game_id}"))
    }

    /// Invokes the launcher's uninstaller helper for one game.
    pub fn uninstall_game(&self, game_id: &str) -> Result<(), LauncherError> {
        let remover = paths::game_remover().ok_or(LauncherError::UnsupportedPlatform)?;
        self.spawn(&remover, None, &["-m", "Game", "-p", game_id])
    }

    fn open_uri(&self, uri: &str) -> Result<(), LauncherError> {
        self.opener.open(uri).map_err(|source| LauncherError::OpenUri {
            uri: uri.to_string(),
            source,
        })
    }

    fn spawn(&self, exe: &Path, cwd: Option<&Path>, args: &[&str]) -> Result<(), LauncherError> {
        self.spawner
            .spawn_detached(exe, cwd, args)
            .map_err(|source| LauncherError::Spawn {
                exe: exe.to_path_buf(),
                source,
            })
    }
}

impl LauncherControl for LauncherSession {
    fn is_installed(&self) -> bool {
        LauncherSession::is_installed(self)
    }

    fn cookies_db_path(&self) -> Option<PathBuf> {
        LauncherSession::cookies_db_path(self)
    }

    async fn start_launcher(&mut self, cancel: &CancellationToken) -> Result<(), LauncherError> {
        LauncherSession::start_launcher(self, cancel).await
    }
}
