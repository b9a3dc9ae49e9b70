//! The adapter itself: one struct the host drives through its lifecycle.

use galaxy_host_api::{HostNotifier, Identity, PluginLifecycle};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::auth;
use crate::catalog::{SqliteCatalogs, SqliteCookies};
use crate::config::AdapterConfig;
use crate::error::{InvalidCredentials, LauncherError};
use crate::launcher::{LauncherSession, SystemUrlOpener};
use crate::process::SystemProcessProbe;
use crate::reconcile::ReconcileEngine;

/// Adapter between the library host and the Twitch launcher.
///
/// The host serializes all calls; nothing here is internally synchronized.
/// Shutting down cancels any in-flight launcher wait.
pub struct TwitchPlugin<N: HostNotifier> {
    config: AdapterConfig,
    launcher: LauncherSession,
    catalogs: SqliteCatalogs,
    cookies: SqliteCookies,
    opener: SystemUrlOpener,
    probe: SystemProcessProbe,
    engine: ReconcileEngine,
    notifier: N,
    cancel: CancellationToken,
}

impl<N: HostNotifier> TwitchPlugin<N> {
    pub fn new(notifier: N) -> Self {
        Self::with_config(AdapterConfig::load(), notifier)
    }

    pub fn with_config(config: AdapterConfig, notifier: N) -> Self {
        let launcher = LauncherSession::new(config.clone());
        let catalogs = SqliteCatalogs::from_config(&config);
        Self::with_parts(config, launcher, catalogs, notifier)
    }

    /// Assembles a plugin from pre-built parts; the seam tests use to point
    /// the adapter at fixture catalogs.
    pub fn with_parts(
        config: AdapterConfig,
        launcher: LauncherSession,
        catalogs: SqliteCatalogs,
        notifier: N,
    ) -> Self {
        Self {
            config,
            launcher,
            catalogs,
            cookies: SqliteCookies,
            opener: SystemUrlOpener,
            probe: SystemProcessProbe::default(),
            engine: ReconcileEngine::new(),
            notifier,
            cancel: CancellationToken::new(),
        }
    }

    /// Derives the signed-in user's identity, or signals that sign-in is
    /// needed after nudging the launcher into view.
    pub async fn authenticate(&mut self) -> Result<Identity, InvalidCredentials> {
        let cancel = self.cancel.clone();
        auth::authenticate(
            &self.config,
            &mut self.launcher,
            &self.cookies,
            &self.opener,
            &mut self.notifier,
            &cancel,
        )
        .await
    }

    pub async fn launch_game(&mut self, game_id: &str) -> Result<(), LauncherError> {
        let cancel = self.cancel.clone();
        self.launcher.launch_game(game_id, &cancel).await
    }

    pub fn install_game(&self, game_id: &str) -> Result<(), LauncherError> {
        self.launcher.install_game(game_id)
    }

    pub fn uninstall_game(&self, game_id: &str) -> Result<(), LauncherError> {
        self.launcher.uninstall_game(game_id)
    }

    pub fn quit_launcher(&self) -> Result<(), LauncherError> {
        self.launcher.quit_launcher()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<N: HostNotifier> PluginLifecycle for TwitchPlugin<N> {
    fn handshake_complete(&mut self) {
        self.launcher.refresh_install_path();
        info!("adapter handshake complete");
    }

    async fn tick(&mut self) {
        self.launcher.refresh_install_path();
        self.engine
            .tick(&self.catalogs, &mut self.probe, &mut self.notifier);
    }

    async fn shutdown(&mut self) {
        self.cancel.cancel();
        info!("adapter shut down");
    }
}
