//! Snapshot reconciliation between the launcher's catalogs and the host.
//!
//! On every tick the engine re-reads both catalogs, derives the local state
//! of each installed game, diffs against the previous snapshots, and emits
//! the minimal set of notifications: one removal, addition, or update per
//! observed change. Catalog failures are downgraded to an empty read here,
//! so a broken or missing catalog drains the host's view once and can never
//! abort a tick.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use galaxy_host_api::{HostNotifier, LocalGame, LocalGameState, OwnedGame};
use tracing::{debug, warn};

use crate::catalog::{CatalogSource, InstallRecord};
use crate::error::CatalogError;
use crate::process::ProcessProbe;

/// Holds the last successfully derived view of both catalogs.
#[derive(Debug, Default)]
pub struct ReconcileEngine {
    owned: HashMap<String, OwnedGame>,
    local: HashMap<String, LocalGameState>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl ReconcileEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one reconciliation pass.
    ///
    /// All removals are emitted before any addition or update, so a host
    /// maintaining a by-id view never observes a duplicate id within a
    /// tick. Both snapshots are replaced wholesale at the end; the next
    /// tick diffs against exactly what this one read.
    pub fn tick<C, P, N>(&mut self, catalogs: &C, probe: &mut P, notifier: &mut N)
    where
        C: CatalogSource + ?Sized,
        P: ProcessProbe + ?Sized,
        N: HostNotifier + ?Sized,
    {
        let fresh_owned: HashMap<String, OwnedGame> =
            or_empty("owned", catalogs.owned_games())
                .into_iter()
                .map(|game| (game.id.clone(), game))
                .collect();
        let records = or_empty("installed", catalogs.install_records());
        let running = probe.running_executables();
        let fresh_local = derive_local_state(records, &running);

        // Removals first.
        let mut removed_owned: Vec<&str> = self
            .owned
            .keys()
            .filter(|id| !fresh_owned.contains_key(*id))
            .map(String::as_str)
            .collect();
        removed_owned.sort_unstable();
        for id in removed_owned {
            notifier.game_removed(id);
        }

        let mut removed_local: Vec<&str> = self
            .local
            .keys()
            .filter(|id| !fresh_local.contains_key(*id))
            .map(String::as_str)
            .collect();
        removed_local.sort_unstable();
        for id in removed_local {
            notifier.local_game_state_changed(LocalGame::new(id, LocalGameState::NONE));
        }

        // Then additions.
        let mut added_owned: Vec<&OwnedGame> = fresh_owned
            .values()
            .filter(|game| !self.owned.contains_key(&game.id))
            .collect();
        added_owned.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        for game in added_owned {
            notifier.game_added(game.clone());
        }

        let mut added_local: Vec<(&str, LocalGameState)> = fresh_local
            .iter()
            .filter(|(id, _)| !self.local.contains_key(*id))
            .map(|(id, state)| (id.as_str(), *state))
            .collect();
        added_local.sort_unstable_by_key(|(id, _)| *id);
        for (id, state) in added_local {
            notifier.local_game_state_changed(LocalGame::new(id, state));
        }

        // Updates only where the observable state actually changed. Owned
        // games are immutable once read and have no update path.
        let mut updated_local: Vec<(&str, LocalGameState)> = fresh_local
            .iter()
            .filter(|(id, state)| {
                self.local.get(*id).is_some_and(|previous| previous != *state)
            })
            .map(|(id, state)| (id.as_str(), *state))
            .collect();
        updated_local.sort_unstable_by_key(|(id, _)| *id);
        for (id, state) in updated_local {
            notifier.local_game_state_changed(LocalGame::new(id, state));
        }

        debug!(
            owned = fresh_owned.len(),
            local = fresh_local.len(),
            "snapshots refreshed"
        );
        self.owned = fresh_owned;
        self.local = fresh_local;
        self.refreshed_at = Some(Utc::now());
    }

    pub fn owned_snapshot(&self) -> &HashMap<String, OwnedGame> {
        &self.owned
    }

    pub fn local_snapshot(&self) -> &HashMap<String, LocalGameState> {
        &self.local
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }
}

fn or_empty<T>(catalog: &str, result: Result<Vec<T>, CatalogError>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(CatalogError::Unsupported) => {
            debug!(catalog, "no catalog on this platform; reading as empty");
            Vec::new()
        }
        Err(err) => {
            warn!(catalog, error = %err, "catalog read failed; reading as empty");
            Vec::new()
        }
    }
}

/// Derives each game's local state from its catalog record and the process
/// table.
///
/// The catalog's own `Installed` flag is not trusted alone: a record with no
/// install directory is not installed. The running bit requires a process
/// executable under the game's install directory and never appears without
/// the installed bit.
fn derive_local_state(
    records: Vec<InstallRecord>,
    running_executables: &[PathBuf],
) -> HashMap<String, LocalGameState> {
    let mut local = HashMap::new();
    for record in records {
        if !record.installed || record.install_dir.as_os_str().is_empty() {
            continue;
        }
        let mut state = LocalGameState::INSTALLED;
        if running_executables
            .iter()
            .any(|exe| exe.starts_with(&record.install_dir))
        {
            state |= LocalGameState::RUNNING;
        }
        local.insert(record.id, state);
    }
    local
}
