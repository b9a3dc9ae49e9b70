//! Types and traits shared between the library host and its adapters.
//!
//! This crate is the boundary contract: the host consumes the notification
//! surface defined here and drives adapters through [`PluginLifecycle`].
//! Adapters never talk to the host any other way, which keeps the two sides
//! free to evolve independently without schema drift.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// Game Types
// ═══════════════════════════════════════════════════════════════════════════════

/// License attached to an owned game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseKind {
    SinglePurchase,
    FreeToPlay,
    Subscription,
}

/// A game the user owns according to the launcher's product catalog.
///
/// Keyed by `id`; immutable once read. The adapter replaces its owned-games
/// view wholesale on every poll rather than patching individual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub id: String,
    pub title: String,
    pub license: LicenseKind,
}

impl OwnedGame {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            license: LicenseKind::SinglePurchase,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Local Game State
// ═══════════════════════════════════════════════════════════════════════════════

/// Installation/running status of a game on this machine.
///
/// A small set of flags combined with `|`: a game can be `INSTALLED`,
/// `INSTALLED | RUNNING`, or `NONE`. Adapters never report `RUNNING` on its
/// own; the running bit only decorates an installed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalGameState(u8);

impl LocalGameState {
    pub const NONE: Self = Self(0);
    pub const INSTALLED: Self = Self(1);
    pub const RUNNING: Self = Self(1 << 1);

    /// True when every flag in `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LocalGameState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LocalGameState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LocalGameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut sep = "";
        if self.contains(Self::INSTALLED) {
            write!(f, "installed")?;
            sep = "+";
        }
        if self.contains(Self::RUNNING) {
            write!(f, "{sep}running")?;
        }
        Ok(())
    }
}

/// A game's local status as reported to the host.
///
/// `state == NONE` tells the host the game is no longer present locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalGame {
    pub id: String,
    pub state: LocalGameState,
}

impl LocalGame {
    pub fn new(id: impl Into<String>, state: LocalGameState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════════════

/// Logical user identity derived from the launcher's session.
///
/// Transient: the adapter derives it on demand and does not persist it.
/// Credential persistence, if any, is the host's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Host Surface
// ═══════════════════════════════════════════════════════════════════════════════

/// Callbacks the host exposes to adapters.
///
/// The adapter emits at most one notification per observed change; the host
/// can maintain a derived library view keyed by id without deduplication.
pub trait HostNotifier {
    fn game_added(&mut self, game: OwnedGame);
    fn game_removed(&mut self, game_id: &str);
    fn local_game_state_changed(&mut self, update: LocalGame);

    /// Hands the host an opaque credential blob to persist on the adapter's
    /// behalf. The adapter itself never stores credentials.
    fn store_credentials(&mut self, credentials: &str);
}

/// Host-driven lifecycle of one adapter instance.
///
/// The host serializes these calls; none of them run concurrently for the
/// same adapter. `tick` fires on a fixed host-controlled interval.
#[allow(async_fn_in_trait)]
pub trait PluginLifecycle {
    /// Called once after the host/adapter handshake settles.
    fn handshake_complete(&mut self);

    /// One polling cycle. Must never fail: an adapter contains its own
    /// errors so a bad cycle cannot take later cycles down with it.
    async fn tick(&mut self);

    /// Called once before the host unloads the adapter.
    async fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_flags_combine_with_bitor() {
        let state = LocalGameState::INSTALLED | LocalGameState::RUNNING;
        assert!(state.contains(LocalGameState::INSTALLED));
        assert!(state.contains(LocalGameState::RUNNING));
        assert_ne!(state, LocalGameState::INSTALLED);
    }

    #[test]
    fn none_contains_nothing_but_itself() {
        assert!(LocalGameState::NONE.is_empty());
        assert!(LocalGameState::NONE.contains(LocalGameState::NONE));
        assert!(!LocalGameState::NONE.contains(LocalGameState::INSTALLED));
    }

    #[test]
    fn bitor_assign_accumulates_flags() {
        let mut state = LocalGameState::INSTALLED;
        state |= LocalGameState::RUNNING;
        assert_eq!(state, LocalGameState::INSTALLED | LocalGameState::RUNNING);
    }

    #[test]
    fn display_names_the_set_bits() {
        assert_eq!(LocalGameState::NONE.to_string(), "none");
        assert_eq!(LocalGameState::INSTALLED.to_string(), "installed");
        assert_eq!(
            (LocalGameState::INSTALLED | LocalGameState::RUNNING).to_string(),
            "installed+running"
        );
    }

    #[test]
    fn owned_game_defaults_to_single_purchase() {
        let game = OwnedGame::new("a", "Game A");
        assert_eq!(game.license, LicenseKind::SinglePurchase);
    }
}
