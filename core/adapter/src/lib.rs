//! # twitch-adapter
//!
//! Library adapter that lets a game-library host discover, authenticate,
//! install, launch, and uninstall games owned through the Twitch launcher.
//!
//! The adapter implements no game logic of its own: it reads state the
//! launcher already persists (two SQLite catalogs and a browser-profile
//! cookie store) and issues OS-level actions back at the launcher (process
//! spawn, URI activation, window hiding, registry lookup). The interesting
//! parts are the [`reconcile::ReconcileEngine`], which diffs catalog
//! snapshots into minimal host notifications on every tick, and the
//! [`auth`] handshake, which derives a logical identity from the launcher's
//! session cookie.
//!
//! ## Design Principles
//!
//! - **Host-driven**: the host serializes `handshake_complete`/`tick`/
//!   `shutdown`; the adapter keeps no threads or internal locks.
//! - **Self-healing ticks**: catalog and probe failures degrade to empty
//!   reads and are logged; one bad cycle never poisons the next.
//! - **Swappable collaborators**: OS probes (registry, processes, windows,
//!   URI activation) sit behind traits with a no-op fallback per platform.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod launcher;
pub mod locate;
pub mod paths;
pub mod plugin;
pub mod process;
pub mod reconcile;
pub mod window;

#[cfg(windows)]
mod locate_windows;
#[cfg(windows)]
mod window_windows;

pub use config::AdapterConfig;
pub use error::{CatalogError, InvalidCredentials, LauncherError};
pub use plugin::TwitchPlugin;
pub use reconcile::ReconcileEngine;

// Re-export the host boundary so embedders need only this crate.
pub use galaxy_host_api::{
    HostNotifier, Identity, LocalGame, LocalGameState, OwnedGame, PluginLifecycle,
};
