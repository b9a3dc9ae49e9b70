//! Error types for the adapter.
//!
//! Catalog and launcher failures are faults; `InvalidCredentials` is not.
//! It is the expected outcome of an unauthenticated user and callers branch
//! on it rather than reporting it as breakage.

use std::path::PathBuf;

/// Failure while reading one of the launcher's local catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog {0} does not exist")]
    Unavailable(PathBuf),

    #[error("catalog query against {path} failed: {source}")]
    Query {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("no catalog path is known on this platform")]
    Unsupported,
}

/// Failure while driving the launcher process.
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("the Twitch client is not installed")]
    NotInstalled,

    #[error("operation is not supported on this platform")]
    UnsupportedPlatform,

    #[error("failed to spawn {exe}: {source}")]
    Spawn {
        exe: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {uri}: {source}")]
    OpenUri {
        uri: String,
        #[source]
        source: std::io::Error,
    },
}

/// Control-flow signal: the user is not signed in to the launcher.
///
/// Every authentication failure collapses into this one signal so the host
/// can distinguish "sign in needed" from infrastructure faults. The internal
/// reason is logged at the point of failure.
#[derive(Debug, thiserror::Error)]
#[error("user is not signed in to the Twitch client")]
pub struct InvalidCredentials;
