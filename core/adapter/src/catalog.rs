//! Read-only access to the launcher's local catalogs.
//!
//! Both catalogs are SQLite files owned and concurrently written by the
//! external launcher process, so connections are opened read-only and every
//! failure is surfaced as a typed error for the caller to downgrade. This is
//! deliberately not a general query layer: each reader maps one known
//! statement to one row type.

use std::path::{Path, PathBuf};

use galaxy_host_api::OwnedGame;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::warn;

use crate::config::AdapterConfig;
use crate::error::CatalogError;

/// Name of the cookie carrying the signed-in user's identity payload.
pub const IDENTITY_COOKIE: &str = "twilight-user.desklight";

/// One row of the installed-games catalog.
///
/// `installed` is the catalog's own flag; the authoritative installed
/// predicate additionally requires a non-empty `install_dir` and is applied
/// by the reconciliation engine, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    pub id: String,
    pub installed: bool,
    pub install_dir: PathBuf,
}

/// The two catalogs the reconciliation engine polls.
pub trait CatalogSource {
    fn owned_games(&self) -> Result<Vec<OwnedGame>, CatalogError>;
    fn install_records(&self) -> Result<Vec<InstallRecord>, CatalogError>;
}

/// Catalog source backed by the launcher's SQLite files.
///
/// Paths are `None` on platforms where the launcher keeps no catalogs; reads
/// then fail with [`CatalogError::Unsupported`].
#[derive(Debug, Clone)]
pub struct SqliteCatalogs {
    owned_db: Option<PathBuf>,
    installed_db: Option<PathBuf>,
}

impl SqliteCatalogs {
    pub fn new(owned_db: impl Into<PathBuf>, installed_db: impl Into<PathBuf>) -> Self {
        Self {
            owned_db: Some(owned_db.into()),
            installed_db: Some(installed_db.into()),
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        Self {
            owned_db: config.owned_catalog_path(),
            installed_db: config.installed_catalog_path(),
        }
    }
}

impl CatalogSource for SqliteCatalogs {
    fn owned_games(&self) -> Result<Vec<OwnedGame>, CatalogError> {
        match &self.owned_db {
            Some(path) => read_owned_games(path),
            None => Err(CatalogError::Unsupported),
        }
    }

    fn install_records(&self) -> Result<Vec<InstallRecord>, CatalogError> {
        match &self.installed_db {
            Some(path) => read_install_records(path),
            None => Err(CatalogError::Unsupported),
        }
    }
}

/// Reads the owned-games catalog.
pub fn read_owned_games(path: &Path) -> Result<Vec<OwnedGame>, CatalogError> {
    let conn = open_read_only(path)?;
    owned_games_query(&conn).map_err(|source| CatalogError::Query {
        path: path.to_path_buf(),
        source,
    })
}

fn owned_games_query(conn: &Connection) -> Result<Vec<OwnedGame>, rusqlite::Error> {
    let mut stmt = conn.prepare("select ProductIdStr, ProductTitle from DbSet")?;
    let rows = stmt.query_map([], |row| {
        Ok(OwnedGame::new(
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
        ))
    })?;
    rows.collect()
}

/// Reads the installed-games catalog.
pub fn read_install_records(path: &Path) -> Result<Vec<InstallRecord>, CatalogError> {
    let conn = open_read_only(path)?;
    install_records_query(&conn).map_err(|source| CatalogError::Query {
        path: path.to_path_buf(),
        source,
    })
}

fn install_records_query(conn: &Connection) -> Result<Vec<InstallRecord>, rusqlite::Error> {
    let mut stmt = conn.prepare("select Id, Installed, InstallDirectory from DbSet")?;
    let rows = stmt.query_map([], |row| {
        Ok(InstallRecord {
            id: row.get::<_, String>(0)?,
            installed: row.get::<_, bool>(1)?,
            install_dir: PathBuf::from(row.get::<_, Option<String>>(2)?.unwrap_or_default()),
        })
    })?;
    rows.collect()
}

/// Looks up one named value from the launcher's cookie store.
pub trait CookieSource {
    /// `None` on absence or any underlying failure; cookie absence is the
    /// normal state before the user signs in.
    fn cookie(&self, store_path: &Path, name: &str) -> Option<String>;
}

/// Cookie source backed by the launcher's browser-profile cookie database.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteCookies;

impl CookieSource for SqliteCookies {
    fn cookie(&self, store_path: &Path, name: &str) -> Option<String> {
        match read_cookie(store_path, name) {
            Ok(value) => value,
            Err(err) => {
                warn!(cookie = name, error = %err, "cookie lookup failed");
                None
            }
        }
    }
}

fn read_cookie(store_path: &Path, name: &str) -> Result<Option<String>, CatalogError> {
    let conn = open_read_only(store_path)?;
    conn.query_row(
        "select value from cookies where name = ?1",
        [name],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map_err(|source| CatalogError::Query {
        path: store_path.to_path_buf(),
        source,
    })
}

fn open_read_only(path: &Path) -> Result<Connection, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::Unavailable(path.to_path_buf()));
    }
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| CatalogError::Query {
        path: path.to_path_buf(),
        source,
    })
}
