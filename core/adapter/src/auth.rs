//! Authentication handshake against the launcher's session cookie.
//!
//! The adapter cannot sign the user in; it can only read the identity the
//! launcher already persisted. Every failure therefore collapses into the
//! same recoverable signal, and the recovery action is to put the launcher
//! in front of the user: open the download page when it is not installed at
//! all, start it so the user can sign in otherwise.

use galaxy_host_api::{HostNotifier, Identity};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::catalog::{CookieSource, IDENTITY_COOKIE};
use crate::config::AdapterConfig;
use crate::error::InvalidCredentials;
use crate::launcher::{LauncherControl, UrlOpener};

/// Identity payload carried by the launcher's session cookie.
#[derive(Debug, Default, Deserialize)]
struct UserInfoCookie {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
}

/// Derives the signed-in user's identity from the launcher's cookie store.
///
/// On success the raw cookie value is handed to the host as opaque
/// credential state; the adapter keeps nothing.
pub async fn authenticate<L, C, U, N>(
    config: &AdapterConfig,
    launcher: &mut L,
    cookies: &C,
    opener: &U,
    notifier: &mut N,
    cancel: &CancellationToken,
) -> Result<Identity, InvalidCredentials>
where
    L: LauncherControl,
    C: CookieSource + ?Sized,
    U: UrlOpener + ?Sized,
    N: HostNotifier + ?Sized,
{
    if !launcher.is_installed() {
        warn!("Twitch client is not installed");
        if let Err(err) = opener.open(&config.downloads_url) {
            warn!(error = %err, "failed to open the downloads page");
        }
        return Err(InvalidCredentials);
    }

    match read_identity(launcher, cookies) {
        Some((identity, raw_cookie)) => {
            notifier.store_credentials(&raw_cookie);
            info!(user_id = %identity.user_id, "authenticated from launcher session");
            Ok(identity)
        }
        None => {
            // The user is not signed in; bring the launcher up so they can.
            if let Err(err) = launcher.start_launcher(cancel).await {
                warn!(error = %err, "failed to start the Twitch client");
            }
            Err(InvalidCredentials)
        }
    }
}

fn read_identity<L, C>(launcher: &L, cookies: &C) -> Option<(Identity, String)>
where
    L: LauncherControl,
    C: CookieSource + ?Sized,
{
    let store = match launcher.cookies_db_path() {
        Some(path) if path.exists() => path,
        _ => {
            warn!("cookie store not found");
            return None;
        }
    };

    let raw = match cookies.cookie(&store, IDENTITY_COOKIE) {
        Some(value) if !value.is_empty() => value,
        _ => {
            warn!("identity cookie missing or empty");
            return None;
        }
    };

    match parse_identity(&raw) {
        Some(identity) => Some((identity, raw)),
        None => {
            warn!("identity cookie carries no usable id/display name");
            None
        }
    }
}

/// URL-decodes and parses the cookie payload; `None` unless both the id and
/// the display name are present and non-empty.
fn parse_identity(raw: &str) -> Option<Identity> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    let info: UserInfoCookie = serde_json::from_str(&decoded).ok()?;
    let user_id = info.id.filter(|id| !id.is_empty())?;
    let display_name = info.display_name.filter(|name| !name.is_empty())?;
    Some(Identity {
        user_id,
        display_name,
    })
}
