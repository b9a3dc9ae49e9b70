//! Debug utility for inspecting the launcher's local state without a host.
//!
//! Read-only: resolves the install path, reads both catalogs and the
//! identity cookie, and prints what a tick would see. Never starts the
//! launcher.

use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use twitch_adapter::catalog::{read_install_records, read_owned_games, IDENTITY_COOKIE};
use twitch_adapter::launcher::LauncherSession;
use twitch_adapter::AdapterConfig;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = AdapterConfig::load();
    let args: Vec<String> = env::args().collect();
    if let Some(owned) = args.get(1) {
        config.owned_games_db = Some(PathBuf::from(owned));
    }
    if let Some(installed) = args.get(2) {
        config.installed_games_db = Some(PathBuf::from(installed));
    }

    println!("═══════════════════════════════════════════════════════════");
    println!("  Twitch Adapter Catalog Check");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    let mut session = LauncherSession::new(config.clone());
    session.refresh_install_path();

    println!("── Launcher ──────────────────────────────────────────────");
    match session.install_path() {
        Some(path) => println!("  install path: {}", path.display()),
        None => println!("  install path: (not found)"),
    }
    println!("  installed:    {}", session.is_installed());
    println!("  running:      {}", session.is_running());
    println!();

    println!("── Owned Games ───────────────────────────────────────────");
    match config.owned_catalog_path() {
        Some(path) => match read_owned_games(&path) {
            Ok(games) => {
                println!("  {} game(s) in {}", games.len(), path.display());
                for game in games {
                    println!("    {} → {}", game.id, game.title);
                }
            }
            Err(err) => println!("  read failed: {err}"),
        },
        None => println!("  (no catalog path on this platform)"),
    }
    println!();

    println!("── Installed Games ───────────────────────────────────────");
    match config.installed_catalog_path() {
        Some(path) => match read_install_records(&path) {
            Ok(records) => {
                println!("  {} record(s) in {}", records.len(), path.display());
                for record in records {
                    println!(
                        "    {} installed={} dir={}",
                        record.id,
                        record.installed,
                        record.install_dir.display()
                    );
                }
            }
            Err(err) => println!("  read failed: {err}"),
        },
        None => println!("  (no catalog path on this platform)"),
    }
    println!();

    println!("── Identity Cookie ───────────────────────────────────────");
    match session.cookies_db_path() {
        Some(store) if store.exists() => {
            use twitch_adapter::catalog::{CookieSource, SqliteCookies};
            match SqliteCookies.cookie(&store, IDENTITY_COOKIE) {
                Some(_) => println!("  {IDENTITY_COOKIE}: present"),
                None => println!("  {IDENTITY_COOKIE}: absent"),
            }
        }
        Some(store) => println!("  cookie store missing: {}", store.display()),
        None => println!("  cookie store path unknown"),
    }
}
