//! End-to-end lifecycle tests: a plugin pointed at fixture catalogs.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use twitch_adapter::catalog::SqliteCatalogs;
use twitch_adapter::launcher::LauncherSession;
use twitch_adapter::{
    AdapterConfig, HostNotifier, LocalGame, LocalGameState, OwnedGame, PluginLifecycle,
    TwitchPlugin,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Added(String),
    Removed(String),
    Status(String, LocalGameState),
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().expect("lock events"))
    }
}

impl HostNotifier for RecordingNotifier {
    fn game_added(&mut self, game: OwnedGame) {
        self.events
            .lock()
            .expect("lock events")
            .push(Event::Added(game.id));
    }

    fn game_removed(&mut self, game_id: &str) {
        self.events
            .lock()
            .expect("lock events")
            .push(Event::Removed(game_id.to_string()));
    }

    fn local_game_state_changed(&mut self, update: LocalGame) {
        self.events
            .lock()
            .expect("lock events")
            .push(Event::Status(update.id, update.state));
    }

    fn store_credentials(&mut self, _credentials: &str) {}
}

fn create_owned_db(path: &Path, rows: &[(&str, &str)]) {
    let conn = Connection::open(path).expect("create owned db");
    conn.execute(
        "create table DbSet (ProductIdStr text, ProductTitle text)",
        [],
    )
    .expect("create table");
    for (id, title) in rows {
        conn.execute("insert into DbSet values (?1, ?2)", [id, title])
            .expect("insert row");
    }
}

fn create_installed_db(path: &Path, rows: &[(&str, bool, &str)]) {
    let conn = Connection::open(path).expect("create installed db");
    conn.execute(
        "create table DbSet (Id text, Installed integer, InstallDirectory text)",
        [],
    )
    .expect("create table");
    for (id, installed, dir) in rows {
        conn.execute(
            "insert into DbSet values (?1, ?2, ?3)",
            rusqlite::params![id, installed, dir],
        )
        .expect("insert row");
    }
}

fn plugin_for(
    owned_db: &Path,
    installed_db: &Path,
) -> (TwitchPlugin<RecordingNotifier>, RecordingNotifier) {
    let config = AdapterConfig {
        owned_games_db: Some(owned_db.to_path_buf()),
        installed_games_db: Some(installed_db.to_path_buf()),
        ..AdapterConfig::default()
    };
    let notifier = RecordingNotifier::default();
    let plugin = TwitchPlugin::with_parts(
        config.clone(),
        LauncherSession::new(config),
        SqliteCatalogs::new(owned_db, installed_db),
        notifier.clone(),
    );
    (plugin, notifier)
}

#[tokio::test]
async fn owned_games_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let owned_db = dir.path().join("GameProductInfo.sqlite");
    let installed_db = dir.path().join("GameInstallInfo.sqlite");
    create_owned_db(&owned_db, &[("A", "Game A")]);
    create_installed_db(&installed_db, &[]);

    let (mut plugin, notifier) = plugin_for(&owned_db, &installed_db);
    plugin.handshake_complete();
    plugin.tick().await;
    assert_eq!(notifier.drain(), vec![Event::Added("A".to_string())]);

    // Removing the row emits exactly one removal on the next tick.
    let conn = Connection::open(&owned_db).expect("open owned db");
    conn.execute("delete from DbSet where ProductIdStr = 'A'", [])
        .expect("delete row");
    drop(conn);

    plugin.tick().await;
    assert_eq!(notifier.drain(), vec![Event::Removed("A".to_string())]);

    plugin.tick().await;
    assert!(notifier.drain().is_empty());

    plugin.shutdown().await;
}

#[tokio::test]
async fn installed_games_appear_with_the_installed_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let owned_db = dir.path().join("GameProductInfo.sqlite");
    let installed_db = dir.path().join("GameInstallInfo.sqlite");
    let game_dir = dir.path().join("games").join("a");
    std::fs::create_dir_all(&game_dir).expect("game dir");
    create_owned_db(&owned_db, &[]);
    create_installed_db(
        &installed_db,
        &[
            ("A", true, game_dir.to_str().expect("utf8 path")),
            ("B", true, ""),
        ],
    );

    let (mut plugin, notifier) = plugin_for(&owned_db, &installed_db);
    plugin.handshake_complete();
    plugin.tick().await;

    // B carries Installed=1 but no directory and must not surface.
    assert_eq!(
        notifier.drain(),
        vec![Event::Status("A".to_string(), LocalGameState::INSTALLED)]
    );
}

#[tokio::test]
async fn missing_catalogs_keep_ticks_alive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let owned_db = dir.path().join("GameProductInfo.sqlite");
    let installed_db = dir.path().join("GameInstallInfo.sqlite");
    create_owned_db(&owned_db, &[("A", "Game A")]);
    create_installed_db(&installed_db, &[]);

    let (mut plugin, notifier) = plugin_for(&owned_db, &installed_db);
    plugin.handshake_complete();
    plugin.tick().await;
    assert_eq!(notifier.drain(), vec![Event::Added("A".to_string())]);

    // Catalog vanishes mid-flight: the game is removed once, ticks go on.
    std::fs::remove_file(&owned_db).expect("remove owned db");
    plugin.tick().await;
    assert_eq!(notifier.drain(), vec![Event::Removed("A".to_string())]);
    plugin.tick().await;
    assert!(notifier.drain().is_empty());

    // Catalog comes back: the game is re-added.
    create_owned_db(&owned_db, &[("A", "Game A")]);
    plugin.tick().await;
    assert_eq!(notifier.drain(), vec![Event::Added("A".to_string())]);
}

#[test]
fn default_paths_are_unsupported_off_windows() {
    // Keyed off APPDATA/PROGRAMDATA; absent here, so the catalogs read as
    // unavailable and a tick sees empty snapshots rather than failing.
    if std::env::var_os("APPDATA").is_none() {
        assert_eq!(twitch_adapter::paths::owned_games_db(), None);
    }
    if std::env::var_os("PROGRAMDATA").is_none() {
        assert_eq!(twitch_adapter::paths::installed_games_db(), None);
        assert_eq!(twitch_adapter::paths::game_remover(), None);
    }
}
