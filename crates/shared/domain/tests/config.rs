use pm_domain::config::{ApiConfig, BuildConfig, DatabaseConfig, GameConfig, MeterConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 8000);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert!(db.credentials.is_none());

    let meter = MeterConfig::default();
    assert_eq!(meter.port, 1883);
    assert_eq!(meter.keep_alive_secs, 60);

    assert_eq!(GameConfig::default().tick_millis, 1000);

    let build = BuildConfig::default();
    assert_eq!(build.base_path, "/");
    assert_eq!(build.plugins, vec!["dioxus".to_owned()]);
}

#[test]
fn api_config_deserializes_partial_sections() {
    let raw = json!({
        "server": { "address": "::", "port": 9000 },
        "meter": { "enabled": false, "host": "broker.local" },
        "build": { "dist_dir": "/srv/powermatch" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 9000);
    assert!(!cfg.meter.enabled);
    assert_eq!(cfg.meter.host, "broker.local");
    assert_eq!(cfg.meter.port, 1883);
    assert_eq!(cfg.build.base_path, "/");
    assert_eq!(cfg.build.dist_dir, std::path::PathBuf::from("/srv/powermatch"));
    assert_eq!(cfg.game.tick_millis, 1000);
}

#[test]
fn api_config_clones_share_until_mutated() {
    let original = ApiConfig::default();
    let mut tweaked = original.clone();
    tweaked.server.port = 1234;

    assert_eq!(original.server.port, 8000);
    assert_eq!(tweaked.server.port, 1234);
}
