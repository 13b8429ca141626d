/// Element id of the DOM anchor the client tree mounts into (`#app`).
pub const MOUNT_ANCHOR: &str = "app";

/// Ticks per round. One tick lasts one second by default.
pub const ROUND_TICKS: usize = 30;

/// OBIS code for instantaneous active power import, reported in kW.
pub const OBIS_ACTIVE_POWER: &str = "1-0:1.7.0.255";

pub const HEALTH_PATH: &str = "/health";
pub const GAME_SOCKET_PATH: &str = "/ws/game";
pub const HIGHSCORES_API_PATH: &str = "/api/highscores";
pub const ASSETS_PATH: &str = "/assets";

/// Player name recorded when the client does not send one.
pub const ANONYMOUS_PLAYER: &str = "Unknown";

pub const DEFAULT_HIGHSCORE_LIMIT: usize = 10;
pub const MAX_HIGHSCORE_LIMIT: usize = 100;
