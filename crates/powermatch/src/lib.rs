//! Facade crate for `PowerMatch` features and shared modules.
//! Re-exports domain/kernel primitives and wires the server-side services.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `powermatch` with the desired feature flags (`server`/`client`).
//! - Call `powermatch::server::init` to connect the database and prepare the
//!   event bus and the meter client.

pub use pm_domain as domain;
pub use pm_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub use pm_database::{Database, DatabaseError};
    pub use pm_event_bus::{EventBus, EventReceiverExt};
    pub use pm_game as game;
    pub use pm_kernel::server::{ApiState, system_router};
    pub use pm_meter::MeterClient;
    pub use pm_scores::{ScoreQuery, ScoreRepository};

    use crate::features;
    use pm_domain::config::ApiConfig;
    use tracing::info;

    /// Backends a server instance runs on.
    #[derive(Debug, Clone)]
    pub struct Platform {
        pub database: Database,
        pub events: EventBus,
        pub meter: MeterClient,
    }

    /// Connects the database and prepares the shared services.
    ///
    /// # Errors
    /// Returns an error if the database cannot be reached or its schema applied.
    pub async fn init(config: &ApiConfig) -> Result<Platform, DatabaseError> {
        let db = &config.database;
        let mut builder = Database::builder().url(&db.url).session(&db.namespace, &db.database);
        if let Some(credentials) = &db.credentials {
            builder = builder.auth(&credentials.username, &credentials.password);
        }
        let database = builder.init().await?;

        let events = EventBus::new();
        let meter = MeterClient::new(config.meter.clone(), events.clone());

        info!(features = ?features::ENABLED, "Platform initialized");
        Ok(Platform { database, events, meter })
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
        #[cfg(feature = "server")]
        "game",
        #[cfg(feature = "server")]
        "scores",
        #[cfg(feature = "server")]
        "meter",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::features::{ENABLED, is_enabled};

    #[test]
    fn registry_answers_for_listed_features_only() {
        assert!(ENABLED.iter().all(|name| is_enabled(name)));
        assert!(!is_enabled("unknown"));
        assert_eq!(is_enabled("server"), cfg!(feature = "server"));
    }
}
