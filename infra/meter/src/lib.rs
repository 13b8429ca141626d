//! # Meter
//!
//! Smart-meter ingest. The meter publishes JSON status messages over MQTT;
//! [`MeterClient`] subscribes to them and republishes the active power draw as
//! [`PowerReading`](pm_domain::meter::PowerReading) events.
//!
//! ```rust
//! let payload = br#"{"reader_data":[{"1-0:1.7.0.255":"0.250"}]}"#;
//! assert_eq!(pm_meter::parse_wattage(payload).unwrap(), Some(250.0));
//! ```

mod client;
mod error;
mod payload;

pub use client::{Ingest, MeterClient};
pub use error::{MeterError, MeterErrorExt};
pub use payload::parse_wattage;
