use serde::{Deserialize, Serialize};

/// Instantaneous power draw reported by the smart meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerReading {
    pub watts: f64,
}

/// Connection state of the meter ingest, published as a latest-value event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterStatus {
    #[default]
    Disabled,
    Connecting,
    Connected,
    Disconnected,
}
