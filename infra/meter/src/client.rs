use crate::payload::parse_wattage;
use pm_domain::config::MeterConfig;
use pm_domain::meter::{MeterStatus, PowerReading};
use pm_event_bus::EventBus;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, trace, warn};

const REQUEST_CAPACITY: usize = 10;

/// What a single broker event amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ingest {
    /// Connection acknowledged and the topic subscription queued.
    Subscribed,
    /// A reading was parsed and published on the bus.
    Reading(f64),
    /// A message was received but carried no usable reading.
    Skipped,
    /// Protocol traffic without meaning for ingest.
    Ignored,
}

/// Subscribes to the meter topic and republishes readings on the [`EventBus`].
///
/// Readings go out as broadcast [`PowerReading`] events; connection state is
/// kept in the [`MeterStatus`] watch channel.
#[derive(Debug, Clone)]
pub struct MeterClient {
    config: MeterConfig,
    events: EventBus,
}

impl MeterClient {
    #[must_use]
    pub const fn new(config: MeterConfig, events: EventBus) -> Self {
        Self { config, events }
    }

    fn options(&self) -> MqttOptions {
        let mut options =
            MqttOptions::new(&self.config.client_id, &self.config.host, self.config.port);
        options.set_keep_alive(Duration::from_secs(self.config.keep_alive_secs.max(5)));
        options
    }

    /// Runs the ingest loop until `shutdown` resolves.
    ///
    /// Connection failures are logged and retried after `reconnect_secs`.
    /// Returns immediately when the meter is disabled.
    #[instrument(skip_all, fields(host = %self.config.host, port = self.config.port, topic = %self.config.topic))]
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        if !self.config.enabled {
            info!("Meter ingest disabled");
            self.set_status(MeterStatus::Disabled);
            return;
        }

        let (client, mut eventloop) = AsyncClient::new(self.options(), REQUEST_CAPACITY);
        let reconnect = Duration::from_secs(self.config.reconnect_secs.max(1));
        self.set_status(MeterStatus::Connecting);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                event = eventloop.poll() => match event {
                    Ok(event) => {
                        self.handle_event(&client, &event);
                    },
                    Err(e) => {
                        warn!(error = %e, retry_in = ?reconnect, "MQTT connection error");
                        self.set_status(MeterStatus::Disconnected);
                        tokio::select! {
                            () = &mut shutdown => break,
                            () = tokio::time::sleep(reconnect) => self.set_status(MeterStatus::Connecting),
                        }
                    },
                },
            }
        }

        if let Err(e) = client.try_disconnect() {
            debug!(error = %e, "MQTT disconnect request not delivered");
        }
        self.set_status(MeterStatus::Disconnected);
        info!("Meter ingest stopped");
    }

    /// Reacts to one broker event: subscribes on every `ConnAck` and turns
    /// publishes into [`PowerReading`] events. Unparseable payloads are skipped.
    pub fn handle_event(&self, client: &AsyncClient, event: &Event) -> Ingest {
        match event {
            Event::Incoming(Packet::ConnAck(_)) => {
                info!("Connected to MQTT broker");
                self.set_status(MeterStatus::Connected);
                if let Err(e) = client.try_subscribe(&self.config.topic, QoS::AtMostOnce) {
                    warn!(error = %e, "Failed to queue topic subscription");
                }
                Ingest::Subscribed
            },
            Event::Incoming(Packet::Publish(publish)) => match parse_wattage(&publish.payload) {
                Ok(Some(watts)) => {
                    let delivered = self.events.publish(PowerReading { watts }).unwrap_or_default();
                    trace!(watts, delivered, "Meter reading");
                    Ingest::Reading(watts)
                },
                Ok(None) => {
                    debug!(topic = %publish.topic, "Active power code not found in payload");
                    Ingest::Skipped
                },
                Err(e) => {
                    warn!(error = %e, topic = %publish.topic, "Failed to parse meter payload");
                    Ingest::Skipped
                },
            },
            _ => Ingest::Ignored,
        }
    }

    fn set_status(&self, status: MeterStatus) {
        if let Err(e) = self.events.publish_watch(status) {
            warn!(error = %e, "Failed to publish meter status");
        }
    }
}
