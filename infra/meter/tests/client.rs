use pm_domain::config::MeterConfig;
use pm_domain::meter::{MeterStatus, PowerReading};
use pm_event_bus::EventBus;
use pm_meter::{Ingest, MeterClient};
use rumqttc::{AsyncClient, ConnAck, ConnectReturnCode, Event, MqttOptions, Packet, Publish, QoS};

fn offline_client() -> AsyncClient {
    let (client, _eventloop) = AsyncClient::new(MqttOptions::new("test", "localhost", 1883), 10);
    client
}

fn publish(payload: &str) -> Event {
    Event::Incoming(Packet::Publish(Publish::new("meter/evt", QoS::AtMostOnce, payload)))
}

#[tokio::test]
async fn readings_are_fanned_out_in_watts() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<PowerReading>().unwrap();
    let mut second = bus.subscribe::<PowerReading>().unwrap();
    let meter = MeterClient::new(MeterConfig::default(), bus.clone());

    let outcome =
        meter.handle_event(&offline_client(), &publish(r#"{"reader_data":[{"1-0:1.7.0.255":0.42}]}"#));

    assert_eq!(outcome, Ingest::Reading(420.0));
    assert!((first.recv().await.unwrap().watts - 420.0).abs() < 1e-9);
    assert!((second.recv().await.unwrap().watts - 420.0).abs() < 1e-9);
}

#[tokio::test]
async fn unusable_payloads_are_skipped() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<PowerReading>().unwrap();
    let meter = MeterClient::new(MeterConfig::default(), bus.clone());
    let client = offline_client();

    assert_eq!(meter.handle_event(&client, &publish("{oops")), Ingest::Skipped);
    assert_eq!(meter.handle_event(&client, &publish(r#"{"reader_data":[]}"#)), Ingest::Skipped);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn connack_subscribes_and_marks_connected() {
    let bus = EventBus::new();
    let meter = MeterClient::new(MeterConfig::default(), bus.clone());
    let connack = Event::Incoming(Packet::ConnAck(ConnAck {
        session_present: false,
        code: ConnectReturnCode::Success,
    }));

    assert_eq!(meter.handle_event(&offline_client(), &connack), Ingest::Subscribed);
    assert_eq!(bus.latest::<MeterStatus>().as_deref(), Some(&MeterStatus::Connected));
    assert_eq!(meter.handle_event(&offline_client(), &Event::Incoming(Packet::PingResp)), Ingest::Ignored);
}

#[tokio::test]
async fn disabled_meter_returns_immediately() {
    let bus = EventBus::new();
    let config = MeterConfig { enabled: false, ..MeterConfig::default() };

    MeterClient::new(config, bus.clone()).run(std::future::pending()).await;

    assert_eq!(bus.latest::<MeterStatus>().as_deref(), Some(&MeterStatus::Disabled));
}

#[tokio::test(start_paused = true)]
async fn unreachable_broker_is_retried_until_shutdown() {
    let bus = EventBus::new();
    let config = MeterConfig {
        host: "127.0.0.1".to_owned(),
        port: 1,
        reconnect_secs: 1,
        ..MeterConfig::default()
    };

    let shutdown = tokio::time::sleep(std::time::Duration::from_secs(5));
    MeterClient::new(config, bus.clone()).run(shutdown).await;

    assert_eq!(bus.latest::<MeterStatus>().as_deref(), Some(&MeterStatus::Disconnected));
}
