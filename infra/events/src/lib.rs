//! # Event Bus
//!
//! A type-indexed, asynchronous event bus. Producers (the meter client) and
//! consumers (game sessions, health reporting) only share the event type.
//!
//! * **Broadcast**: fan-out; every subscriber sees every event. Slow
//!   subscribers skip ahead instead of blocking producers.
//! * **Watch**: latest value only; late subscribers immediately see the
//!   current state.
//!
//! # Example
//!
//! ```rust
//! use pm_event_bus::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Reading { watts: f64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<Reading>()?;
//!     bus.publish(Reading { watts: 42.0 })?;
//!
//!     let event = rx.recv().await.expect("bus is open");
//!     assert_eq!(event.watts, 42.0);
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
