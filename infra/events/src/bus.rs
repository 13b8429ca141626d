use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::trace;

/// Default broadcast buffer. Meter readings arrive about once per second, so
/// this covers minutes of backlog for a stalled session.
const DEFAULT_CAPACITY: usize = 128;

/// Supported channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Fan-out; every subscriber receives every event.
    Broadcast { capacity: usize },
    /// Latest value only.
    Watch,
}

/// Marker trait for types that can travel over the [`EventBus`].
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct ChannelState {
    kind: ChannelKind,
    sender: Box<dyn Any + Send + Sync>,
}

impl ChannelState {
    fn broadcast<T: Event>(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
        Self { kind: ChannelKind::Broadcast { capacity }, sender: Box::new(tx) }
    }

    fn watch<T: Event>(initial: Arc<T>) -> Self {
        let (tx, _) = watch::channel::<Arc<T>>(initial);
        Self { kind: ChannelKind::Watch, sender: Box::new(tx) }
    }

    fn sender<S: Clone + 'static, T: Event>(&self) -> Result<S, EventBusError> {
        self.sender.downcast_ref::<S>().cloned().ok_or_else(|| EventBusError::TypeMismatch {
            message: type_name::<T>().into(),
            context: Some("Stored sender has an unexpected type".into()),
        })
    }
}

/// Thread-safe event bus; channels are created lazily per event type.
///
/// Cloning is cheap and every clone shares the same channels.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to broadcast events of type `T` (default capacity).
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is registered as a watch channel.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to broadcast events of type `T`, creating the channel with
    /// `capacity` if it does not exist yet. An existing channel keeps its capacity.
    ///
    /// # Errors
    /// [`EventBusError::InvalidCapacity`] for zero capacity,
    /// [`EventBusError::ChannelKindMismatch`] if `T` is a watch channel.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "capacity must be >= 1".into(),
                context: Some(type_name::<T>().into()),
            });
        }
        Ok(self.broadcast_sender::<T>(capacity)?.subscribe())
    }

    /// Subscribes to the watch channel of `T`, seeding it with `initial` if absent.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is a broadcast channel.
    pub fn subscribe_watch<T: Event>(
        &self,
        initial: T,
    ) -> Result<watch::Receiver<Arc<T>>, EventBusError> {
        Ok(self.watch_sender(Arc::new(initial))?.subscribe())
    }

    /// Broadcasts `event` and returns the number of subscribers that received it.
    ///
    /// Publishing without subscribers is not an error; the event is dropped.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is a watch channel.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        let sender = self.broadcast_sender::<T>(DEFAULT_CAPACITY)?;
        Ok(sender.send(Arc::new(event)).map_or_else(
            |_| {
                trace!(event = type_name::<T>(), "Event dropped: no active subscribers");
                0
            },
            |count| {
                trace!(event = type_name::<T>(), count, "Event dispatched");
                count
            },
        ))
    }

    /// Replaces the current value of the watch channel of `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is a broadcast channel.
    pub fn publish_watch<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        let event = Arc::new(event);
        self.watch_sender(event.clone())?.send_replace(event);
        Ok(())
    }

    /// Current value of the watch channel of `T`, if one exists.
    #[must_use]
    pub fn latest<T: Event>(&self) -> Option<Arc<T>> {
        let channels = self.channels.read();
        let state = channels.get(&TypeId::of::<T>())?;
        state.sender::<watch::Sender<Arc<T>>, T>().ok().map(|tx| tx.borrow().clone())
    }

    /// Drops every channel; pending receivers observe closure.
    ///
    /// Returns the number of channels that were closed.
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn broadcast_sender<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let requested = ChannelKind::Broadcast { capacity };
        self.channel::<T, _>(requested, || ChannelState::broadcast::<T>(capacity))
    }

    fn watch_sender<T: Event>(&self, initial: Arc<T>) -> Result<watch::Sender<Arc<T>>, EventBusError> {
        self.channel::<T, _>(ChannelKind::Watch, || ChannelState::watch::<T>(initial))
    }

    /// Returns the sender of type `S` for `T`, creating the channel with `init` if needed.
    fn channel<T: Event, S: Clone + 'static>(
        &self,
        requested: ChannelKind,
        init: impl FnOnce() -> ChannelState,
    ) -> Result<S, EventBusError> {
        let id = TypeId::of::<T>();

        if let Some(state) = self.channels.read().get(&id) {
            ensure_same_kind::<T>(state.kind, requested)?;
            return state.sender::<S, T>();
        }

        let mut channels = self.channels.write();
        let state = channels.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), kind = ?requested, "Initializing new event channel");
            init()
        });
        ensure_same_kind::<T>(state.kind, requested)?;
        state.sender::<S, T>()
    }
}

fn ensure_same_kind<T: Event>(existing: ChannelKind, requested: ChannelKind) -> Result<(), EventBusError> {
    let same = matches!(
        (existing, requested),
        (ChannelKind::Broadcast { .. }, ChannelKind::Broadcast { .. })
            | (ChannelKind::Watch, ChannelKind::Watch)
    );
    if same {
        Ok(())
    } else {
        Err(EventBusError::ChannelKindMismatch {
            message: format!("Expected {requested:?} but found {existing:?} for {}", type_name::<T>())
                .into(),
            context: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Level(u8);

    #[test]
    fn kinds_cannot_be_mixed() {
        let bus = EventBus::new();
        bus.publish_watch(Level(1)).unwrap();

        let err = bus.subscribe::<Level>().unwrap_err();
        assert!(matches!(err, EventBusError::ChannelKindMismatch { .. }));
    }

    #[test]
    fn latest_reads_watch_value() {
        let bus = EventBus::new();
        assert!(bus.latest::<Level>().is_none());

        bus.publish_watch(Level(3)).unwrap();
        bus.publish_watch(Level(4)).unwrap();
        assert_eq!(bus.latest::<Level>().as_deref(), Some(&Level(4)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let bus = EventBus::new();
        let err = bus.subscribe_with_capacity::<Level>(0).unwrap_err();
        assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
    }

    #[test]
    fn shutdown_reports_closed_channels() {
        let bus = EventBus::new();
        let _rx = bus.subscribe::<Level>().unwrap();
        bus.publish_watch(0_u64).unwrap();
        assert_eq!(bus.shutdown(), 2);
        assert_eq!(bus.shutdown(), 0);
    }
}
