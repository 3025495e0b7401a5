use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    event::DeviceEvent,
    observer::{PowerManagerObserver, SessionManagerObserver},
    queue::EventQueue,
};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Producer of device events
///
/// Implemented by the daemon's device/disk change detector (e.g. a udev
/// monitor). Polled by [`EventModerator::process_device_events()`].
pub trait EventSource {
    /// Poll for the next pending event
    ///
    /// Returns `Ok(None)` when nothing is pending, which is a normal and
    /// frequent condition, not a failure. Must not block: a blocking
    /// implementation would stall the moderator's single-threaded control
    /// flow.
    fn poll_device_event(&mut self) -> Result<Option<DeviceEvent>, SourceError>;
}

impl<S> EventSource for &mut S
where
    S: EventSource + ?Sized,
{
    fn poll_device_event(&mut self) -> Result<Option<DeviceEvent>, SourceError> {
        (**self).poll_device_event()
    }
}

impl<S> EventSource for Box<S>
where
    S: EventSource + ?Sized,
{
    fn poll_device_event(&mut self) -> Result<Option<DeviceEvent>, SourceError> {
        (**self).poll_device_event()
    }
}

/// Wraps an [`EventSource`] as a boxed trait object
pub type EventSourceBoxed = Box<dyn EventSource + Send + 'static>;

/// Consumer of dispatched device events
///
/// Performs the actual side effect of an event, e.g. notifying the mount
/// or UI logic. Dispatching is fire-and-forget: any failure handling is
/// the dispatcher's own responsibility and fully opaque to the moderator.
pub trait EventDispatcher {
    fn dispatch_device_event(&mut self, event: &DeviceEvent);
}

impl<D> EventDispatcher for &mut D
where
    D: EventDispatcher + ?Sized,
{
    fn dispatch_device_event(&mut self, event: &DeviceEvent) {
        (**self).dispatch_device_event(event);
    }
}

impl<D> EventDispatcher for Box<D>
where
    D: EventDispatcher + ?Sized,
{
    fn dispatch_device_event(&mut self, event: &DeviceEvent) {
        (**self).dispatch_device_event(event);
    }
}

/// Wraps an [`EventDispatcher`] as a boxed trait object
pub type EventDispatcherBoxed = Box<dyn EventDispatcher + Send + 'static>;

/// Session-aware moderator between an event source and a dispatcher
///
/// Operates in one of two modes, tracked by a single flag:
///
/// - *Queuing* (`is_event_queued() == true`): polled events are buffered
///   in a FIFO queue instead of being forwarded.
/// - *Dispatching* (`is_event_queued() == false`): polled events are
///   forwarded to the dispatcher immediately.
///
/// Lock and session-stop notifications switch to queuing; unlock and
/// session-start notifications flush the queue in FIFO order and switch
/// to dispatching. A freshly constructed moderator starts out queuing:
/// until the first unlock or session-start signal arrives the session
/// state is unknown and buffering is the conservative choice. This keeps
/// a device plugged into a locked machine from triggering any downstream
/// action before someone authenticates.
///
/// Single-threaded by design: all methods must be invoked serialized from
/// the owning event loop. No method blocks, and the work per call is
/// bounded by the current queue length.
#[allow(missing_debug_implementations)]
pub struct EventModerator<D, S> {
    dispatcher: D,

    source: S,

    event_queue: EventQueue,

    is_event_queued: bool,
}

impl<D, S> EventModerator<D, S>
where
    D: EventDispatcher,
    S: EventSource,
{
    #[must_use]
    pub fn new(dispatcher: D, source: S) -> Self {
        Self {
            dispatcher,
            source,
            event_queue: EventQueue::new(),
            is_event_queued: true,
        }
    }

    /// Whether polled events are currently buffered instead of dispatched
    #[must_use]
    pub fn is_event_queued(&self) -> bool {
        self.is_event_queued
    }

    /// Number of buffered events awaiting dispatch
    #[must_use]
    pub fn queued_event_count(&self) -> usize {
        self.event_queue.len()
    }

    /// Pull all currently available events from the source
    ///
    /// Each polled event is either buffered (queuing mode) or forwarded to
    /// the dispatcher immediately (dispatching mode). Polling stops when
    /// the source reports nothing pending. A source error also ends the
    /// batch: it is logged and otherwise treated like an exhausted source,
    /// with no retry within the same call.
    pub fn process_device_events(&mut self) {
        loop {
            match self.source.poll_device_event() {
                Ok(Some(event)) => {
                    if self.is_event_queued {
                        debug!("Queuing device event: {event}");
                        self.event_queue.add(event);
                    } else {
                        debug!("Dispatching device event: {event}");
                        self.dispatcher.dispatch_device_event(&event);
                    }
                }
                Ok(None) => {
                    break;
                }
                Err(err) => {
                    warn!("Failed to poll device event: {err}");
                    break;
                }
            }
        }
    }

    /// Dispatch all queued events in FIFO order
    ///
    /// Unconditional: drains the queue regardless of the current mode and
    /// does not change it. Used internally by the unlock and session-start
    /// notifications and may also be invoked directly by the surrounding
    /// daemon.
    pub fn dispatch_queued_device_events(&mut self) {
        while let Some(event) = self.event_queue.head() {
            debug!("Dispatching queued device event: {event}");
            self.dispatcher.dispatch_device_event(event);
            self.event_queue.remove();
        }
    }
}

impl<D, S> PowerManagerObserver for EventModerator<D, S>
where
    D: EventDispatcher,
    S: EventSource,
{
    fn on_screen_is_locked(&mut self) {
        info!("Screen is locked: queuing device events");
        self.is_event_queued = true;
    }

    fn on_screen_is_unlocked(&mut self) {
        info!("Screen is unlocked: dispatching device events");
        self.dispatch_queued_device_events();
        self.is_event_queued = false;
    }
}

impl<D, S> SessionManagerObserver for EventModerator<D, S>
where
    D: EventDispatcher,
    S: EventSource,
{
    fn on_session_started(&mut self, user: &str) {
        info!("Session started for {user}: dispatching device events");
        self.dispatch_queued_device_events();
        self.is_event_queued = false;
    }

    fn on_session_stopped(&mut self, user: &str) {
        info!("Session stopped for {user}: queuing device events");
        self.is_event_queued = true;
    }
}
