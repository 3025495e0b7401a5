//! Message-loop plugin around an [`EventModerator`](diskgate_core::EventModerator)
//!
//! Wraps the single-threaded moderation core in an asynchronous message
//! loop. The loop processes one message at a time, which preserves the
//! core's serialized-invocation contract by construction: device event
//! polling, lifecycle signals, and status queries can originate from
//! independent tasks without any locking around the moderator itself.

#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]
#![warn(rust_2018_idioms)]

use std::{future::Future, pin::Pin};

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

use diskgate_core::{EventDispatcherBoxed, EventSourceBoxed};

pub mod api;

mod internal;
use self::internal::message_loop::create_message_loop;

// ------ -------
//  Plugin shape
// ------ -------

#[allow(missing_debug_implementations)]
pub struct Plugin {
    pub ports: PluginPorts,
    pub message_loop: MessageLoop,
}

pub type MessageLoop = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[derive(Debug, Clone)]
pub struct PluginPorts {
    pub message_tx: MessageSender,
    pub event_subscriber: EventSubscriber,
}

// ------ -------
//   Messages
// ------ -------

pub type MessageSender = mpsc::UnboundedSender<api::Message>;
pub type MessageReceiver = mpsc::UnboundedReceiver<api::Message>;

pub fn message_channel() -> (MessageSender, MessageReceiver) {
    mpsc::unbounded_channel()
}

// ------ -------
// Reply messages
// ------ -------

pub type ReplySender<T> = oneshot::Sender<T>;
pub type ReplyReceiver<T> = oneshot::Receiver<T>;

pub fn reply_channel<T>() -> (ReplySender<T>, ReplyReceiver<T>) {
    oneshot::channel()
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("the plugin message channel is closed")]
    MessageChannelClosed,

    #[error("no reply received from the plugin")]
    NoReplyReceived,
}

pub type PluginResult<T> = Result<T, PluginError>;

/// Send a message and wait for the reply
pub async fn send_message_receive_reply<T>(
    message: impl Into<api::Message>,
    message_tx: &MessageSender,
    reply_rx: ReplyReceiver<T>,
) -> PluginResult<T> {
    message_tx
        .send(message.into())
        .map_err(|_| PluginError::MessageChannelClosed)?;
    reply_rx.await.map_err(|_| PluginError::NoReplyReceived)
}

pub(crate) fn send_reply<T>(reply_tx: ReplySender<T>, reply: T) {
    if reply_tx.send(reply).is_err() {
        // The requester has already gone away
        log::debug!("Dropping unsent plugin reply");
    }
}

// ------ -------
//  Broadcasting
// ------ -------

pub type EventSender = broadcast::Sender<api::Event>;
pub type EventReceiver = broadcast::Receiver<api::Event>;

#[derive(Debug, Clone)]
pub struct EventSubscriber {
    sender: EventSender,
}

impl EventSubscriber {
    #[must_use]
    pub fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }
}

pub fn event_channel(channel_capacity: usize) -> (EventSender, EventSubscriber) {
    let (event_tx, _) = broadcast::channel(channel_capacity);
    let event_subscriber = EventSubscriber::new(event_tx.clone());
    (event_tx, event_subscriber)
}

pub(crate) fn publish_event(event_tx: &EventSender, event: api::Event) {
    if let Err(broadcast::error::SendError(unpublished)) = event_tx.send(event) {
        // Not an error: subscribers may come and go at any time
        log::debug!("No subscribers for plugin event: {unpublished:?}");
    }
}

pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 100;

/// Create a plugin driving the given dispatcher and source
///
/// The returned [`MessageLoop`] future must be spawned onto the caller's
/// runtime; it terminates after a shutdown command has been received or
/// all message senders have been dropped.
pub fn create_plugin(
    dispatcher: EventDispatcherBoxed,
    source: EventSourceBoxed,
    event_channel_capacity: usize,
) -> Plugin {
    let (event_tx, event_subscriber) = event_channel(event_channel_capacity);
    let (message_loop, message_tx) = create_message_loop(dispatcher, source, event_tx);
    Plugin {
        ports: PluginPorts {
            message_tx,
            event_subscriber,
        },
        message_loop,
    }
}
