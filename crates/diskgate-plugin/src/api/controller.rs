use crate::{reply_channel, send_message_receive_reply, MessageSender, PluginError, PluginResult};

use super::{Command, Query, Signal, Status};

/// Remote controller for the plugin
///
/// Wraps the message-based communication with the plugin into
/// asynchronous functions. Signals are sent without awaiting anything:
/// like the observer notifications they transport, they cannot be
/// rejected, only lost if the plugin has already terminated.
#[derive(Debug, Clone)]
pub struct Controller {
    message_tx: MessageSender,
}

impl Controller {
    #[must_use]
    pub const fn new(message_tx: MessageSender) -> Self {
        Self { message_tx }
    }

    pub async fn command_process_device_events(&self) -> PluginResult<()> {
        let (reply_tx, reply_rx) = reply_channel();
        let command = Command::ProcessDeviceEvents(reply_tx);
        send_message_receive_reply(command, &self.message_tx, reply_rx).await
    }

    pub async fn command_dispatch_queued_device_events(&self) -> PluginResult<()> {
        let (reply_tx, reply_rx) = reply_channel();
        let command = Command::DispatchQueuedDeviceEvents(reply_tx);
        send_message_receive_reply(command, &self.message_tx, reply_rx).await
    }

    pub async fn command_shutdown(&self) -> PluginResult<()> {
        let (reply_tx, reply_rx) = reply_channel();
        let command = Command::Shutdown(reply_tx);
        send_message_receive_reply(command, &self.message_tx, reply_rx).await
    }

    pub async fn query_status(&self) -> PluginResult<Status> {
        let (reply_tx, reply_rx) = reply_channel();
        let query = Query::Status(reply_tx);
        send_message_receive_reply(query, &self.message_tx, reply_rx).await
    }

    pub fn signal_screen_locked(&self) -> PluginResult<()> {
        self.send_signal(Signal::ScreenLocked)
    }

    pub fn signal_screen_unlocked(&self) -> PluginResult<()> {
        self.send_signal(Signal::ScreenUnlocked)
    }

    pub fn signal_session_started(&self, user: impl Into<String>) -> PluginResult<()> {
        self.send_signal(Signal::SessionStarted(user.into()))
    }

    pub fn signal_session_stopped(&self, user: impl Into<String>) -> PluginResult<()> {
        self.send_signal(Signal::SessionStopped(user.into()))
    }

    fn send_signal(&self, signal: Signal) -> PluginResult<()> {
        self.message_tx
            .send(signal.into())
            .map_err(|_| PluginError::MessageChannelClosed)
    }
}
