use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use anyhow::Result;

use diskgate::{
    core::{DeviceEvent, EventDispatcher, EventKind, EventSource, SourceError},
    plugin::{api::Controller, create_plugin, DEFAULT_EVENT_CHANNEL_CAPACITY},
};

/// Stand-in for a udev monitor: events are plugged in by hand
#[derive(Debug, Default, Clone)]
struct DemoSource {
    pending: Arc<Mutex<VecDeque<DeviceEvent>>>,
}

impl DemoSource {
    fn plug(&self, event: DeviceEvent) {
        self.pending.lock().unwrap().push_back(event);
    }
}

impl EventSource for DemoSource {
    fn poll_device_event(&mut self) -> Result<Option<DeviceEvent>, SourceError> {
        Ok(self.pending.lock().unwrap().pop_front())
    }
}

/// Stand-in for the mount/UI logic
#[derive(Debug)]
struct LoggingDispatcher;

impl EventDispatcher for LoggingDispatcher {
    fn dispatch_device_event(&mut self, event: &DeviceEvent) {
        log::info!("Would act on device event now: {event}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();
    log::info!("Starting session-gated dispatch example");

    let source = DemoSource::default();
    let plugin = create_plugin(
        Box::new(LoggingDispatcher),
        Box::new(source.clone()),
        DEFAULT_EVENT_CHANNEL_CAPACITY,
    );
    let mut event_rx = plugin.ports.event_subscriber.subscribe();
    let controller = Controller::new(plugin.ports.message_tx.clone());
    let message_loop = tokio::spawn(plugin.message_loop);

    let event_printer = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            log::info!("Plugin event: {event:?}");
        }
    });

    // A device shows up before anyone has logged in: nothing is dispatched
    source.plug(DeviceEvent::new(EventKind::DeviceAdded, "/dev/sda"));
    source.plug(DeviceEvent::new(EventKind::DiskAdded, "/dev/sda1"));
    controller.command_process_device_events().await?;
    let status = controller.query_status().await?;
    log::info!(
        "Buffered {} event(s) while no session is active",
        status.queued_events
    );

    // Logging in flushes the buffer in arrival order
    controller.signal_session_started("alice")?;

    // With the session active, events pass straight through
    source.plug(DeviceEvent::new(EventKind::DiskChanged, "/dev/sda1"));
    controller.command_process_device_events().await?;

    // Locking the screen gates events again until the next unlock
    controller.signal_screen_locked()?;
    source.plug(DeviceEvent::new(EventKind::DiskRemoved, "/dev/sda1"));
    controller.command_process_device_events().await?;
    controller.signal_screen_unlocked()?;

    controller.command_shutdown().await?;
    message_loop.await?;
    event_printer.abort();
    log::info!("Terminating session-gated dispatch example");
    Ok(())
}
