use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use diskgate_core::{DeviceEvent, EventDispatcher, EventKind, EventSource, SourceError};
use diskgate_plugin::{
    api::{Controller, Event, LifecycleEvent},
    create_plugin,
};

#[derive(Debug, Default, Clone)]
struct RecordingDispatcher {
    dispatched: Arc<Mutex<Vec<DeviceEvent>>>,
}

impl RecordingDispatcher {
    fn dispatched(&self) -> Vec<DeviceEvent> {
        self.dispatched.lock().unwrap().clone()
    }
}

impl EventDispatcher for RecordingDispatcher {
    fn dispatch_device_event(&mut self, event: &DeviceEvent) {
        self.dispatched.lock().unwrap().push(event.clone());
    }
}

#[derive(Debug, Default, Clone)]
struct ScriptedSource {
    pending: Arc<Mutex<VecDeque<DeviceEvent>>>,
}

impl ScriptedSource {
    fn push(&self, event: DeviceEvent) {
        self.pending.lock().unwrap().push_back(event);
    }
}

impl EventSource for ScriptedSource {
    fn poll_device_event(&mut self) -> Result<Option<DeviceEvent>, SourceError> {
        Ok(self.pending.lock().unwrap().pop_front())
    }
}

#[tokio::test]
async fn session_round_trip_through_the_message_loop() -> anyhow::Result<()> {
    let dispatcher = RecordingDispatcher::default();
    let source = ScriptedSource::default();
    let plugin = create_plugin(Box::new(dispatcher.clone()), Box::new(source.clone()), 16);

    let mut event_rx = plugin.ports.event_subscriber.subscribe();
    let controller = Controller::new(plugin.ports.message_tx.clone());
    let message_loop = tokio::spawn(plugin.message_loop);

    assert!(matches!(
        event_rx.recv().await?,
        Event::Lifecycle(LifecycleEvent::Started)
    ));

    // Queue-first default: events are buffered until a session signal
    source.push(DeviceEvent::new(EventKind::DeviceAdded, "/dev/sda"));
    controller.command_process_device_events().await?;
    let status = controller.query_status().await?;
    assert!(status.is_event_queued);
    assert_eq!(status.queued_events, 1);
    assert!(dispatcher.dispatched().is_empty());

    controller.signal_session_started("alice")?;
    assert!(matches!(
        event_rx.recv().await?,
        Event::ModeChanged {
            is_event_queued: false
        }
    ));
    assert_eq!(
        dispatcher.dispatched(),
        vec![DeviceEvent::new(EventKind::DeviceAdded, "/dev/sda")]
    );

    // While the session is active events pass straight through
    source.push(DeviceEvent::new(EventKind::DiskAdded, "/dev/sda1"));
    controller.command_process_device_events().await?;
    let status = controller.query_status().await?;
    assert!(!status.is_event_queued);
    assert_eq!(status.queued_events, 0);
    assert_eq!(dispatcher.dispatched().len(), 2);

    // Stopping the session re-enables buffering
    controller.signal_session_stopped("alice")?;
    assert!(matches!(
        event_rx.recv().await?,
        Event::ModeChanged {
            is_event_queued: true
        }
    ));
    source.push(DeviceEvent::new(EventKind::DiskRemoved, "/dev/sda1"));
    controller.command_process_device_events().await?;
    let status = controller.query_status().await?;
    assert!(status.is_event_queued);
    assert_eq!(status.queued_events, 1);
    assert_eq!(dispatcher.dispatched().len(), 2);

    // Restarting the session flushes the buffered event
    controller.signal_session_started("alice")?;
    assert!(matches!(
        event_rx.recv().await?,
        Event::ModeChanged {
            is_event_queued: false
        }
    ));
    assert_eq!(
        dispatcher.dispatched().last(),
        Some(&DeviceEvent::new(EventKind::DiskRemoved, "/dev/sda1"))
    );

    controller.command_shutdown().await?;
    assert!(matches!(
        event_rx.recv().await?,
        Event::Lifecycle(LifecycleEvent::Stopped)
    ));
    message_loop.await?;
    Ok(())
}

#[tokio::test]
async fn redundant_signals_publish_no_mode_change() -> anyhow::Result<()> {
    let dispatcher = RecordingDispatcher::default();
    let source = ScriptedSource::default();
    let plugin = create_plugin(Box::new(dispatcher), Box::new(source), 16);

    let mut event_rx = plugin.ports.event_subscriber.subscribe();
    let controller = Controller::new(plugin.ports.message_tx.clone());
    let message_loop = tokio::spawn(plugin.message_loop);

    assert!(matches!(
        event_rx.recv().await?,
        Event::Lifecycle(LifecycleEvent::Started)
    ));

    // Already queuing: locking the screen changes nothing
    controller.signal_screen_locked()?;
    controller.signal_screen_unlocked()?;
    controller.signal_screen_unlocked()?;
    controller.command_shutdown().await?;

    // Exactly one mode change (unlock), then the shutdown event
    assert!(matches!(
        event_rx.recv().await?,
        Event::ModeChanged {
            is_event_queued: false
        }
    ));
    assert!(matches!(
        event_rx.recv().await?,
        Event::Lifecycle(LifecycleEvent::Stopped)
    ));
    message_loop.await?;
    Ok(())
}
