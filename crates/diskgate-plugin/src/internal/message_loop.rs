use diskgate_core::{
    EventDispatcherBoxed, EventModerator, EventSourceBoxed, PowerManagerObserver as _,
    SessionManagerObserver as _,
};

use crate::{
    api::{Command, Event, LifecycleEvent, Message, Query, Signal, Status},
    message_channel, publish_event, send_reply, EventSender, MessageLoop, MessageReceiver,
    MessageSender,
};

type Moderator = EventModerator<EventDispatcherBoxed, EventSourceBoxed>;

pub fn create_message_loop(
    dispatcher: EventDispatcherBoxed,
    source: EventSourceBoxed,
    event_tx: EventSender,
) -> (MessageLoop, MessageSender) {
    let (message_tx, message_rx) = message_channel();
    let moderator = EventModerator::new(dispatcher, source);
    let message_loop = Box::pin(run_message_loop(moderator, message_rx, event_tx));
    (message_loop, message_tx)
}

async fn run_message_loop(
    mut moderator: Moderator,
    mut message_rx: MessageReceiver,
    event_tx: EventSender,
) {
    log::info!("Starting device event moderation");
    publish_event(&event_tx, Event::Lifecycle(LifecycleEvent::Started));

    while let Some(message) = message_rx.recv().await {
        log::debug!("Received message: {message:?}");
        match message {
            Message::Command(command) => match command {
                Command::ProcessDeviceEvents(reply_tx) => {
                    moderator.process_device_events();
                    send_reply(reply_tx, ());
                }
                Command::DispatchQueuedDeviceEvents(reply_tx) => {
                    moderator.dispatch_queued_device_events();
                    send_reply(reply_tx, ());
                }
                Command::Shutdown(reply_tx) => {
                    send_reply(reply_tx, ());
                    break;
                }
            },
            Message::Query(query) => match query {
                Query::Status(reply_tx) => {
                    let status = Status {
                        is_event_queued: moderator.is_event_queued(),
                        queued_events: moderator.queued_event_count(),
                    };
                    send_reply(reply_tx, status);
                }
            },
            Message::Signal(signal) => {
                let was_event_queued = moderator.is_event_queued();
                handle_signal(&mut moderator, signal);
                let is_event_queued = moderator.is_event_queued();
                if is_event_queued != was_event_queued {
                    publish_event(&event_tx, Event::ModeChanged { is_event_queued });
                }
            }
        }
    }

    log::info!("Stopping device event moderation");
    publish_event(&event_tx, Event::Lifecycle(LifecycleEvent::Stopped));
}

fn handle_signal(moderator: &mut Moderator, signal: Signal) {
    match signal {
        Signal::ScreenLocked => moderator.on_screen_is_locked(),
        Signal::ScreenUnlocked => moderator.on_screen_is_unlocked(),
        Signal::SessionStarted(user) => moderator.on_session_started(&user),
        Signal::SessionStopped(user) => moderator.on_session_stopped(&user),
    }
}
