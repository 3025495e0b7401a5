#[derive(Debug, Clone)]
pub enum Event {
    Lifecycle(LifecycleEvent),

    /// The moderation mode has actually flipped
    ///
    /// Not published for redundant signals that leave the mode unchanged.
    ModeChanged { is_event_queued: bool },
}

/// Common lifecycle events
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    Started,
    Stopped,
}
