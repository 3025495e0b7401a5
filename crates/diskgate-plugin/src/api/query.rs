use crate::ReplySender;

#[derive(Debug)]
pub enum Query {
    Status(ReplySender<Status>),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Status {
    /// Whether polled events are currently buffered instead of dispatched
    pub is_event_queued: bool,

    /// Number of buffered events awaiting dispatch
    pub queued_events: usize,
}
