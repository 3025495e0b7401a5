//! Public plugin API

pub mod controller;
pub use self::controller::Controller;

pub mod command;
pub use self::command::Command;

pub mod query;
pub use self::query::{Query, Status};

pub mod signal;
pub use self::signal::Signal;

pub mod event;
pub use self::event::{Event, LifecycleEvent};

#[derive(Debug)]
pub enum Message {
    Command(Command),
    Query(Query),
    Signal(Signal),
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

impl From<Query> for Message {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

impl From<Signal> for Message {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}
