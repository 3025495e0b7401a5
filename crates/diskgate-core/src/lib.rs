//! Session-gated device event moderation
//!
//! Buffers device/disk events while the screen is locked or no login
//! session is active and forwards them in arrival order once an
//! authenticated session context is confirmed.

#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]
#![warn(rust_2018_idioms)]

pub mod event;
pub mod moderator;
pub mod observer;
pub mod queue;

pub use self::{
    event::{DeviceEvent, DevicePath, EventKind},
    moderator::{
        EventDispatcher, EventDispatcherBoxed, EventModerator, EventSource, EventSourceBoxed,
        SourceError,
    },
    observer::{PowerManagerObserver, SessionManagerObserver},
    queue::EventQueue,
};
