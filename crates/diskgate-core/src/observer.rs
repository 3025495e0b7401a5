//! Lifecycle observer contracts
//!
//! Implemented by the [`EventModerator`](crate::EventModerator) and invoked
//! by the daemon's power-manager and session-manager signal listeners. All
//! notifications are infallible: they inform the observer of a fact that
//! has already happened and cannot be rejected.

/// Observer of power-manager screen lock state changes
pub trait PowerManagerObserver {
    /// The screen has been locked
    fn on_screen_is_locked(&mut self);

    /// The screen has been unlocked
    fn on_screen_is_unlocked(&mut self);
}

/// Observer of session-manager login session changes
pub trait SessionManagerObserver {
    /// A user session has started
    fn on_session_started(&mut self, user: &str);

    /// A user session has stopped
    fn on_session_stopped(&mut self, user: &str);
}
