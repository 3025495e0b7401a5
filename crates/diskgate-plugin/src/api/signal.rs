/// Lifecycle notifications forwarded to the moderator
///
/// Fire-and-forget: signals inform the moderator of a fact that has
/// already happened and carry no reply channel.
#[derive(Debug, Clone)]
pub enum Signal {
    /// Power manager reported that the screen has been locked
    ScreenLocked,

    /// Power manager reported that the screen has been unlocked
    ScreenUnlocked,

    /// Session manager reported the start of a user session
    SessionStarted(String),

    /// Session manager reported the end of a user session
    SessionStopped(String),
}
