use crate::ReplySender;

#[derive(Debug)]
pub enum Command {
    /// Pull all currently available events from the source
    ProcessDeviceEvents(ReplySender<()>),

    /// Unconditionally flush the queued events in FIFO order
    DispatchQueuedDeviceEvents(ReplySender<()>),

    /// Terminate the message loop
    Shutdown(ReplySender<()>),
}
