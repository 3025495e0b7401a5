use std::fmt;

/// Kind of a device or disk occurrence
///
/// Produced by an [`EventSource`](crate::EventSource) whenever it detects
/// a change in the set of attached devices or the disks they expose.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// An occurrence that carries no actionable information
    Ignored,

    DeviceAdded,

    /// A previously added device has been fully scanned
    DeviceScanned,

    DeviceRemoved,

    DiskAdded,

    /// A disk reappeared after its device had been removed
    DiskAddedAfterRemoved,

    DiskChanged,

    DiskRemoved,
}

impl EventKind {
    /// Whether this kind describes a disk (as opposed to a device) occurrence
    #[must_use]
    pub const fn is_disk_event(self) -> bool {
        matches!(
            self,
            Self::DiskAdded | Self::DiskAddedAfterRemoved | Self::DiskChanged | Self::DiskRemoved
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = match self {
            Self::Ignored => "ignored",
            Self::DeviceAdded => "device added",
            Self::DeviceScanned => "device scanned",
            Self::DeviceRemoved => "device removed",
            Self::DiskAdded => "disk added",
            Self::DiskAddedAfterRemoved => "disk added after removed",
            Self::DiskChanged => "disk changed",
            Self::DiskRemoved => "disk removed",
        };
        f.write_str(display)
    }
}

/// Opaque identifier of the affected device or volume
///
/// Typically a sysfs or device node path, but the moderation core never
/// interprets its contents.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DevicePath(String);

impl DevicePath {
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn to_value(self) -> String {
        self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DevicePath {
    fn from(from: String) -> Self {
        Self::from_value(from)
    }
}

impl From<&str> for DevicePath {
    fn from(from: &str) -> Self {
        Self::from_value(from)
    }
}

impl fmt::Display for DevicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of one device/disk occurrence
///
/// Two events are equal iff both their kind and their device path match
/// exactly.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DeviceEvent {
    pub kind: EventKind,

    pub device_path: DevicePath,
}

impl DeviceEvent {
    pub fn new(kind: EventKind, device_path: impl Into<DevicePath>) -> Self {
        Self {
            kind,
            device_path: device_path.into(),
        }
    }

    /// Whether this event describes a disk occurrence
    ///
    /// Provided for callers that filter the dispatched stream. The
    /// moderator itself treats all kinds uniformly.
    #[must_use]
    pub const fn is_disk_event(&self) -> bool {
        self.kind.is_disk_event()
    }
}

impl fmt::Display for DeviceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.device_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_event_kinds() {
        assert!(EventKind::DiskAdded.is_disk_event());
        assert!(EventKind::DiskAddedAfterRemoved.is_disk_event());
        assert!(EventKind::DiskChanged.is_disk_event());
        assert!(EventKind::DiskRemoved.is_disk_event());
        assert!(!EventKind::Ignored.is_disk_event());
        assert!(!EventKind::DeviceAdded.is_disk_event());
        assert!(!EventKind::DeviceScanned.is_disk_event());
        assert!(!EventKind::DeviceRemoved.is_disk_event());
    }

    #[test]
    fn event_equality_is_field_wise() {
        let event = DeviceEvent::new(EventKind::DiskAdded, "/dev/sda1");
        assert_eq!(event, DeviceEvent::new(EventKind::DiskAdded, "/dev/sda1"));
        assert_ne!(event, DeviceEvent::new(EventKind::DiskRemoved, "/dev/sda1"));
        assert_ne!(event, DeviceEvent::new(EventKind::DiskAdded, "/dev/sda2"));
    }

    #[test]
    fn device_path_value_round_trip() {
        let path = DevicePath::from_value("/sys/block/sdb");
        assert_eq!(path.as_str(), "/sys/block/sdb");
        assert_eq!(path.to_value(), "/sys/block/sdb");
    }
}
