/// The current step of a Fire Button clear cycle.
/// Steps are entered strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPhase {
    /// No cycle is running.
    #[default]
    Idle,

    /// Waiting for the store to make prior writes durable.
    FlushingBeforeSnapshot,

    /// Reading allow-listed domains from the store.
    Snapshotting,

    /// Running the bulk removal strategy.
    Clearing,

    /// Writing snapshotted cookies back, one acknowledged write at a time.
    Restoring,

    /// Waiting for the store to make restored cookies durable.
    FlushingAfterRestore,
}

impl ClearPhase {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            ClearPhase::Idle => 0,
            ClearPhase::FlushingBeforeSnapshot => 1,
            ClearPhase::Snapshotting => 2,
            ClearPhase::Clearing => 3,
            ClearPhase::Restoring => 4,
            ClearPhase::FlushingAfterRestore => 5,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => ClearPhase::FlushingBeforeSnapshot,
            2 => ClearPhase::Snapshotting,
            3 => ClearPhase::Clearing,
            4 => ClearPhase::Restoring,
            5 => ClearPhase::FlushingAfterRestore,
            _ => ClearPhase::Idle,
        }
    }

    /// Whether a cycle is in flight.
    pub fn is_active(self) -> bool {
        self != ClearPhase::Idle
    }
}
