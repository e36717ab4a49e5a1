use crate::fire::bridge::WriteAck;

/// Diagnostic summary of one clear cycle.
///
/// A cycle always runs to completion; the report only says how the
/// individual restore writes went.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Whether the bulk removal ran (false when the store was already empty).
    pub cleared: bool,
    /// Cookies captured per allow-listed domain, in allow list order.
    pub snapshot: Vec<(String, usize)>,
    pub restored: usize,
    pub rejected: usize,
    pub abandoned: usize,
    pub timed_out: usize,
}

impl ClearReport {
    pub(crate) fn record(&mut self, ack: WriteAck) {
        match ack {
            WriteAck::Stored => self.restored += 1,
            WriteAck::Rejected => self.rejected += 1,
            WriteAck::Abandoned => self.abandoned += 1,
            WriteAck::TimedOut => self.timed_out += 1,
        }
    }

    /// Number of restore writes issued.
    pub fn attempted(&self) -> usize {
        self.restored + self.failed()
    }

    /// Restore writes that were not acknowledged as successful.
    pub fn failed(&self) -> usize {
        self.rejected + self.abandoned + self.timed_out
    }
}
