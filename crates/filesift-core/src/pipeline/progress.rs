/// Ingestion progress reporting — lightweight messages sent from
/// classification workers to the caller via a crossbeam channel.

/// How often workers report: at least every N completions and always on the
/// final item.
pub const PROGRESS_INTERVAL: u64 = 100;

/// Suggested bound for the caller's progress channel.
///
/// The pipeline sends at most one message per [`PROGRESS_INTERVAL`]
/// completions, so even a million-file batch produces ~10k messages; a
/// consumer that drains a few times per second never applies back-pressure.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// A single progress report.
///
/// `current` is monotonically non-decreasing across reports and the final
/// report equals the total processed count. Reports may be emitted from
/// multiple worker threads; the channel serialises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestProgress {
    pub current: u64,
    pub total: u64,
}

impl IngestProgress {
    /// Completion percentage in 0.0–100.0.
    pub fn percent(self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.current as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_ratio_of_current_to_total() {
        let p = IngestProgress {
            current: 25,
            total: 100,
        };
        assert_eq!(p.percent(), 25.0);
    }

    #[test]
    fn empty_batch_reads_as_complete() {
        let p = IngestProgress {
            current: 0,
            total: 0,
        };
        assert_eq!(p.percent(), 100.0);
    }
}

// Compile-time guard: a zero-capacity channel would block every send.
const _: () = assert!(PROGRESS_CHANNEL_CAPACITY > 0);
