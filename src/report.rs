//! Per-run accounting of successes and skipped items.

use tracing::{info, warn};

/// Accumulated counts for one pipeline run. Per-item failures land here
/// instead of aborting the batch; the binary logs the totals at the end.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub processed: usize,
    pub ambiguous: usize,
    pub transient: usize,
    pub malformed: usize,
    pub matches: usize,
    failed_names: Vec<String>,
}

impl RunSummary {
    pub fn record_ambiguous(&mut self, name: &str) {
        self.ambiguous += 1;
        self.failed_names.push(name.to_string());
    }

    pub fn record_transient(&mut self, name: &str) {
        self.transient += 1;
        self.failed_names.push(name.to_string());
    }

    pub fn record_malformed(&mut self, count: usize) {
        self.malformed += count;
    }

    pub fn skipped(&self) -> usize {
        self.ambiguous + self.transient + self.malformed
    }

    /// Final accounting. Skipped items are warnings, never fatal.
    pub fn log(&self) {
        info!(
            "done: {} processed, {} matches, {} skipped",
            self.processed,
            self.matches,
            self.skipped()
        );
        if self.skipped() > 0 {
            warn!(
                "skipped breakdown: {} ambiguous, {} transient failures, {} malformed rows",
                self.ambiguous, self.transient, self.malformed
            );
        }
        if !self.failed_names.is_empty() {
            warn!("unresolved items (verify names or region set):");
            for name in &self.failed_names {
                warn!("  - {}", name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_totals() {
        let mut summary = RunSummary::default();
        summary.record_ambiguous("三山木");
        summary.record_transient("梅田");
        summary.record_transient("難波");
        summary.record_malformed(2);

        assert_eq!(summary.ambiguous, 1);
        assert_eq!(summary.transient, 2);
        assert_eq!(summary.malformed, 2);
        assert_eq!(summary.skipped(), 5);
    }
}
