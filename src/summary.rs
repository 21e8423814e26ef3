use crate::types::SenderSummary;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Finished per-sender summaries, in sender processing order.
#[derive(Debug, Clone)]
pub struct SummaryAggregator {
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    senders: Vec<SenderSummary>,
}

impl SummaryAggregator {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            senders: Vec::new(),
        }
    }

    pub fn record(&mut self, summary: SenderSummary) {
        self.senders.push(summary);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn senders(&self) -> &[SenderSummary] {
        &self.senders
    }

    pub fn total_attempted(&self) -> usize {
        self.senders.iter().map(|s| s.attempted_count).sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:-^80}", " TRANSFER SUMMARY ");
        let _ = writeln!(
            out,
            "{:<5} {:<44} {:>8} {:>8} {:>10}",
            "No.", "Sender", "Success", "Failed", "Attempted"
        );
        let _ = writeln!(out, "{:-^80}", "");

        for (i, summary) in self.senders.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:<5} {:<44} {:>8} {:>8} {:>10}",
                i + 1,
                summary.sender.to_string(),
                summary.success_count,
                summary.failure_count,
                summary.attempted_count
            );
        }

        let success: usize = self.senders.iter().map(|s| s.success_count).sum();
        let failed: usize = self.senders.iter().map(|s| s.failure_count).sum();
        let _ = writeln!(out, "{:-^80}", "");
        let _ = writeln!(
            out,
            "{:<5} {:<44} {:>8} {:>8} {:>10}",
            "",
            "Total",
            success,
            failed,
            self.total_attempted()
        );

        if let Some(finished_at) = self.finished_at {
            let elapsed = finished_at - self.started_at;
            let _ = writeln!(
                out,
                "Started {} | finished {} | {}s elapsed",
                self.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
                elapsed.num_seconds()
            );
        }
        out
    }
}

impl Default for SummaryAggregator {
    fn default() -> Self {
        Self::new()
    }
}
