//! Run-level statistics over verification outcomes.
use crate::verifier::VerificationOutcome;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub total_count: usize,
    pub valid_count: usize,
    /// Includes transport errors.
    pub invalid_count: usize,
    pub transport_error_count: usize,
    /// valid / total * 100, rounded to two decimals.
    pub success_rate: f64,
}

impl RunSummary {
    /// Count one outcome. Call [`RunSummary::finish`] once all are recorded.
    pub fn record(&mut self, outcome: &VerificationOutcome) {
        self.total_count += 1;
        match outcome {
            VerificationOutcome::Valid { .. } => self.valid_count += 1,
            VerificationOutcome::Invalid { .. } => self.invalid_count += 1,
            VerificationOutcome::TransportError { .. } => {
                self.invalid_count += 1;
                self.transport_error_count += 1;
            }
        }
    }

    pub fn finish(mut self) -> Self {
        self.success_rate = success_rate(self.valid_count, self.total_count);
        self
    }
}

pub fn success_rate(valid: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = (valid as f64) / (total as f64) * 100.0;
    (pct * 100.0).round() / 100.0
}
