use fscore::models::{CriteriaResult, ScoreMap};
use std::collections::BTreeMap;

// --- Fan-out results ---

/// Failure reason per ticker whose indicators could not be evaluated.
pub type UnavailableMap = BTreeMap<String, String>;

/// What the fan-out hands to the ranking step.
///
/// Every requested ticker has an entry in `scores`. Tickers listed in
/// `unavailable` carry the default, all-false result there, so they rank as
/// score 0 while the reason stays visible to the caller.
#[derive(Debug, Clone, Default)]
pub struct ScoreReport {
    pub scores: ScoreMap,
    pub unavailable: UnavailableMap,
}

impl ScoreReport {
    pub fn record_score(&mut self, ticker: String, result: CriteriaResult) {
        self.scores.insert(ticker, result);
    }

    pub fn record_unavailable(&mut self, ticker: String, reason: String) {
        self.scores.insert(ticker.clone(), CriteriaResult::default());
        self.unavailable.insert(ticker, reason);
    }

    pub fn evaluated(&self) -> usize {
        self.scores.len() - self.unavailable.len()
    }
}
