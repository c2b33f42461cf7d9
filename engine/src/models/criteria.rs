use std::collections::HashMap;

/// The nine Piotroski criteria, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    RoaPositive,
    FcoPositive,
    FcoExceedsNetIncome,
    RoaIncreasing,
    LeverageDecreasing,
    LiquidityIncreasing,
    ShareCountConstant,
    GrossMarginIncreasing,
    AssetTurnoverIncreasing,
}

impl Criterion {
    pub const ALL: [Criterion; 9] = [
        Criterion::RoaPositive,
        Criterion::FcoPositive,
        Criterion::FcoExceedsNetIncome,
        Criterion::RoaIncreasing,
        Criterion::LeverageDecreasing,
        Criterion::LiquidityIncreasing,
        Criterion::ShareCountConstant,
        Criterion::GrossMarginIncreasing,
        Criterion::AssetTurnoverIncreasing,
    ];

    /// Column header used in the ranked table.
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::RoaPositive => "ROA positive",
            Criterion::FcoPositive => "FCO positive",
            Criterion::FcoExceedsNetIncome => "FCO > Net Income",
            Criterion::RoaIncreasing => "ROA increasing",
            Criterion::LeverageDecreasing => "Leverage decreasing",
            Criterion::LiquidityIncreasing => "Current Ratio increasing",
            Criterion::ShareCountConstant => "Share Count constant",
            Criterion::GrossMarginIncreasing => "Gross Margin increasing",
            Criterion::AssetTurnoverIncreasing => "Asset Turnover increasing",
        }
    }
}

/// Outcome of the nine criteria for one ticker.
///
/// The default value (every flag false, score 0) is also what a ticker gets
/// when its indicators could not be fetched or evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CriteriaResult {
    pub roa_positive: bool,
    pub fco_positive: bool,
    pub fco_exceeds_net_income: bool,
    pub roa_increasing: bool,
    pub leverage_decreasing: bool,
    pub liquidity_increasing: bool,
    pub share_count_constant: bool,
    pub gross_margin_increasing: bool,
    pub asset_turnover_increasing: bool,
}

impl CriteriaResult {
    pub fn get(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::RoaPositive => self.roa_positive,
            Criterion::FcoPositive => self.fco_positive,
            Criterion::FcoExceedsNetIncome => self.fco_exceeds_net_income,
            Criterion::RoaIncreasing => self.roa_increasing,
            Criterion::LeverageDecreasing => self.leverage_decreasing,
            Criterion::LiquidityIncreasing => self.liquidity_increasing,
            Criterion::ShareCountConstant => self.share_count_constant,
            Criterion::GrossMarginIncreasing => self.gross_margin_increasing,
            Criterion::AssetTurnoverIncreasing => self.asset_turnover_increasing,
        }
    }

    /// Flags in scoring order.
    pub fn flags(&self) -> impl Iterator<Item = (Criterion, bool)> + '_ {
        Criterion::ALL.into_iter().map(move |criterion| (criterion, self.get(criterion)))
    }

    /// Number of satisfied criteria, 0 through 9.
    pub fn score(&self) -> u8 {
        self.flags().filter(|(_, passed)| *passed).count() as u8
    }
}

/// Criteria outcome per ticker, filled by the fan-out and read by the ranking.
pub type ScoreMap = HashMap<String, CriteriaResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scores_zero() {
        let result = CriteriaResult::default();
        assert_eq!(result.score(), 0);
        assert!(result.flags().all(|(_, passed)| !passed));
    }

    #[test]
    fn test_flags_follow_scoring_order() {
        let result = CriteriaResult {
            roa_positive: true,
            asset_turnover_increasing: true,
            ..Default::default()
        };
        let flags: Vec<_> = result.flags().collect();
        assert_eq!(flags.len(), 9);
        assert_eq!(flags[0], (Criterion::RoaPositive, true));
        assert_eq!(flags[8], (Criterion::AssetTurnoverIncreasing, true));
        assert_eq!(result.score(), 2);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Criterion::ALL.iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 9);
    }
}
