use super::criteria::{CriteriaResult, Criterion};
use super::universe::{UniverseRow, UniverseTable};

pub const RANK_COLUMN: &str = "Rank";
pub const PRICE_COLUMN: &str = "Price";
pub const SCORE_COLUMN: &str = "Score";

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    /// 1-based position in the ranked table
    pub rank: usize,
    pub ticker: String,
    pub price: f64,
    pub criteria: CriteriaResult,
    pub attributes: Vec<String>,
}

impl RankedRow {
    pub fn score(&self) -> u8 {
        self.criteria.score()
    }

    /// Cell values in the same order as `RankedTable::columns`.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.rank.to_string(), self.price.to_string(), self.score().to_string()];
        cells.extend(self.attributes.iter().cloned());
        cells.extend(self.criteria.flags().map(|(_, passed)| passed.to_string()));
        cells
    }
}

/// Universe sorted by F-Score, highest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedTable {
    attribute_names: Vec<String>,
    rows: Vec<RankedRow>,
}

impl RankedTable {
    pub(crate) fn new(attribute_names: Vec<String>, rows: Vec<RankedRow>) -> Self {
        Self { attribute_names, rows }
    }

    /// Rank, price and score first, then the listing attributes and the nine criteria.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec![
            RANK_COLUMN.to_string(),
            PRICE_COLUMN.to_string(),
            SCORE_COLUMN.to_string(),
        ];
        columns.extend(self.attribute_names.iter().cloned());
        columns.extend(Criterion::ALL.iter().map(|criterion| criterion.label().to_string()));
        columns
    }

    pub fn rows(&self) -> &[RankedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, ticker: &str) -> Option<&RankedRow> {
        self.rows.iter().find(|row| row.ticker == ticker)
    }

    /// Rebuilds a universe holding the same rows in ranked order.
    ///
    /// Rows come from a `UniverseTable`, so tickers are unique.
    pub fn to_universe(&self) -> UniverseTable {
        let rows = self
            .rows
            .iter()
            .map(|row| UniverseRow {
                ticker: row.ticker.clone(),
                price: row.price,
                attributes: row.attributes.clone(),
            })
            .collect();
        UniverseTable::from_unique_rows(self.attribute_names.clone(), rows)
    }
}
