use serde::Deserialize;
use serde_json::Value;

use crate::error::{FscoreError, Result};

/// One reporting period of fundamentals for a ticker, as published by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IndicatorRecord {
    /// Return on assets
    pub roa: f64,
    /// Operating cash flow
    pub fco: f64,
    #[serde(rename = "lucroLiquido")]
    pub net_income: f64,
    /// Net debt over equity
    #[serde(rename = "dlpl")]
    pub leverage: f64,
    /// Current ratio
    #[serde(rename = "liqCorrent")]
    pub liquidity: f64,
    #[serde(rename = "qntAcoes")]
    pub share_count: f64,
    #[serde(rename = "margBruta")]
    pub gross_margin: f64,
    #[serde(rename = "giroAtivos")]
    pub asset_turnover: f64,
}

/// Raw provider records for one ticker, most recent first.
///
/// Records stay as JSON values until evaluation. Only the first two are ever
/// decoded, so older entries with missing or null fields never affect the score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorHistory {
    records: Vec<Value>,
}

impl IndicatorHistory {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Joins the current-period records with the yearly ones, current first.
    pub fn from_periods(current: Vec<Value>, yearly: Vec<Value>) -> Self {
        let mut records = current;
        records.extend(yearly);
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Decodes the current (index 0) and prior (index 1) periods.
    pub fn current_and_prior(&self) -> Result<(IndicatorRecord, IndicatorRecord)> {
        match self.records.as_slice() {
            [current, prior, ..] => Ok((decode(current, 0)?, decode(prior, 1)?)),
            _ => Err(FscoreError::InsufficientHistory {
                records: self.records.len(),
            }),
        }
    }
}

fn decode(value: &Value, index: usize) -> Result<IndicatorRecord> {
    IndicatorRecord::deserialize(value).map_err(|source| FscoreError::MalformedRecord { index, source })
}
