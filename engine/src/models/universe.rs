use std::collections::HashMap;
use std::fmt;

use crate::error::{FscoreError, Result};

/// Which listing the universe comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniverseSelection {
    /// Live quotes
    Current,
    /// Listing as of the given calendar year
    Historical(i32),
}

impl UniverseSelection {
    pub fn from_year(year: Option<i32>) -> Self {
        match year {
            Some(year) => UniverseSelection::Historical(year),
            None => UniverseSelection::Current,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            UniverseSelection::Current => None,
            UniverseSelection::Historical(year) => Some(*year),
        }
    }
}

impl fmt::Display for UniverseSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniverseSelection::Current => write!(f, "current"),
            UniverseSelection::Historical(year) => write!(f, "{}", year),
        }
    }
}

/// One listed equity with its quote and the remaining listing attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseRow {
    pub ticker: String,
    pub price: f64,
    /// Values aligned with `UniverseTable::attribute_names`.
    pub attributes: Vec<String>,
}

/// Insertion-ordered table of equities keyed by ticker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniverseTable {
    attribute_names: Vec<String>,
    rows: Vec<UniverseRow>,
    index: HashMap<String, usize>,
}

impl UniverseTable {
    pub fn new(attribute_names: Vec<String>) -> Self {
        Self {
            attribute_names,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends a row. Missing trailing attributes are filled with empty strings.
    pub fn insert(&mut self, mut row: UniverseRow) -> Result<()> {
        if self.index.contains_key(&row.ticker) {
            return Err(FscoreError::DuplicateTicker(row.ticker));
        }
        row.attributes.resize(self.attribute_names.len(), String::new());
        self.index.insert(row.ticker.clone(), self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    /// Builds a table from rows whose tickers are already known to be unique.
    pub(crate) fn from_unique_rows(attribute_names: Vec<String>, rows: Vec<UniverseRow>) -> Self {
        let mut table = Self {
            attribute_names,
            rows,
            index: HashMap::new(),
        };
        table.reindex();
        table
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn rows(&self) -> &[UniverseRow] {
        &self.rows
    }

    pub fn get(&self, ticker: &str) -> Option<&UniverseRow> {
        self.index.get(ticker).map(|&position| &self.rows[position])
    }

    pub fn tickers(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.ticker.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.rows.is_empty() {
            Err(FscoreError::UniverseEmpty)
        } else {
            Ok(())
        }
    }

    /// Drops rows whose quote is not strictly positive. Returns how many were removed.
    pub fn retain_positive_quotes(&mut self) -> usize {
        self.retain(|row| row.price > 0.0)
    }

    /// Drops rows whose `column` value is below `min` or not numeric.
    pub fn retain_min_attribute(&mut self, column: &str, min: f64) -> Result<usize> {
        let position = self
            .attribute_position(column)
            .ok_or_else(|| FscoreError::MissingColumn(column.to_string()))?;

        Ok(self.retain(|row| {
            row.attributes
                .get(position)
                .and_then(|value| parse_number(value))
                .is_some_and(|value| value >= min)
        }))
    }

    fn attribute_position(&self, name: &str) -> Option<usize> {
        self.attribute_names
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
    }

    fn retain(&mut self, keep: impl Fn(&UniverseRow) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        self.reindex();
        before - self.rows.len()
    }

    fn reindex(&mut self) {
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| (row.ticker.clone(), position))
            .collect();
    }
}

/// Parses a listing number, accepting a decimal comma when no dot is present.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| {
            if trimmed.contains('.') {
                None
            } else {
                trimmed.replace(',', ".").parse::<f64>().ok()
            }
        })
        .filter(|number| number.is_finite())
}
