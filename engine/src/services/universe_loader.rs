use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use crate::{
    error::{FscoreError, Result},
    models::{parse_number, UniverseRow, UniverseSelection, UniverseTable},
    utils::Logger,
};

pub const TICKER_COLUMN: &str = "ticker";
pub const PRICE_COLUMN: &str = "price";

const CURRENT_FILE: &str = "universe.csv";

/// Reads equity universes from CSV listings.
///
/// The directory holds `universe.csv` for live quotes and `universe_<YEAR>.csv`
/// for the listing as of a past year.
pub struct UniverseLoader {
    dir: PathBuf,
    logger: Logger,
}

impl UniverseLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            logger: Logger::new("UNIVERSE"),
        }
    }

    pub fn path_for(&self, selection: UniverseSelection) -> PathBuf {
        match selection {
            UniverseSelection::Current => self.dir.join(CURRENT_FILE),
            UniverseSelection::Historical(year) => self.dir.join(format!("universe_{}.csv", year)),
        }
    }

    pub fn load(&self, selection: UniverseSelection) -> Result<UniverseTable> {
        let path = self.path_for(selection);
        self.logger.info(&format!("Loading {} universe from {}", selection, path.display()));

        let table = load_csv(&path)?;

        self.logger.info(&format!(
            "Loaded {} tickers with {} extra columns",
            table.len(),
            table.attribute_names().len()
        ));
        Ok(table)
    }
}

pub fn load_csv(path: &Path) -> Result<UniverseTable> {
    let file = File::open(path)?;
    parse_universe(file)
}

/// Parses a universe listing.
///
/// `ticker` and `price` columns are required (matched case-insensitively); all
/// other columns are kept as text attributes in file order.
pub fn parse_universe<R: Read>(reader: R) -> Result<UniverseTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let ticker_position = column_position(&headers, TICKER_COLUMN)?;
    let price_position = column_position(&headers, PRICE_COLUMN)?;

    let attribute_positions: Vec<usize> = (0..headers.len())
        .filter(|position| *position != ticker_position && *position != price_position)
        .collect();
    let attribute_names = attribute_positions
        .iter()
        .map(|&position| headers[position].to_string())
        .collect();

    let mut table = UniverseTable::new(attribute_names);

    for record in reader.records() {
        let record = record?;
        let ticker = record.get(ticker_position).unwrap_or_default().to_string();
        if ticker.is_empty() {
            continue;
        }

        let raw_price = record.get(price_position).unwrap_or_default();
        let price = parse_number(raw_price).ok_or_else(|| FscoreError::InvalidNumber {
            ticker: ticker.clone(),
            column: headers[price_position].to_string(),
            value: raw_price.to_string(),
        })?;

        let attributes = attribute_positions
            .iter()
            .map(|&position| record.get(position).unwrap_or_default().to_string())
            .collect();

        table.insert(UniverseRow {
            ticker,
            price,
            attributes,
        })?;
    }

    Ok(table)
}

fn column_position(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
        .ok_or_else(|| FscoreError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
Ticker,Liquidity,Price,Sector
PETR4,1500000,35.20,Energy
VALE3,900000,61.00,Mining
OIBR3,120000,0,Telecom
";

    #[test]
    fn test_parse_listing() {
        let table = parse_universe(LISTING.as_bytes()).unwrap();
        assert_eq!(table.tickers(), vec!["PETR4", "VALE3", "OIBR3"]);
        assert_eq!(table.attribute_names(), &["Liquidity", "Sector"]);

        let vale = table.get("VALE3").unwrap();
        assert_eq!(vale.price, 61.0);
        assert_eq!(vale.attributes, vec!["900000", "Mining"]);
    }

    #[test]
    fn test_missing_price_column() {
        let err = parse_universe("ticker,liquidity\nPETR4,10\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FscoreError::MissingColumn(column) if column == PRICE_COLUMN));
    }

    #[test]
    fn test_invalid_price_names_ticker() {
        let err = parse_universe("ticker,price\nPETR4,abc\n".as_bytes()).unwrap_err();
        match err {
            FscoreError::InvalidNumber { ticker, value, .. } => {
                assert_eq!(ticker, "PETR4");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_rows_are_rejected() {
        let err = parse_universe("ticker,price\nPETR4,1\nPETR4,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FscoreError::DuplicateTicker(_)));
    }

    #[test]
    fn test_blank_tickers_are_skipped() {
        let table = parse_universe("ticker,price\n,1\nITSA4,9.8\n".as_bytes()).unwrap();
        assert_eq!(table.tickers(), vec!["ITSA4"]);
    }

    #[test]
    fn test_path_for_selection() {
        let loader = UniverseLoader::new("data");
        assert_eq!(loader.path_for(UniverseSelection::Current), PathBuf::from("data/universe.csv"));
        assert_eq!(
            loader.path_for(UniverseSelection::Historical(2019)),
            PathBuf::from("data/universe_2019.csv")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let loader = UniverseLoader::new("/nonexistent-fscore-dir");
        assert!(matches!(loader.load(UniverseSelection::Current), Err(FscoreError::Io(_))));
    }
}
